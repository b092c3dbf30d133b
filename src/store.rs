//! In-memory work item store.
//!
//! The store owns the item collection and the active filter for one session.
//! Every mutation builds a new collection snapshot rather than editing the
//! previous one, so a snapshot handed out earlier never changes under its
//! holder.
//!
//! Validation runs before any mutation: a rejected call leaves the store
//! exactly as it was.

mod calendar;

use std::{fmt, sync::Arc};

use jiff::civil::Date;
use tracing::{debug, info};

use crate::model::{Filter, ItemId, NewWorkItem, Status, WorkItem};

pub use calendar::{CalendarDay, CalendarGrouping};

/// A required text field on a new work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Assignee,
}

impl Field {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Assignee => "assignee",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a new work item was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(Field),

    #[error("end date {end} cannot be before start date {start}")]
    EndBeforeStart { start: Date, end: Date },
}

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("invalid work item: {0}")]
    Validation(#[from] ValidationError),

    #[error("work item not found: {0}")]
    NotFound(ItemId),
}

pub type Result<T> = core::result::Result<T, StoreError>;

/// Session-scoped owner of the work item collection and the status filter.
#[derive(Debug, Clone, Default)]
pub struct WorkItemStore {
    items: Arc<[WorkItem]>,
    filter: Filter,
}

impl WorkItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with `filter` already active.
    pub fn with_filter(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Validates `fields` and appends a new `not-started` item at 0% progress.
    pub fn add(&mut self, fields: NewWorkItem) -> Result<WorkItem> {
        if let Err(e) = validate(&fields) {
            debug!(error = %e, "rejected new work item");
            return Err(e.into());
        }

        let item = WorkItem::create(fields);
        let mut next = self.items.to_vec();
        next.push(item.clone());
        self.items = next.into();

        info!(
            id = %item.id(),
            title = item.title(),
            assignee = item.assignee(),
            "added work item"
        );
        Ok(item)
    }

    /// Moves an item to `status`. Completing sets progress to 100; any other
    /// status leaves progress untouched, including when re-opening.
    pub fn change_status(&mut self, id: ItemId, status: Status) -> Result<WorkItem> {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            debug!(%id, %status, "status change for unknown work item");
            return Err(StoreError::NotFound(id));
        };

        let updated = self.items[index].with_status(status);
        let mut next = self.items.to_vec();
        next[index] = updated.clone();
        self.items = next.into();

        info!(
            %id,
            %status,
            progress = updated.progress().percent(),
            "updated work item status"
        );
        Ok(updated)
    }

    pub fn set_filter(&mut self, filter: Filter) {
        debug!(%filter, "filter changed");
        self.filter = filter;
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Items passing the active filter, in insertion order.
    pub fn visible_items(&self) -> Vec<&WorkItem> {
        self.items
            .iter()
            .filter(|item| self.filter.admits(item.status()))
            .collect()
    }

    /// Visible items grouped by each day of the month containing `reference`.
    ///
    /// Days with no items are skipped. The returned iterator is lazy and can
    /// be cloned to restart it.
    pub fn calendar_grouping(&self, reference: Date) -> CalendarGrouping<'_> {
        CalendarGrouping::new(self.visible_items(), reference)
    }

    /// The whole collection, regardless of filter, in insertion order.
    pub fn snapshot(&self) -> Arc<[WorkItem]> {
        Arc::clone(&self.items)
    }

    pub fn get(&self, id: ItemId) -> Option<&WorkItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Checks required fields in order (title, description, assignee), then the date range.
fn validate(fields: &NewWorkItem) -> core::result::Result<(), ValidationError> {
    let required = [
        (Field::Title, &fields.title),
        (Field::Description, &fields.description),
        (Field::Assignee, &fields.assignee),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ValidationError::MissingField(*field));
    }

    if let (Some(start), Some(end)) = (fields.start_date, fields.end_date)
        && end < start
    {
        return Err(ValidationError::EndBeforeStart { start, end });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;
    use proptest::prelude::*;

    use crate::model::Progress;

    fn new_item(title: &str, assignee: &str) -> NewWorkItem {
        NewWorkItem {
            title: title.into(),
            description: format!("{title} work"),
            assignee: assignee.into(),
            start_date: None,
            end_date: None,
        }
    }

    fn dated(title: &str, assignee: &str, start: Date, end: Date) -> NewWorkItem {
        NewWorkItem {
            start_date: Some(start),
            end_date: Some(end),
            ..new_item(title, assignee)
        }
    }

    fn titles(items: &[&WorkItem]) -> Vec<String> {
        items.iter().map(|item| item.title().to_string()).collect()
    }

    #[test]
    fn add_starts_not_started_at_zero() {
        let mut store = WorkItemStore::new();
        let item = store.add(new_item("Design", "Alice")).unwrap();

        assert_eq!(item.status(), Status::NotStarted);
        assert_eq!(item.progress(), Progress::ZERO);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(item.id()), Some(&item));
    }

    #[test]
    fn add_rejects_missing_fields_in_order() {
        let mut store = WorkItemStore::new();

        let err = store.add(new_item("  ", "")).unwrap_err();
        assert_eq!(
            err,
            StoreError::Validation(ValidationError::MissingField(Field::Title))
        );

        let mut fields = new_item("Design", "Alice");
        fields.description = "\t".into();
        let err = store.add(fields).unwrap_err();
        assert_eq!(
            err,
            StoreError::Validation(ValidationError::MissingField(Field::Description))
        );

        assert!(store.is_empty());
    }

    #[test]
    fn add_rejects_empty_assignee_without_side_effects() {
        let mut store = WorkItemStore::new();
        store.add(new_item("Design", "Alice")).unwrap();
        let before = store.snapshot();

        let err = store.add(new_item("Build", "")).unwrap_err();

        assert_eq!(
            err,
            StoreError::Validation(ValidationError::MissingField(Field::Assignee))
        );
        assert_eq!(err.to_string(), "invalid work item: assignee is required");
        assert_eq!(store.len(), 1);
        assert_eq!(&*store.snapshot(), &*before);
    }

    #[test]
    fn add_rejects_end_before_start() {
        let mut store = WorkItemStore::new();
        let err = store
            .add(dated("Design", "Alice", date(2024, 3, 5), date(2024, 3, 1)))
            .unwrap_err();

        assert_eq!(
            err,
            StoreError::Validation(ValidationError::EndBeforeStart {
                start: date(2024, 3, 5),
                end: date(2024, 3, 1),
            })
        );
        assert!(store.is_empty());
    }

    #[test]
    fn add_accepts_same_day_range() {
        let mut store = WorkItemStore::new();
        let day = date(2024, 3, 5);
        assert!(store.add(dated("Design", "Alice", day, day)).is_ok());
    }

    #[test]
    fn complete_then_reopen_keeps_full_progress() {
        let mut store = WorkItemStore::new();
        let a = store.add(new_item("Design", "Alice")).unwrap();

        store.change_status(a.id(), Status::Completed).unwrap();
        let reopened = store.change_status(a.id(), Status::InProgress).unwrap();

        assert_eq!(reopened.status(), Status::InProgress);
        assert_eq!(reopened.progress(), Progress::COMPLETE);
        assert_eq!(store.get(a.id()), Some(&reopened));
    }

    #[test]
    fn change_status_leaves_other_items_alone() {
        let mut store = WorkItemStore::new();
        let a = store.add(new_item("Design", "Alice")).unwrap();
        let b = store.add(new_item("Build", "Bob")).unwrap();

        store.change_status(a.id(), Status::Completed).unwrap();

        assert_eq!(store.get(b.id()), Some(&b));
    }

    #[test]
    fn change_status_unknown_id_is_not_found() {
        let mut store = WorkItemStore::new();
        store.add(new_item("Design", "Alice")).unwrap();
        let before = store.snapshot();
        let missing = ItemId::generate();

        let err = store.change_status(missing, Status::Completed).unwrap_err();

        assert_eq!(err, StoreError::NotFound(missing));
        assert_eq!(&*store.snapshot(), &*before);
    }

    #[test]
    fn earlier_snapshot_is_unchanged_by_mutation() {
        let mut store = WorkItemStore::new();
        let a = store.add(new_item("Design", "Alice")).unwrap();
        let before = store.snapshot();

        store.change_status(a.id(), Status::Completed).unwrap();
        store.add(new_item("Build", "Bob")).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(before[0].status(), Status::NotStarted);
    }

    #[test]
    fn visible_items_follow_filter_in_insertion_order() {
        let mut store = WorkItemStore::new();
        let a = store.add(new_item("A", "Alice")).unwrap();
        store.add(new_item("B", "Bob")).unwrap();
        let c = store.add(new_item("C", "Carol")).unwrap();
        store.change_status(c.id(), Status::Completed).unwrap();
        store.change_status(a.id(), Status::Completed).unwrap();

        assert_eq!(titles(&store.visible_items()), ["A", "B", "C"]);

        store.set_filter(Filter::Completed);
        assert_eq!(store.filter(), Filter::Completed);
        assert_eq!(titles(&store.visible_items()), ["A", "C"]);

        store.set_filter(Filter::NotStarted);
        assert_eq!(titles(&store.visible_items()), ["B"]);

        store.set_filter(Filter::InProgress);
        assert!(store.visible_items().is_empty());
    }

    #[test]
    fn with_filter_starts_filtered() {
        let mut store = WorkItemStore::with_filter(Filter::Completed);
        store.add(new_item("A", "Alice")).unwrap();
        assert!(store.visible_items().is_empty());
    }

    #[test]
    fn design_and_build_scenario() {
        let mut store = WorkItemStore::new();
        let a = store
            .add(dated("Design", "Alice", date(2024, 3, 1), date(2024, 3, 5)))
            .unwrap();
        store.add(new_item("Build", "Bob")).unwrap();

        assert_eq!(titles(&store.visible_items()), ["Design", "Build"]);

        let days: Vec<CalendarDay<'_>> = store.calendar_grouping(date(2024, 3, 3)).collect();
        let dates: Vec<Date> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, (1..=5).map(|d| date(2024, 3, d)).collect::<Vec<_>>());
        for day in &days {
            assert_eq!(day.items.len(), 1);
            assert_eq!(day.items[0].id(), a.id());
        }
    }

    fn arb_status() -> impl Strategy<Value = Status> {
        prop::sample::select(Status::ALL.to_vec())
    }

    fn arb_filter() -> impl Strategy<Value = Filter> {
        prop::sample::select(vec![
            Filter::All,
            Filter::NotStarted,
            Filter::InProgress,
            Filter::Completed,
        ])
    }

    proptest! {
        #[test]
        fn prop_added_ids_are_unique(n in 1usize..30) {
            let mut store = WorkItemStore::new();
            let mut seen = std::collections::HashSet::new();
            for i in 0..n {
                let item = store.add(new_item(&format!("item {i}"), "Alice")).unwrap();
                prop_assert_eq!(item.status(), Status::NotStarted);
                prop_assert_eq!(item.progress(), Progress::ZERO);
                prop_assert!(seen.insert(item.id()));
            }
            prop_assert_eq!(store.len(), n);
        }

        #[test]
        fn prop_completing_forces_full_progress(
            before in prop::collection::vec(arb_status(), 0..6),
        ) {
            let mut store = WorkItemStore::new();
            let item = store.add(new_item("Design", "Alice")).unwrap();
            for status in before {
                store.change_status(item.id(), status).unwrap();
            }
            let done = store.change_status(item.id(), Status::Completed).unwrap();
            prop_assert_eq!(done.progress(), Progress::COMPLETE);
        }

        #[test]
        fn prop_open_statuses_keep_progress(
            history in prop::collection::vec(arb_status(), 0..6),
            target in prop::sample::select(vec![Status::NotStarted, Status::InProgress]),
        ) {
            let mut store = WorkItemStore::new();
            let item = store.add(new_item("Design", "Alice")).unwrap();
            for status in history {
                store.change_status(item.id(), status).unwrap();
            }
            let before = store.get(item.id()).unwrap().progress();
            let after = store.change_status(item.id(), target).unwrap();
            prop_assert_eq!(after.progress(), before);
        }

        #[test]
        fn prop_visible_items_is_filtered_subsequence(
            statuses in prop::collection::vec(arb_status(), 0..12),
            filter in arb_filter(),
        ) {
            let mut store = WorkItemStore::new();
            for (i, status) in statuses.iter().enumerate() {
                let item = store.add(new_item(&format!("item {i}"), "Alice")).unwrap();
                store.change_status(item.id(), *status).unwrap();
            }
            store.set_filter(filter);

            let expected: Vec<ItemId> = store
                .snapshot()
                .iter()
                .filter(|item| filter.admits(item.status()))
                .map(WorkItem::id)
                .collect();
            let visible: Vec<ItemId> = store.visible_items().iter().map(|item| item.id()).collect();
            prop_assert_eq!(visible, expected);
        }

        #[test]
        fn prop_reversed_range_is_rejected(offset in 1i32..400, existing in 0usize..4) {
            let mut store = WorkItemStore::new();
            for i in 0..existing {
                store.add(new_item(&format!("item {i}"), "Alice")).unwrap();
            }
            let before = store.snapshot();

            let start = date(2024, 1, 1);
            let end = start.checked_sub(jiff::Span::new().days(offset)).unwrap();
            let result = store.add(dated("Late", "Bob", start, end));

            let is_range_error = matches!(
                result,
                Err(StoreError::Validation(ValidationError::EndBeforeStart { .. }))
            );
            prop_assert!(is_range_error);
            prop_assert_eq!(&*store.snapshot(), &*before);
        }
    }
}

//! Output formatting for CLI display.

use jiff::civil::Date;
use serde_json::json;

use taskboard::model::{Progress, WorkItem};
use taskboard::store::CalendarDay;

const BAR_WIDTH: usize = 20;

/// Shown in place of the grid when no item passes the filter.
pub(super) const EMPTY_GRID: &str = "No work items found.";

/// A text progress bar: `[##########----------] 50%`.
pub(super) fn format_progress(progress: Progress) -> String {
    let filled = usize::from(progress.percent()) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {progress}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

fn format_dates(item: &WorkItem) -> Option<String> {
    match (item.start_date(), item.end_date()) {
        (Some(start), Some(end)) if start == end => Some(start.to_string()),
        (Some(start), Some(end)) => Some(format!("{start} → {end}")),
        (Some(start), None) => Some(format!("from {start}")),
        (None, Some(end)) => Some(format!("until {end}")),
        (None, None) => None,
    }
}

/// One item card: title and status badge, description, progress, assignee.
pub(super) fn format_card(item: &WorkItem) -> String {
    let mut lines = vec![
        format!("{}  [{}]  {}", item.id().short(), item.status().label(), item.title()),
    ];
    if !item.description().is_empty() {
        lines.push(format!("  {}", item.description()));
    }
    lines.push(format!("  Progress: {}", format_progress(item.progress())));
    lines.push(format!("  Assignee: {}", item.assignee()));
    if let Some(dates) = format_dates(item) {
        lines.push(format!("  Dates:    {dates}"));
    }
    if item.status().can_mark_complete() {
        lines.push("  (can mark complete)".to_string());
    }
    lines.join("\n")
}

pub(super) fn format_grid(items: &[&WorkItem]) -> String {
    if items.is_empty() {
        return EMPTY_GRID.to_string();
    }
    items
        .iter()
        .map(|item| format_card(item))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub(super) fn format_calendar(month: Date, days: &[CalendarDay<'_>]) -> String {
    let mut out = month.strftime("%B %Y").to_string();
    if days.is_empty() {
        out.push_str("\n  No dated work items this month.");
        return out;
    }
    for day in days {
        let titles = day
            .items
            .iter()
            .map(|item| format!("{} ({})", item.title(), item.status().label()))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("\n  {}  {titles}", day.date.strftime("%a %d")));
    }
    out
}

pub(super) fn grid_json(items: &[&WorkItem]) -> serde_json::Value {
    json!(items)
}

pub(super) fn calendar_json(month: Date, days: &[CalendarDay<'_>]) -> serde_json::Value {
    json!({
        "month": month.strftime("%Y-%m").to_string(),
        "days": days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    use taskboard::model::{NewWorkItem, Status};
    use taskboard::store::WorkItemStore;

    fn store_with_design() -> WorkItemStore {
        let mut store = WorkItemStore::new();
        store
            .add(NewWorkItem {
                title: "Design".into(),
                description: "Sketch the layout".into(),
                assignee: "Alice".into(),
                start_date: Some(date(2024, 3, 1)),
                end_date: Some(date(2024, 3, 5)),
            })
            .unwrap();
        store
    }

    #[test]
    fn progress_bar_scales_to_width() {
        assert_eq!(format_progress(Progress::ZERO), "[--------------------] 0%");
        assert_eq!(format_progress(Progress::new(50).unwrap()), "[##########----------] 50%");
        assert_eq!(format_progress(Progress::COMPLETE), "[####################] 100%");
    }

    #[test]
    fn card_shows_badge_and_fields() {
        let store = store_with_design();
        let item = store.visible_items()[0];

        let card = format_card(item);

        assert!(card.contains("[not started]  Design"));
        assert!(card.contains("  Sketch the layout"));
        assert!(card.contains("  Assignee: Alice"));
        assert!(card.contains("  Dates:    2024-03-01 → 2024-03-05"));
        assert!(card.contains("(can mark complete)"));
    }

    #[test]
    fn completed_card_drops_mark_complete() {
        let mut store = store_with_design();
        let id = store.visible_items()[0].id();
        let item = store.change_status(id, Status::Completed).unwrap();

        let card = format_card(&item);

        assert!(card.contains("[completed]"));
        assert!(card.contains("100%"));
        assert!(!card.contains("can mark complete"));
    }

    #[test]
    fn empty_grid_has_message() {
        assert_eq!(format_grid(&[]), EMPTY_GRID);
    }

    #[test]
    fn calendar_lists_days_under_month_header() {
        let store = store_with_design();
        let days: Vec<_> = store.calendar_grouping(date(2024, 3, 3)).collect();

        let text = format_calendar(date(2024, 3, 1), &days);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "March 2024");
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "  Fri 01  Design (not started)");
    }

    #[test]
    fn empty_calendar_says_so() {
        let text = format_calendar(date(2024, 3, 1), &[]);
        assert_eq!(text, "March 2024\n  No dated work items this month.");
    }

    #[test]
    fn calendar_json_has_month_and_days() {
        let store = store_with_design();
        let days: Vec<_> = store.calendar_grouping(date(2024, 3, 3)).collect();

        let value = calendar_json(date(2024, 3, 1), &days);

        assert_eq!(value["month"], "2024-03");
        assert_eq!(value["days"][0]["date"], "2024-03-01");
        assert_eq!(value["days"][0]["items"][0]["title"], "Design");
    }
}

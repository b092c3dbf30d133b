//! Calendar grouping: visible items bucketed by the days of one month.

use std::iter::FusedIterator;

use jiff::civil::Date;
use serde::Serialize;

use crate::model::WorkItem;

/// One day of the month and every visible item whose range covers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay<'a> {
    pub date: Date,
    pub items: Vec<&'a WorkItem>,
}

/// Lazy walk over the days of a month, yielding only days with items.
///
/// A clone continues independently from the point it was taken, so cloning
/// before iterating gives a second full walk of the month.
#[derive(Debug, Clone)]
pub struct CalendarGrouping<'a> {
    items: Vec<&'a WorkItem>,
    next: Option<Date>,
    last: Date,
}

impl<'a> CalendarGrouping<'a> {
    pub(super) fn new(visible: Vec<&'a WorkItem>, reference: Date) -> Self {
        let first = reference.first_of_month();
        let last = reference.last_of_month();
        // Items that never touch this month can't land on any of its days.
        let items = visible
            .into_iter()
            .filter(|item| overlaps(item, first, last))
            .collect();
        Self {
            items,
            next: Some(first),
            last,
        }
    }
}

impl<'a> Iterator for CalendarGrouping<'a> {
    type Item = CalendarDay<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(day) = self.next {
            self.next = if day < self.last {
                day.tomorrow().ok()
            } else {
                None
            };

            let items: Vec<&'a WorkItem> = self
                .items
                .iter()
                .copied()
                .filter(|item| item.spans(day))
                .collect();
            if !items.is_empty() {
                return Some(CalendarDay { date: day, items });
            }
        }
        None
    }
}

impl FusedIterator for CalendarGrouping<'_> {}

fn overlaps(item: &WorkItem, first: Date, last: Date) -> bool {
    let (start, end) = match (item.start_date(), item.end_date()) {
        (Some(start), Some(end)) => (start, end),
        (Some(only), None) | (None, Some(only)) => (only, only),
        (None, None) => return false,
    };
    start <= last && end >= first
}

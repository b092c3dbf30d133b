//! Draft: the form-side half of adding a work item.
//!
//! A draft collects field values as they're typed and enforces the date
//! picker rules as each date is chosen, so an end date can never sit before
//! the start date. Submitting hands the fields to the store, which runs the
//! full validation again.

use jiff::civil::Date;
use tracing::debug;

use crate::model::{NewWorkItem, WorkItem};
use crate::store::{self, ValidationError, WorkItemStore};

/// Field values for a work item that hasn't been added yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub assignee: String,
    start_date: Option<Date>,
    end_date: Option<Date>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_date(&self) -> Option<Date> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<Date> {
        self.end_date
    }

    /// Picks the start date. An end date earlier than `date` is pulled
    /// forward to `date`.
    pub fn select_start(&mut self, date: Date) {
        debug!(%date, "start date selected");
        self.start_date = Some(date);
        if let Some(end) = self.end_date
            && end < date
        {
            self.end_date = Some(date);
        }
    }

    /// Picks the end date. Refused, leaving the draft untouched, when it
    /// falls before the chosen start date.
    pub fn select_end(&mut self, date: Date) -> Result<(), ValidationError> {
        debug!(%date, "end date selected");
        if let Some(start) = self.start_date
            && date < start
        {
            return Err(ValidationError::EndBeforeStart { start, end: date });
        }
        self.end_date = Some(date);
        Ok(())
    }

    /// The fields as the store expects them.
    pub fn fields(&self) -> NewWorkItem {
        NewWorkItem {
            title: self.title.clone(),
            description: self.description.clone(),
            assignee: self.assignee.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    /// Adds the draft to `store`. The draft is reset on success and kept as
    /// typed on failure.
    pub fn submit(&mut self, store: &mut WorkItemStore) -> store::Result<WorkItem> {
        let item = store.add(self.fields())?;
        *self = Self::default();
        Ok(item)
    }
}

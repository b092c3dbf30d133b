//! Work item types: the unit of tracked work.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{progress::Progress, status::Status};

/// Opaque, session-unique identifier for a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for compact display.
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A single trackable unit of work.
///
/// Only the store creates items and only the store changes them; the
/// fields are read through accessors so nothing else can.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    id: ItemId,
    title: String,
    description: String,
    assignee: String,
    status: Status,
    progress: Progress,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<Date>,
}

impl WorkItem {
    /// Builds a fresh item from already-validated fields.
    pub(crate) fn create(fields: NewWorkItem) -> Self {
        Self {
            id: ItemId::generate(),
            title: fields.title.trim().to_string(),
            description: fields.description.trim().to_string(),
            assignee: fields.assignee.trim().to_string(),
            status: Status::NotStarted,
            progress: Progress::ZERO,
            start_date: fields.start_date,
            end_date: fields.end_date,
        }
    }

    /// Returns a copy with `status` applied. Completing forces progress to 100;
    /// every other status leaves progress where it was.
    pub(crate) fn with_status(&self, status: Status) -> Self {
        let progress = if status == Status::Completed {
            Progress::COMPLETE
        } else {
            self.progress
        };
        Self {
            status,
            progress,
            ..self.clone()
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn assignee(&self) -> &str {
        &self.assignee
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn start_date(&self) -> Option<Date> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<Date> {
        self.end_date
    }

    /// Whether `day` falls within the item's date range, inclusive.
    ///
    /// An item with only one date spans that single day. An item with no
    /// dates spans nothing.
    pub fn spans(&self, day: Date) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= day && day <= end,
            (Some(only), None) | (None, Some(only)) => only == day,
            (None, None) => false,
        }
    }
}

/// Raw field values for a new work item, as collected by a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkItem {
    pub title: String,
    pub description: String,
    pub assignee: String,
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
}

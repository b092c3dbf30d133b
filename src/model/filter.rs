//! Filter: which statuses the grid and calendar show.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::status::{ParseStatusError, Status};

/// View-only predicate over item status. Never stored on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    #[default]
    All,
    NotStarted,
    InProgress,
    Completed,
}

impl Filter {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Whether an item with `status` passes this filter.
    pub fn admits(self, status: Status) -> bool {
        match self {
            Self::All => true,
            Self::NotStarted => status == Status::NotStarted,
            Self::InProgress => status == Status::InProgress,
            Self::Completed => status == Status::Completed,
        }
    }
}

impl From<Status> for Filter {
    fn from(status: Status) -> Self {
        match status {
            Status::NotStarted => Self::NotStarted,
            Status::InProgress => Self::InProgress,
            Status::Completed => Self::Completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "all" {
            return Ok(Self::All);
        }
        s.parse::<Status>().map(Self::from)
    }
}

//! Session replay: a JSON Lines stream of UI events applied to one store.
//!
//! Each non-blank line is a self-describing event tagged by `"event"`:
//!
//! ```text
//! {"event":"add","title":"Design","description":"Wireframes","assignee":"Alice","startDate":"2024-03-01","endDate":"2024-03-05"}
//! {"event":"changeStatus","item":"Design","status":"completed"}
//! {"event":"setFilter","filter":"completed"}
//! {"event":"list"}
//! {"event":"calendar","date":"2024-03-03"}
//! ```
//!
//! Lines starting with `#` are comments. A session owns its store; nothing
//! outlives it.

use std::io::{self, BufRead};

use jiff::civil::Date;
use serde::Deserialize;
use tracing::debug;

use crate::assignee::resolve_assignee;
use crate::config::Config;
use crate::model::{Filter, ItemId, NewWorkItem, Status, WorkItem};
use crate::store::{CalendarDay, StoreError, WorkItemStore};

/// Errors that can occur while reading or applying a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("line {line}: malformed event: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("item reference is empty")]
    EmptyReference,

    #[error("no work item matching '{0}'")]
    UnknownItem(String),

    #[error("'{reference}' is ambiguous: matches {} items: {}", .matches.len(), .matches.join(", "))]
    AmbiguousItem {
        reference: String,
        matches: Vec<String>,
    },
}

impl SessionError {
    /// Whether the session can carry on past this error.
    ///
    /// Rejected operations are reported and skipped; a stream that can't be
    /// read or parsed ends the session.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Parse { .. } | Self::Io(_))
    }
}

pub type Result<T> = core::result::Result<T, SessionError>;

/// A single UI event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Event {
    /// Submit the add-item form. Missing text fields are left empty so the
    /// store can name them.
    Add {
        #[serde(default)]
        title: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        assignee: Option<String>,
        #[serde(default)]
        start_date: Option<Date>,
        #[serde(default)]
        end_date: Option<Date>,
    },

    /// Move an item to a new status.
    /// `item` is a full id, an exact title, or an unambiguous id prefix.
    ChangeStatus { item: String, status: Status },

    /// Change the active filter.
    SetFilter { filter: Filter },

    /// Show the grid of visible items.
    List,

    /// Show the calendar for the month containing `date`.
    Calendar { date: Date },
}

/// What applying an event produced.
#[derive(Debug)]
pub enum Outcome<'a> {
    Added(WorkItem),
    Updated(WorkItem),
    FilterSet(Filter),
    Grid(Vec<&'a WorkItem>),
    Calendar {
        month: Date,
        days: Vec<CalendarDay<'a>>,
    },
}

/// One replayed session: a store plus the config that fills in defaults.
#[derive(Debug)]
pub struct Session {
    store: WorkItemStore,
    config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            store: WorkItemStore::with_filter(config.default_filter),
            config,
        }
    }

    pub fn store(&self) -> &WorkItemStore {
        &self.store
    }

    /// Apply one event. A rejected event leaves the store unchanged.
    pub fn apply(&mut self, event: Event) -> Result<Outcome<'_>> {
        match event {
            Event::Add {
                title,
                description,
                assignee,
                start_date,
                end_date,
            } => {
                let assignee = resolve_assignee(assignee.as_deref(), &self.config);
                let item = self.store.add(NewWorkItem {
                    title,
                    description,
                    assignee: assignee.unwrap_or_default(),
                    start_date,
                    end_date,
                })?;
                Ok(Outcome::Added(item))
            }
            Event::ChangeStatus { item, status } => {
                let id = self.resolve_item(&item)?;
                let item = self.store.change_status(id, status)?;
                Ok(Outcome::Updated(item))
            }
            Event::SetFilter { filter } => {
                self.store.set_filter(filter);
                Ok(Outcome::FilterSet(filter))
            }
            Event::List => Ok(Outcome::Grid(self.store.visible_items())),
            Event::Calendar { date } => Ok(Outcome::Calendar {
                month: date.first_of_month(),
                days: self.store.calendar_grouping(date).collect(),
            }),
        }
    }

    /// Resolve an item reference: full id, exact title, or unambiguous id prefix.
    ///
    /// An exact title wins over an id prefix, so a title never resolves to
    /// some other item whose id happens to start with the same text.
    pub fn resolve_item(&self, reference: &str) -> Result<ItemId> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(SessionError::EmptyReference);
        }

        // A full id is taken as-is; the store reports it if it's unknown.
        if let Ok(id) = reference.parse::<ItemId>() {
            return Ok(id);
        }

        let items = self.store.snapshot();
        let by_title: Vec<&WorkItem> = items
            .iter()
            .filter(|item| item.title() == reference)
            .collect();
        let matches = if by_title.is_empty() {
            items
                .iter()
                .filter(|item| item.id().to_string().starts_with(reference))
                .collect()
        } else {
            by_title
        };

        match matches.as_slice() {
            [] => Err(SessionError::UnknownItem(reference.to_string())),
            [item] => {
                debug!(reference, id = %item.id(), "resolved item reference");
                Ok(item.id())
            }
            many => Err(SessionError::AmbiguousItem {
                reference: reference.to_string(),
                matches: many.iter().map(|item| item.id().short()).collect(),
            }),
        }
    }
}

/// Read events from a JSON Lines stream, numbering lines from 1.
///
/// Blank lines and `#` comments are skipped.
pub fn read_events<R: BufRead>(reader: R) -> impl Iterator<Item = Result<(usize, Event)>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line_no = index + 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(SessionError::Io(e))),
            };
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            Some(
                serde_json::from_str(trimmed)
                    .map(|event| (line_no, event))
                    .map_err(|source| SessionError::Parse {
                        line: line_no,
                        source,
                    }),
            )
        })
}

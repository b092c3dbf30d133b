//! Core data model for taskboard.
//!
//! These types describe a work item and the view state around it:
//! items, their status and progress, and the status filter.

mod filter;
mod item;
mod progress;
mod status;

pub use filter::Filter;
pub use item::{ItemId, NewWorkItem, WorkItem};
pub use progress::Progress;
pub use status::{ParseStatusError, Status};

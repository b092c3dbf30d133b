//! taskboard: an in-memory work item tracker.
//!
//! [`store::WorkItemStore`] owns the items of one session and answers the
//! two views a UI needs: the filtered grid and the month calendar.
//! [`draft::Draft`] holds the form rules for adding an item, and
//! [`session`] replays a stream of UI events for the command line.

pub mod assignee;
pub mod config;
pub mod draft;
pub mod model;
pub mod session;
pub mod store;

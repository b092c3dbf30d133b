//! Assignee resolution for new work items.
//!
//! Rather than requiring an assignee on every add, it is resolved through a chain:
//!
//! 1. the value given with the item
//! 2. `TASKBOARD_ASSIGNEE` env var (set once per shell or agent)
//! 3. `default-assignee` in `~/.taskboard/config.toml`
//!
//! A value given with the item is used as-is, even when blank, so the store
//! can reject it. Blank env or config values fall through. When nothing
//! yields a value the item is added with an empty assignee and the store
//! rejects it.

use std::env;

use crate::config::Config;

/// Environment variable consulted after an explicit assignee.
pub const ASSIGNEE_ENV: &str = "TASKBOARD_ASSIGNEE";

/// Resolve the assignee for a new item from the tiered resolution chain.
pub fn resolve_assignee(explicit: Option<&str>, config: &Config) -> Option<String> {
    let from_env = env::var(ASSIGNEE_ENV).ok();
    resolve_from(explicit, from_env.as_deref(), config)
}

fn resolve_from(explicit: Option<&str>, from_env: Option<&str>, config: &Config) -> Option<String> {
    // 1. Given with the item.
    if let Some(assignee) = explicit {
        return Some(assignee.to_string());
    }

    // 2. TASKBOARD_ASSIGNEE, then 3. config.
    [from_env, config.default_assignee()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(String::from)
}

//! Best-effort load/save of the task list and the display mode.
//!
//! Nothing here fails the caller. Corrupt or missing data loads as the
//! empty/default state, and failed writes are logged and dropped, leaving
//! the in-memory state authoritative for the rest of the session.

use std::collections::HashSet;

use tracing::warn;

use crate::io::store::{KeyValueStore, StoreError};
use crate::model::mode::DisplayMode;
use crate::model::task::Task;

pub const TASKS_KEY: &str = "todo.tasks.v1";
pub const THEME_KEY: &str = "todo.theme.v1";

pub fn save_tasks(store: &mut dyn KeyValueStore, tasks: &[Task]) {
    if let Err(e) = try_save_tasks(store, tasks) {
        warn!(error = %e, key = TASKS_KEY, "could not save tasks");
    }
}

fn try_save_tasks(store: &mut dyn KeyValueStore, tasks: &[Task]) -> Result<(), StoreError> {
    let json = serde_json::to_string(tasks)?;
    store.set(TASKS_KEY, &json)
}

/// Load the task list, or an empty one if it is missing or unreadable.
pub fn load_tasks(store: &dyn KeyValueStore) -> Vec<Task> {
    let raw = match store.get(TASKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(error = %e, key = TASKS_KEY, "could not read tasks");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Option<Vec<Task>>>(&raw) {
        Ok(tasks) => sanitize(tasks.unwrap_or_default()),
        Err(e) => {
            warn!(error = %e, key = TASKS_KEY, "ignoring malformed task data");
            Vec::new()
        }
    }
}

/// Enforce the title and id invariants on data read from disk.
fn sanitize(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(tasks.len());
    for mut task in tasks {
        let title = task.title.trim();
        if title.is_empty() || task.id.is_empty() || !seen.insert(task.id.clone()) {
            warn!(id = %task.id, "dropping invalid stored task");
            continue;
        }
        if title.len() != task.title.len() {
            task.title = title.to_string();
        }
        out.push(task);
    }
    out
}

pub fn save_display_mode(store: &mut dyn KeyValueStore, mode: DisplayMode) {
    let result = serde_json::to_string(&mode)
        .map_err(StoreError::from)
        .and_then(|json| store.set(THEME_KEY, &json));
    if let Err(e) = result {
        warn!(error = %e, key = THEME_KEY, "could not save display mode");
    }
}

/// Load the display mode, defaulting to dark. Accepts a JSON string
/// (`"light"`) as well as the bare word (`light`).
pub fn load_display_mode(store: &dyn KeyValueStore) -> DisplayMode {
    let raw = match store.get(THEME_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return DisplayMode::default(),
        Err(e) => {
            warn!(error = %e, key = THEME_KEY, "could not read display mode");
            return DisplayMode::default();
        }
    };
    serde_json::from_str::<DisplayMode>(&raw)
        .ok()
        .or_else(|| raw.trim().parse().ok())
        .unwrap_or_default()
}

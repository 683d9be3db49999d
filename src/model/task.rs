use serde::{Deserialize, Serialize};

/// A single entry in the task list.
///
/// The serialized shape is the persisted record: `{"id", "title", "completed"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique id, assigned once at creation
    pub id: String,
    /// Display title, never empty or whitespace-only
    pub title: String,
    /// Completion flag
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a new, incomplete task
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            title: title.into(),
            completed: false,
        }
    }

    /// The checkbox shown in list output
    pub fn checkbox(&self) -> &'static str {
        if self.completed { "[x]" } else { "[ ]" }
    }
}

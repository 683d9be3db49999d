use crate::model::mode::FilterMode;
use crate::model::task::Task;

impl FilterMode {
    /// Whether a task belongs to this view
    pub fn matches(self, task: &Task) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Active => !task.completed,
            FilterMode::Completed => task.completed,
        }
    }
}

/// The tasks shown under `mode`, in collection order. Pure projection.
pub fn visible(tasks: &[Task], mode: FilterMode) -> impl Iterator<Item = &Task> {
    tasks.iter().filter(move |t| mode.matches(t))
}

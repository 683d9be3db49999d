use crate::io::persistence::{load_display_mode, load_tasks, save_display_mode, save_tasks};
use crate::io::store::KeyValueStore;
use crate::model::mode::{DisplayMode, FilterMode};
use crate::model::task::Task;
use crate::ops::filter::visible;
use crate::ops::ids::IdGenerator;
use crate::ops::task_ops;

/// The task list and its UI-facing state.
///
/// The single source of truth for a session. Every mutator that changes the
/// collection saves it before returning, and reports whether anything
/// changed so the caller knows whether to re-render.
pub struct TodoList {
    tasks: Vec<Task>,
    filter: FilterMode,
    display_mode: DisplayMode,
    store: Box<dyn KeyValueStore>,
    ids: Box<dyn IdGenerator>,
}

impl TodoList {
    /// Load tasks and display mode from `store`.
    pub fn load(store: Box<dyn KeyValueStore>, ids: Box<dyn IdGenerator>) -> Self {
        let tasks = load_tasks(store.as_ref());
        let display_mode = load_display_mode(store.as_ref());
        TodoList {
            tasks,
            filter: FilterMode::All,
            display_mode,
            store,
            ids,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        task_ops::find_task(&self.tasks, id)
    }

    /// Tasks under the current filter, in list order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        visible(&self.tasks, self.filter).collect()
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter
    }

    pub fn set_filter_mode(&mut self, mode: FilterMode) {
        self.filter = mode;
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn toggle_display_mode(&mut self) -> DisplayMode {
        self.display_mode = self.display_mode.toggled();
        save_display_mode(self.store.as_mut(), self.display_mode);
        self.display_mode
    }

    pub fn remaining_count(&self) -> usize {
        task_ops::remaining_count(&self.tasks)
    }

    pub fn has_completed(&self) -> bool {
        task_ops::has_completed(&self.tasks)
    }

    /// Footer text, e.g. "1 item left" / "3 items left"
    pub fn items_left_label(&self) -> String {
        let remaining = self.remaining_count();
        format!("{} item{} left", remaining, if remaining == 1 { "" } else { "s" })
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Add a task. Switches a Completed view back to All so the new task is
    /// visible.
    pub fn add(&mut self, title: &str) -> Option<String> {
        let id = task_ops::add_task(&mut self.tasks, title, self.ids.as_mut())?;
        self.save();
        if self.filter == FilterMode::Completed {
            self.filter = FilterMode::All;
        }
        Some(id)
    }

    pub fn set_completed(&mut self, id: &str, completed: bool) -> bool {
        let changed = task_ops::set_completed(&mut self.tasks, id, completed);
        self.save_if(changed)
    }

    /// Flip a task's completion flag. Returns false for unknown ids.
    pub fn toggle_completed(&mut self, id: &str) -> bool {
        match self.task(id).map(|t| t.completed) {
            Some(completed) => self.set_completed(id, !completed),
            None => false,
        }
    }

    pub fn rename(&mut self, id: &str, new_title: &str) -> bool {
        let changed = task_ops::rename_task(&mut self.tasks, id, new_title);
        self.save_if(changed)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let changed = task_ops::remove_task(&mut self.tasks, id);
        self.save_if(changed)
    }

    pub fn clear_completed(&mut self) -> bool {
        let changed = task_ops::clear_completed(&mut self.tasks);
        self.save_if(changed)
    }

    pub fn reorder(&mut self, order: &[String]) -> bool {
        let changed = task_ops::reorder_tasks(&mut self.tasks, order);
        self.save_if(changed)
    }

    fn save_if(&mut self, changed: bool) -> bool {
        if changed {
            self.save();
        }
        changed
    }

    fn save(&mut self) {
        save_tasks(self.store.as_mut(), &self.tasks);
    }
}

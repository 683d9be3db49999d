use std::collections::HashMap;

use tracing::{debug, warn};

use crate::model::task::Task;
use crate::ops::ids::IdGenerator;

// Every mutator returns whether the collection changed, so callers can skip
// persistence and re-render work for no-ops. Unknown ids are never errors: the
// UI may race with a deletion.

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn find_task<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    tasks.iter().find(|t| t.id == id)
}

fn find_task_mut<'a>(tasks: &'a mut [Task], id: &str) -> Option<&'a mut Task> {
    tasks.iter_mut().find(|t| t.id == id)
}

/// Number of tasks not yet completed
pub fn remaining_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}

pub fn has_completed(tasks: &[Task]) -> bool {
    tasks.iter().any(|t| t.completed)
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Append a new incomplete task. Returns the new id, or `None` when the
/// trimmed title is empty or `ids` keeps producing ids already in use.
pub fn add_task(tasks: &mut Vec<Task>, title: &str, ids: &mut dyn IdGenerator) -> Option<String> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    let mut id = ids.next_id();
    let mut retries = 0;
    while find_task(tasks, &id).is_some() {
        retries += 1;
        if retries > tasks.len() {
            warn!(%id, retries, "id generator keeps returning taken ids");
            return None;
        }
        id = ids.next_id();
    }
    debug!(%id, "add task");
    tasks.push(Task::new(id.clone(), title));
    Some(id)
}

pub fn set_completed(tasks: &mut [Task], id: &str, completed: bool) -> bool {
    match find_task_mut(tasks, id) {
        Some(task) if task.completed != completed => {
            task.completed = completed;
            debug!(%id, completed, "set completed");
            true
        }
        _ => false,
    }
}

/// Replace a task's title. An empty trimmed title is a cancel.
pub fn rename_task(tasks: &mut [Task], id: &str, new_title: &str) -> bool {
    let new_title = new_title.trim();
    if new_title.is_empty() {
        return false;
    }
    match find_task_mut(tasks, id) {
        Some(task) if task.title != new_title => {
            task.title = new_title.to_string();
            debug!(%id, "rename task");
            true
        }
        _ => false,
    }
}

pub fn remove_task(tasks: &mut Vec<Task>, id: &str) -> bool {
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    let removed = tasks.len() != before;
    if removed {
        debug!(%id, "remove task");
    }
    removed
}

/// Drop every completed task, keeping the rest in order.
pub fn clear_completed(tasks: &mut Vec<Task>) -> bool {
    if !has_completed(tasks) {
        return false;
    }
    let before = tasks.len();
    tasks.retain(|t| !t.completed);
    debug!(cleared = before - tasks.len(), "clear completed");
    true
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Re-sort the collection to follow `order`.
///
/// Tasks named in `order` are laid out in that order across the slots that
/// named tasks occupied before; tasks not named keep their slots. Ids in
/// `order` that are not in the collection are ignored, and a repeated id
/// counts at its first occurrence. No task is ever dropped.
pub fn reorder_tasks(tasks: &mut Vec<Task>, order: &[String]) -> bool {
    let mut rank: HashMap<&str, usize> = HashMap::new();
    for id in order {
        if find_task(tasks, id).is_some() {
            let next = rank.len();
            rank.entry(id.as_str()).or_insert(next);
        }
    }

    let slots: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| rank.contains_key(t.id.as_str()))
        .map(|(i, _)| i)
        .collect();
    let mut named: Vec<Task> = slots.iter().map(|&i| tasks[i].clone()).collect();
    named.sort_by_key(|t| rank[t.id.as_str()]);

    let mut changed = false;
    for (slot, task) in slots.into_iter().zip(named) {
        if tasks[slot].id != task.id {
            tasks[slot] = task;
            changed = true;
        }
    }
    if changed {
        debug!(count = order.len(), "reorder tasks");
    }
    changed
}

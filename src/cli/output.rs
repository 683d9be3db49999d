use serde::Serialize;

use crate::model::{DisplayMode, FilterMode, Task};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub filter: FilterMode,
    pub tasks: Vec<&'a Task>,
    pub items_left: usize,
}

#[derive(Serialize)]
pub struct AddedJson {
    pub id: Option<String>,
}

#[derive(Serialize)]
pub struct ChangedJson {
    pub changed: bool,
}

#[derive(Serialize)]
pub struct ThemeJson {
    pub display_mode: DisplayMode,
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One line per task: `[ ] <id> <title>`
pub fn format_task_line(task: &Task) -> String {
    format!("{} {} {}", task.checkbox(), task.id, task.title)
}

/// Task lines followed by the items-left count
pub fn format_task_list(tasks: &[&Task], items_left: &str) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&format_task_line(task));
        out.push('\n');
    }
    out.push_str(items_left);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_json_shape() {
        let mut done = Task::new("t2", "Walk dog");
        done.completed = true;
        let open = Task::new("t1", "Buy milk");
        let json = ListJson {
            filter: FilterMode::All,
            tasks: vec![&open, &done],
            items_left: 1,
        };
        insta::assert_snapshot!(serde_json::to_string(&json).unwrap(), @r#"{"filter":"all","tasks":[{"id":"t1","title":"Buy milk","completed":false},{"id":"t2","title":"Walk dog","completed":true}],"items_left":1}"#);
    }

    #[test]
    fn task_list_text() {
        let mut done = Task::new("t2", "Walk dog");
        done.completed = true;
        let open = Task::new("t1", "Buy milk");
        let text = format_task_list(&[&open, &done], "1 item left");
        insta::assert_snapshot!(text.trim_end(), @r"
        [ ] t1 Buy milk
        [x] t2 Walk dog
        1 item left
        ");
    }
}

use crate::model::task::Task;

/// Source of fresh task ids, injected into the task list so tests can
/// supply deterministic ones.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 ids (the default for real sessions)
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic ids `t1`, `t2`, ...
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        SequentialIds { next: 1 }
    }

    /// Start numbering after the highest `tN` id already present.
    pub fn after(tasks: &[Task]) -> Self {
        let max = tasks
            .iter()
            .filter_map(|t| t.id.strip_prefix('t')?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        SequentialIds { next: max + 1 }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        if self.next == 0 {
            self.next = 1;
        }
        let id = format!("t{}", self.next);
        self.next += 1;
        id
    }
}

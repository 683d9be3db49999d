pub mod filter;
pub mod ids;
pub mod reorder;
pub mod task_ops;
pub mod todo_list;

pub use todo_list::TodoList;

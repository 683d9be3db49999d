pub mod config;
pub mod mode;
pub mod task;

pub use config::*;
pub use mode::*;
pub use task::*;

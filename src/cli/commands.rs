use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::FilterMode;

#[derive(Parser)]
#[command(name = "tl", about = concat!("tasklist v", env!("CARGO_PKG_VERSION"), " - a small local todo list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the task data (default: $XDG_DATA_HOME/tasklist)
    #[arg(long = "data-dir", global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/tasklist/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks
    List(ListArgs),
    /// Add a task to the end of the list
    Add(AddArgs),
    /// Mark a task completed
    Done(IdArgs),
    /// Mark a task not completed
    Undo(IdArgs),
    /// Change a task's title
    Rename(RenameArgs),
    /// Delete a task
    Rm(IdArgs),
    /// Delete all completed tasks
    Clear,
    /// Put tasks in the given order
    Reorder(ReorderArgs),
    /// Move one task before another, or to the end
    Mv(MvArgs),
    /// Show or toggle the light/dark display mode
    Theme(ThemeCmd),
}

#[derive(Args)]
pub struct ListArgs {
    /// Which tasks to show (all, active, completed)
    #[arg(long, short, default_value = "all")]
    pub filter: FilterMode,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct RenameArgs {
    /// Task ID
    pub id: String,
    /// New title (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,
}

#[derive(Args)]
pub struct ReorderArgs {
    /// Task IDs in the desired order; unlisted tasks keep their slots
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task ID to move
    pub id: String,
    /// Place before this task
    #[arg(long, conflicts_with = "end", required_unless_present = "end")]
    pub before: Option<String>,
    /// Place at the end of the list
    #[arg(long)]
    pub end: bool,
}

#[derive(Args)]
pub struct ThemeCmd {
    #[command(subcommand)]
    pub action: Option<ThemeAction>,
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Switch between light and dark
    Toggle,
}

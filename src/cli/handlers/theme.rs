use std::io::Write;

use crate::cli::commands::{ThemeAction, ThemeCmd};
use crate::cli::output::ThemeJson;
use crate::ops::TodoList;

use super::{CmdResult, write_json};

pub fn cmd_theme(args: ThemeCmd, json: bool, list: &mut TodoList, out: &mut dyn Write) -> CmdResult {
    let display_mode = match args.action {
        Some(ThemeAction::Toggle) => list.toggle_display_mode(),
        None => list.display_mode(),
    };
    if json {
        write_json(out, &ThemeJson { display_mode })
    } else {
        writeln!(out, "{}", display_mode)?;
        Ok(())
    }
}

mod theme;
pub use theme::cmd_theme;

use std::io::Write;

use serde::Serialize;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::ops::TodoList;
use crate::ops::reorder::place;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run one subcommand against `list`, writing results to `out`.
///
/// Unknown ids and blank titles are not errors: the command does nothing
/// and exits successfully.
pub fn dispatch(command: Commands, json: bool, list: &mut TodoList, out: &mut dyn Write) -> CmdResult {
    match command {
        // Read commands
        Commands::List(args) => cmd_list(args, json, list, out),

        // Write commands
        Commands::Add(args) => cmd_add(args, json, list, out),
        Commands::Done(args) => {
            let changed = list.set_completed(&args.id, true);
            report_changed(changed, json, out)
        }
        Commands::Undo(args) => {
            let changed = list.set_completed(&args.id, false);
            report_changed(changed, json, out)
        }
        Commands::Rename(args) => {
            let changed = list.rename(&args.id, &args.title.join(" "));
            report_changed(changed, json, out)
        }
        Commands::Rm(args) => {
            let changed = list.remove(&args.id);
            report_changed(changed, json, out)
        }
        Commands::Clear => {
            let changed = list.clear_completed();
            report_changed(changed, json, out)
        }
        Commands::Reorder(args) => {
            let changed = list.reorder(&args.ids);
            report_changed(changed, json, out)
        }
        Commands::Mv(args) => cmd_mv(args, json, list, out),

        Commands::Theme(args) => cmd_theme(args, json, list, out),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> CmdResult {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Mutations are silent in text mode; JSON mode reports whether anything changed.
fn report_changed(changed: bool, json: bool, out: &mut dyn Write) -> CmdResult {
    if json {
        write_json(out, &ChangedJson { changed })?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, json: bool, list: &mut TodoList, out: &mut dyn Write) -> CmdResult {
    list.set_filter_mode(args.filter);
    let tasks = list.visible_tasks();
    if json {
        write_json(
            out,
            &ListJson {
                filter: args.filter,
                tasks,
                items_left: list.remaining_count(),
            },
        )
    } else {
        write!(out, "{}", format_task_list(&tasks, &list.items_left_label()))?;
        Ok(())
    }
}

fn cmd_add(args: AddArgs, json: bool, list: &mut TodoList, out: &mut dyn Write) -> CmdResult {
    let id = list.add(&args.title.join(" "));
    if json {
        return write_json(out, &AddedJson { id });
    }
    if let Some(id) = id {
        writeln!(out, "{}", id)?;
    }
    Ok(())
}

fn cmd_mv(args: MvArgs, json: bool, list: &mut TodoList, out: &mut dyn Write) -> CmdResult {
    let order: Vec<String> = list.tasks().iter().map(|t| t.id.clone()).collect();
    let before = if args.end { None } else { args.before.as_deref() };
    let known = |id: &str| order.iter().any(|o| o == id);

    let changed = if known(&args.id) && before.is_none_or(known) {
        let new_order = place(&order, &args.id, before);
        list.reorder(&new_order)
    } else {
        false
    };
    report_changed(changed, json, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;
    use crate::model::FilterMode;
    use crate::ops::ids::SequentialIds;

    fn list_with(titles: &[&str]) -> TodoList {
        let mut list = TodoList::load(Box::new(MemoryStore::new()), Box::new(SequentialIds::new()));
        for title in titles {
            list.add(title);
        }
        list
    }

    fn run(list: &mut TodoList, command: Commands, json: bool) -> String {
        let mut out = Vec::new();
        dispatch(command, json, list, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn titles(list: &TodoList) -> Vec<&str> {
        list.tasks().iter().map(|t| t.title.as_str()).collect()
    }

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn add_joins_words_and_prints_id() {
        let mut list = list_with(&[]);
        let out = run(
            &mut list,
            Commands::Add(AddArgs {
                title: ids(&["Buy", "milk"]),
            }),
            false,
        );
        assert_eq!(out, "t1\n");
        assert_eq!(titles(&list), vec!["Buy milk"]);
    }

    #[test]
    fn blank_add_is_silent() {
        let mut list = list_with(&[]);
        let out = run(&mut list, Commands::Add(AddArgs { title: ids(&["  "]) }), false);
        assert_eq!(out, "");
        assert!(list.tasks().is_empty());
    }

    #[test]
    fn list_filters_and_counts() {
        let mut list = list_with(&["A", "B"]);
        list.set_completed("t1", true);
        let out = run(
            &mut list,
            Commands::List(ListArgs {
                filter: FilterMode::Active,
            }),
            false,
        );
        assert_eq!(out, "[ ] t2 B\n1 item left\n");
    }

    #[test]
    fn list_json() {
        let mut list = list_with(&["A"]);
        let out = run(
            &mut list,
            Commands::List(ListArgs {
                filter: FilterMode::All,
            }),
            true,
        );
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["filter"], "all");
        assert_eq!(value["items_left"], 1);
        assert_eq!(value["tasks"][0]["title"], "A");
    }

    #[test]
    fn done_undo_and_clear() {
        let mut list = list_with(&["A", "B"]);
        run(&mut list, Commands::Done(IdArgs { id: "t1".into() }), false);
        assert!(list.task("t1").unwrap().completed);
        run(&mut list, Commands::Undo(IdArgs { id: "t1".into() }), false);
        assert!(!list.task("t1").unwrap().completed);
        run(&mut list, Commands::Done(IdArgs { id: "t2".into() }), false);
        let out = run(&mut list, Commands::Clear, true);
        assert!(out.contains("\"changed\": true"));
        assert_eq!(titles(&list), vec!["A"]);
    }

    #[test]
    fn missing_id_reports_unchanged() {
        let mut list = list_with(&["A"]);
        let out = run(&mut list, Commands::Rm(IdArgs { id: "nope".into() }), true);
        assert!(out.contains("\"changed\": false"));
        assert_eq!(titles(&list), vec!["A"]);
    }

    #[test]
    fn rename_trims() {
        let mut list = list_with(&["A"]);
        run(
            &mut list,
            Commands::Rename(RenameArgs {
                id: "t1".into(),
                title: ids(&["", "New", " "]),
            }),
            false,
        );
        assert_eq!(titles(&list), vec!["New"]);
    }

    #[test]
    fn reorder_and_mv() {
        let mut list = list_with(&["A", "B", "C"]);
        run(&mut list, Commands::Reorder(ReorderArgs { ids: ids(&["t3", "t1"]) }), false);
        assert_eq!(titles(&list), vec!["C", "B", "A"]);

        let mv = |id: &str, before: Option<&str>, end: bool| {
            Commands::Mv(MvArgs {
                id: id.into(),
                before: before.map(String::from),
                end,
            })
        };
        run(&mut list, mv("t1", Some("t3"), false), false);
        assert_eq!(titles(&list), vec!["A", "C", "B"]);
        run(&mut list, mv("t1", None, true), false);
        assert_eq!(titles(&list), vec!["C", "B", "A"]);
        // Unknown target is a no-op rather than a move to the end
        run(&mut list, mv("t3", Some("zzz"), false), false);
        assert_eq!(titles(&list), vec!["C", "B", "A"]);
    }
}

use clap::Parser;
use tasklist::cli::commands::Cli;
use tasklist::cli::handlers;
use tasklist::io::config_io::{default_config_path, read_config, resolve_data_dir};
use tasklist::io::store::FileStore;
use tasklist::logging;
use tasklist::model::Config;
use tasklist::ops::TodoList;
use tasklist::ops::ids::UuidIds;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = read_config(&config_path);
    let data_dir = match &config {
        Ok(config) => resolve_data_dir(cli.data_dir.as_deref(), config),
        Err(_) => resolve_data_dir(cli.data_dir.as_deref(), &Config::default()),
    };

    match cli.command {
        None => logging::install_file(&data_dir),
        Some(_) => logging::install_stderr(),
    }
    // Reported once a subscriber exists; a broken config never stops the program
    let config = config.unwrap_or_else(|e| {
        tracing::warn!("{}; using defaults", e);
        Config::default()
    });

    tracing::debug!(data_dir = %data_dir.display(), "opening task store");
    let mut list = TodoList::load(Box::new(FileStore::new(&data_dir)), Box::new(UuidIds));

    match cli.command {
        // No subcommand → launch TUI
        None => tasklist::tui::run(list, config.ui),
        Some(command) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            handlers::dispatch(command, cli.json, &mut list, &mut out)
        }
    }
}

//! Academic records manager CLI.
//!
//! Opens (or creates) the store, then runs the interactive menus on
//! stdin/stdout until the operator exits or input ends.

use academic_core::{default_log_level, ensure_schema, init_logging, logging_status};
use clap::Parser;
use log::info;
use std::error::Error;
use std::io;

mod actions;
mod config;
mod console;
mod menu;

use actions::Repos;
use config::Cli;
use console::Console;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        init_logging(level, log_dir)?;
        if let Some((active_level, active_dir)) = logging_status() {
            info!(
                "event=app_start module=cli status=ok level={active_level} log_dir={}",
                active_dir.display()
            );
        }
    }

    let store = ensure_schema(&cli.db)?;
    let repos = Repos::try_new(&store)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    let mut console = Console::new(&mut input, &mut output);

    let outcome = actions::main_menu().run(&repos, &mut console)?;
    info!("event=app_exit module=cli status=ok outcome={outcome:?}");
    Ok(())
}

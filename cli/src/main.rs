//! `project-builder` command-line entry point.
use anyhow::Result;
use clap::Parser;

use project_builder::cli::Cli;
use project_builder::commands;
use project_builder::logging::{self, Log as _, Logger};
use project_builder::settings::location::resolve_settings_dir;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let settings_dir = resolve_settings_dir(args.global.settings_dir.as_deref());
    let command = args.command.name();

    let log_file = commands::log_file(&args.command, &settings_dir);
    logging::init_subscriber(args.verbose, log_file.as_deref(), command);
    let log = Logger::new(log_file);

    let result = commands::run(&args.command, &settings_dir, &log, &mut std::io::stdout().lock());
    if let Err(err) = &result {
        log.debug(&format!("{command} failed: {err:#}"));
        if let Some(path) = log.log_path() {
            log.info(&format!("full log: {}", path.display()));
        }
    }
    result
}

//! Top-level subcommand orchestration.
//!
//! Every command that touches settings goes through [`CommandSetup`], which
//! loads the state, warns about unusable project paths and, once the command
//! body has run, flushes the whole mapping back to disk.
pub mod edit;
pub mod paths;
pub mod show;
pub mod version;
pub mod window;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::Command;
use crate::logging::{Log, log_file_path};
use crate::paths::Project;
use crate::settings::BuilderState;
use crate::settings::location::settings_file;

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Loaded settings.
    pub state: BuilderState,
}

impl CommandSetup {
    /// Open the settings directory and report project-path problems.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the settings file
    /// cannot be read, or a stored window placement is not a known name.
    pub fn init(settings_dir: &Path, log: &dyn Log) -> Result<Self> {
        log.stage("Loading settings");
        let state = BuilderState::open(settings_dir)?;
        log.debug(&format!("settings file: {}", state.settings_file().display()));
        log.debug(&format!("{} stored entries", state.entries().len()));

        let unrecognised = state.unrecognised_entries().count();
        if unrecognised > 0 {
            log.debug(&format!("{unrecognised} unrecognised entries kept as-is"));
        }

        let paths = state.project_paths();
        if !paths.is_valid() {
            let names = paths
                .invalid_projects()
                .map(Project::label)
                .collect::<Vec<_>>()
                .join(", ");
            log.warn(&format!("project paths need attention: {names}"));
            log.warn("run `project-builder configure` to set them");
        }

        Ok(Self { state })
    }

    /// Write the mapping back to the settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be written.
    pub fn finish(&self, log: &dyn Log) -> Result<()> {
        log.debug(&format!(
            "writing {} entries to {}",
            self.state.entries().len(),
            self.state.settings_file().display()
        ));
        self.state.write_state()?;
        Ok(())
    }
}

/// Log file for `command`, creating `<settings_dir>/logs/` as needed.
///
/// Commands that do not load settings keep no log file, so they leave the
/// settings directory untouched.
#[must_use]
pub fn log_file(command: &Command, settings_dir: &Path) -> Option<PathBuf> {
    if !command.loads_settings() {
        return None;
    }
    log_file_path(settings_dir, command.name())
}

/// Dispatch `command`, writing user-facing output to `out`.
///
/// Commands that load settings always flush them afterwards, even when the
/// command itself fails; the command's error takes precedence.
///
/// # Errors
///
/// Returns an error if setup, the command, or the final flush fails.
pub fn run(
    command: &Command,
    settings_dir: &Path,
    log: &dyn Log,
    out: &mut dyn Write,
) -> Result<()> {
    if !command.loads_settings() {
        return match command {
            Command::Path => {
                writeln!(out, "{}", settings_file(settings_dir).display())?;
                Ok(())
            }
            _ => version::run(out),
        };
    }

    let mut setup = CommandSetup::init(settings_dir, log)?;
    let state = &mut setup.state;
    let result = match command {
        Command::Show(opts) => show::run(state, opts, out),
        Command::Get { key } => show::get(state, key, out),
        Command::Set { key, value } => edit::set(state, key, value, log),
        Command::Unset { key } => edit::unset(state, key, log),
        Command::Paths => paths::check(state, log, out),
        Command::Configure(opts) => paths::configure(state, opts, log, out),
        Command::Window(opts) => window::run(state, opts, log, out),
        Command::Version | Command::Path => Ok(()),
    };

    let flushed = setup.finish(log);
    result?;
    flushed
}

//! Commands: `paths` and `configure`.
use std::io::Write;

use anyhow::{Context as _, Result};

use super::show::write_path_statuses;
use crate::cli::ConfigureOpts;
use crate::logging::Log;
use crate::paths::ProjectPaths;
use crate::settings::value::ensure_storable;
use crate::settings::{BuilderState, keys};

/// Report the three project paths; fail unless every one is valid.
///
/// # Errors
///
/// Returns an error naming every project whose path lacks a `gradlew`
/// marker, or if `out` cannot be written.
pub fn check(state: &BuilderState, log: &dyn Log, out: &mut dyn Write) -> Result<()> {
    log.stage("Validating project paths");
    let paths = state.project_paths();
    write_path_statuses(out, paths.statuses())?;
    paths.ensure_valid()?;
    log.info("all project paths are valid");
    Ok(())
}

/// Save the three project paths, refusing invalid ones unless forced.
///
/// Paths that are not given keep their current value. The candidate set is
/// validated as a whole before anything is stored.
///
/// # Errors
///
/// Returns an error if a path cannot be stored in the settings file (even
/// with `force`), if any candidate path is invalid and `force` is not set, or
/// if `out` cannot be written.
pub fn configure(
    state: &mut BuilderState,
    opts: &ConfigureOpts,
    log: &dyn Log,
    out: &mut dyn Write,
) -> Result<()> {
    log.stage("Configuring project paths");
    let storyteller_sdk_kotlin = opts
        .storyteller_sdk_kotlin
        .clone()
        .unwrap_or_else(|| state.storyteller_sdk_kotlin());
    let showcase = opts.showcase.clone().unwrap_or_else(|| state.showcase());
    let nba = opts.nba.clone().unwrap_or_else(|| state.nba());

    ensure_storable(keys::STORYTELLER_SDK_KOTLIN, &storyteller_sdk_kotlin)?;
    ensure_storable(keys::SHOWCASE, &showcase)?;
    ensure_storable(keys::NBA, &nba)?;

    let candidate = ProjectPaths::new(state.directory(), &storyteller_sdk_kotlin, &showcase, &nba);
    write_path_statuses(out, candidate.statuses())?;

    if opts.force {
        if let Err(err) = candidate.ensure_valid() {
            log.warn(&format!("saving anyway: {err}"));
        }
    } else {
        candidate
            .ensure_valid()
            .context("project paths not saved (use --force to save anyway)")?;
    }

    state.save_project_paths(&storyteller_sdk_kotlin, &showcase, &nba)?;
    log.info("project paths saved");
    Ok(())
}

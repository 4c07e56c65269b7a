//! Commands: `show` and `get`.
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::window::describe_geometry;
use crate::cli::ShowOpts;
use crate::error::SettingsError;
use crate::paths::ProjectPathStatus;
use crate::settings::state::SettingView;
use crate::settings::{BuilderState, WindowGeometry, WindowPosition};

/// Everything `show --json` prints.
#[derive(Debug, Serialize)]
struct ShowReport<'a> {
    settings_file: &'a Path,
    settings: Vec<SettingView>,
    unrecognised: Vec<RawEntry<'a>>,
    project_paths: PathsReport<'a>,
    window: WindowReport,
}

#[derive(Debug, Serialize)]
struct RawEntry<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct PathsReport<'a> {
    valid: bool,
    projects: &'a [ProjectPathStatus],
}

#[derive(Debug, Serialize)]
struct WindowReport {
    #[serde(flatten)]
    geometry: WindowGeometry,
    position: WindowPosition,
}

impl<'a> ShowReport<'a> {
    fn new(state: &'a BuilderState) -> Self {
        let geometry = state.window_geometry();
        Self {
            settings_file: state.settings_file(),
            settings: state.settings(),
            unrecognised: state
                .unrecognised_entries()
                .map(|(key, value)| RawEntry { key, value })
                .collect(),
            project_paths: PathsReport {
                valid: state.project_paths().is_valid(),
                projects: state.project_paths().statuses(),
            },
            window: WindowReport {
                geometry,
                position: geometry.position(),
            },
        }
    }
}

/// Print every setting, the project-path validity and the window geometry.
///
/// # Errors
///
/// Returns an error if `out` cannot be written or the report cannot be
/// serialized.
pub fn run(state: &BuilderState, opts: &ShowOpts, out: &mut dyn Write) -> Result<()> {
    let report = ShowReport::new(state);
    if opts.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Settings file: {}", report.settings_file.display())?;
    writeln!(out)?;
    writeln!(out, "Settings:")?;
    let width = report
        .settings
        .iter()
        .map(|view| view.key.len())
        .max()
        .unwrap_or(0);
    for view in &report.settings {
        let marker = if view.stored { "" } else { " (default)" };
        writeln!(
            out,
            "  {:<width$}  {}{marker}",
            view.key,
            escape_newlines(&view.value)
        )?;
    }

    if !report.unrecognised.is_empty() {
        writeln!(out)?;
        writeln!(out, "Unrecognised entries:")?;
        for entry in &report.unrecognised {
            writeln!(out, "  {}  {}", entry.key, escape_newlines(entry.value))?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Project paths:")?;
    write_path_statuses(out, report.project_paths.projects)?;

    writeln!(out)?;
    writeln!(out, "Window: {}", describe_geometry(&report.window.geometry))?;
    Ok(())
}

/// Print the current value of one setting.
///
/// # Errors
///
/// Returns [`SettingsError::UnknownKey`] if `key` is neither recognised nor
/// stored, or an error if `out` cannot be written.
pub fn get(state: &BuilderState, key: &str, out: &mut dyn Write) -> Result<()> {
    let value = state
        .get_raw(key)
        .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
    writeln!(out, "{value}")?;
    Ok(())
}

/// Print one line per project: validity, label, and the probed directory.
pub(crate) fn write_path_statuses(
    out: &mut dyn Write,
    statuses: &[ProjectPathStatus],
) -> std::io::Result<()> {
    let width = statuses
        .iter()
        .map(|status| status.project.label().len())
        .max()
        .unwrap_or(0);
    for status in statuses {
        let mark = if status.valid { "ok" } else { "invalid" };
        let location = status.resolved.as_ref().map_or_else(
            || "(not configured)".to_string(),
            |path| path.display().to_string(),
        );
        writeln!(
            out,
            "  {mark:<7}  {:<width$}  {location}",
            status.project.label()
        )?;
    }
    Ok(())
}

fn escape_newlines(value: &str) -> String {
    value.replace('\n', "\\n")
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::settings::{SettingsMap, keys};

    fn state_with(pairs: &[(&str, &str)]) -> BuilderState {
        let entries: SettingsMap = pairs.iter().copied().collect();
        BuilderState::from_entries(Path::new("/nonexistent/base"), entries)
            .expect("entries should bind")
    }

    fn render(state: &BuilderState, json: bool) -> String {
        let mut out = Vec::new();
        run(state, &ShowOpts { json }, &mut out).expect("show");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn text_marks_defaults_and_escapes_newlines() {
        let state = state_with(&[(keys::NBA, "a\nb"), ("LEGACY", "1")]);
        let text = render(&state, false);
        assert!(text.contains("NBA                     a\\nb\n"));
        assert!(text.contains("SHOW_DEX                true (default)\n"));
        assert!(text.contains("Unrecognised entries:\n  LEGACY  1\n"));
        assert!(text.contains("Window: 1900x1600, centered, Floating\n"));
    }

    #[test]
    fn text_lists_project_paths() {
        let state = state_with(&[(keys::SHOWCASE, "showcase")]);
        let text = render(&state, false);
        assert!(text.contains("  invalid  storyteller-sdk-kotlin        (not configured)\n"));
        assert!(text.contains("  invalid  storyteller-showcase-android  /nonexistent/base/showcase\n"));
    }

    #[test]
    fn json_report_shape() {
        let state = state_with(&[(keys::INDENT, "2"), (keys::WINDOW_X, "5"), (keys::WINDOW_Y, "6")]);
        let value: serde_json::Value =
            serde_json::from_str(&render(&state, true)).expect("valid JSON");

        assert_eq!(value["settings_file"], "/nonexistent/base/settings");
        assert_eq!(value["project_paths"]["valid"], false);
        assert_eq!(value["project_paths"]["projects"][2]["project"], "nba");
        assert_eq!(value["window"]["width"], 1900);
        assert_eq!(value["window"]["placement"], "Floating");
        assert_eq!(value["window"]["position"]["kind"], "absolute");
        assert_eq!(value["window"]["position"]["x"], 5);

        let indent = value["settings"]
            .as_array()
            .expect("settings array")
            .iter()
            .find(|view| view["key"] == "INDENT")
            .expect("INDENT listed");
        assert_eq!(indent["value"], "2");
        assert_eq!(indent["stored"], true);
    }

    #[test]
    fn get_known_unknown_and_missing() {
        let state = state_with(&[("LEGACY", "kept")]);
        let mut out = Vec::new();
        get(&state, keys::WINDOW_WIDTH, &mut out).expect("known key");
        get(&state, "LEGACY", &mut out).expect("stored key");
        assert_eq!(String::from_utf8(out).expect("utf-8"), "1900\nkept\n");

        let err = get(&state, "MISSING", &mut Vec::new()).expect_err("unknown key");
        assert_eq!(err.to_string(), "Unknown setting 'MISSING'");
    }
}

//! Command: show or change the saved window geometry.
use std::io::Write;

use anyhow::Result;

use crate::cli::WindowOpts;
use crate::error::SettingsError;
use crate::logging::Log;
use crate::settings::{BuilderState, WindowGeometry, WindowPlacement, WindowPosition, keys};

/// One-line description such as `1280x800 at (20, 10), Fullscreen`.
#[must_use]
pub fn describe_geometry(geometry: &WindowGeometry) -> String {
    let position = match geometry.position() {
        WindowPosition::Centered => "centered".to_string(),
        WindowPosition::Absolute { x, y } => format!("at ({x}, {y})"),
    };
    format!(
        "{}x{}, {position}, {}",
        geometry.width, geometry.height, geometry.placement
    )
}

/// Apply any given options, then print the resulting geometry.
///
/// # Errors
///
/// Returns an error if a size is not positive, the placement is not a known
/// name, or `out` cannot be written.
pub fn run(
    state: &mut BuilderState,
    opts: &WindowOpts,
    log: &dyn Log,
    out: &mut dyn Write,
) -> Result<()> {
    if !opts.is_empty() {
        let geometry = apply(state.window_geometry(), opts)?;
        state.set_window_geometry(geometry);
        log.info(&format!("window: {}", describe_geometry(&geometry)));
    }
    writeln!(out, "{}", describe_geometry(&state.window_geometry()))?;
    Ok(())
}

fn apply(mut geometry: WindowGeometry, opts: &WindowOpts) -> Result<WindowGeometry, SettingsError> {
    if let Some(width) = opts.width {
        geometry.width = positive(keys::WINDOW_WIDTH, width)?;
    }
    if let Some(height) = opts.height {
        geometry.height = positive(keys::WINDOW_HEIGHT, height)?;
    }
    if let Some(x) = opts.x {
        geometry.x = x;
    }
    if let Some(y) = opts.y {
        geometry.y = y;
    }
    if let Some(placement) = &opts.placement {
        geometry.placement = placement.parse::<WindowPlacement>()?;
    }
    Ok(geometry)
}

fn positive(key: &str, value: i32) -> Result<i32, SettingsError> {
    if value > 0 {
        Ok(value)
    } else {
        Err(SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: "a positive integer",
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::BufferedLog;
    use crate::settings::SettingsMap;
    use std::path::Path;

    fn fresh_state() -> BuilderState {
        BuilderState::from_entries(Path::new("/base"), SettingsMap::new()).expect("bind")
    }

    fn opts() -> WindowOpts {
        WindowOpts {
            width: None,
            height: None,
            x: None,
            y: None,
            placement: None,
        }
    }

    #[test]
    fn describe_centered_and_absolute() {
        let mut geometry = fresh_state().window_geometry();
        assert_eq!(describe_geometry(&geometry), "1900x1600, centered, Floating");
        geometry.x = 20;
        geometry.y = 10;
        geometry.placement = WindowPlacement::Maximized;
        assert_eq!(describe_geometry(&geometry), "1900x1600, at (20, 10), Maximized");
    }

    #[test]
    fn report_only_leaves_mapping_untouched() {
        let mut state = fresh_state();
        let log = BufferedLog::new();
        let mut out = Vec::new();
        run(&mut state, &opts(), &log, &mut out).expect("report");
        assert_eq!(String::from_utf8(out).expect("utf-8"), "1900x1600, centered, Floating\n");
        assert!(state.entries().is_empty());
        assert!(log.entries().is_empty());
    }

    #[test]
    fn partial_update_keeps_other_fields() {
        let mut state = fresh_state();
        let log = BufferedLog::new();
        let update = WindowOpts {
            width: Some(1280),
            placement: Some("Fullscreen".to_string()),
            ..opts()
        };
        run(&mut state, &update, &log, &mut Vec::new()).expect("update");

        assert_eq!(state.window_width(), 1280);
        assert_eq!(state.window_height(), 1600);
        assert_eq!(state.window_placement(), WindowPlacement::Fullscreen);
        assert_eq!(state.entries().get(keys::WINDOW_X), Some("-1"));
    }

    #[test]
    fn rejects_non_positive_size() {
        let mut state = fresh_state();
        let update = WindowOpts {
            height: Some(0),
            ..opts()
        };
        let err = run(&mut state, &update, &BufferedLog::new(), &mut Vec::new())
            .expect_err("zero height");
        assert_eq!(
            err.to_string(),
            "Invalid value '0' for WINDOW_HEIGHT: expected a positive integer"
        );
        assert!(state.entries().is_empty());
    }

    #[test]
    fn rejects_unknown_placement() {
        let mut state = fresh_state();
        let update = WindowOpts {
            placement: Some("Docked".to_string()),
            ..opts()
        };
        let err = run(&mut state, &update, &BufferedLog::new(), &mut Vec::new())
            .expect_err("unknown placement");
        assert!(err.to_string().starts_with("Invalid window placement 'Docked'"));
    }
}

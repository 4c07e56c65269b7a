//! Commands: `set` and `unset`.
use anyhow::Result;

use crate::logging::Log;
use crate::settings::BuilderState;

/// Assign a recognised setting from its textual form.
///
/// # Errors
///
/// Returns an error if `key` is not recognised or `value` does not parse as
/// the setting's type.
pub fn set(state: &mut BuilderState, key: &str, value: &str, log: &dyn Log) -> Result<()> {
    state.set_raw(key, value)?;
    log.info(&format!("{key} set to {value:?}"));
    Ok(())
}

/// Remove a setting; recognised settings fall back to their default.
///
/// # Errors
///
/// Returns an error if `key` is neither recognised nor stored.
pub fn unset(state: &mut BuilderState, key: &str, log: &dyn Log) -> Result<()> {
    state.unset(key)?;
    match state.get_raw(key) {
        Some(default) => log.info(&format!("{key} reset to default {default:?}")),
        None => log.info(&format!("{key} removed")),
    }
    Ok(())
}

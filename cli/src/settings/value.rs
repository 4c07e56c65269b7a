//! Conversion between typed setting values and their stored strings.
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SettingsError;

/// A type that can be stored as a single settings entry.
///
/// Two parsers exist because stored values and user input are treated
/// differently: [`decode`](Self::decode) is lenient and reports "use the
/// default" for unusable integers, while [`parse_input`](Self::parse_input)
/// rejects anything that is not a well-formed value.
pub trait SettingValue: Clone + PartialEq + fmt::Debug {
    /// Human-readable description of accepted values, used in errors.
    const EXPECTED: &'static str;

    /// Decode a stored value. `Ok(None)` means the default applies.
    ///
    /// # Errors
    ///
    /// Returns an error only for types without a fallback (window placement).
    fn decode(raw: &str) -> Result<Option<Self>, SettingsError>;

    /// Parse a value supplied by the user for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidValue`] or
    /// [`SettingsError::InvalidPlacement`] if `raw` is not acceptable.
    fn parse_input(key: &str, raw: &str) -> Result<Self, SettingsError>;

    /// Render the value as it is written to the settings file.
    fn encode(&self) -> String;
}

impl SettingValue for String {
    const EXPECTED: &'static str = "text not ending in '\\' and without carriage returns";

    fn decode(raw: &str) -> Result<Option<Self>, SettingsError> {
        Ok(Some(raw.to_string()))
    }

    fn parse_input(key: &str, raw: &str) -> Result<Self, SettingsError> {
        ensure_storable(key, raw)?;
        Ok(raw.to_string())
    }

    fn encode(&self) -> String {
        self.clone()
    }
}

impl SettingValue for bool {
    const EXPECTED: &'static str = "true or false";

    /// Only `true` (any case) reads as `true`; everything else is `false`.
    fn decode(raw: &str) -> Result<Option<Self>, SettingsError> {
        Ok(Some(raw.eq_ignore_ascii_case("true")))
    }

    fn parse_input(key: &str, raw: &str) -> Result<Self, SettingsError> {
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(invalid_value::<Self>(key, raw))
        }
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

impl SettingValue for i32 {
    const EXPECTED: &'static str = "an integer";

    fn decode(raw: &str) -> Result<Option<Self>, SettingsError> {
        Ok(raw.parse().ok())
    }

    fn parse_input(key: &str, raw: &str) -> Result<Self, SettingsError> {
        raw.trim()
            .parse()
            .map_err(|_| invalid_value::<Self>(key, raw))
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

/// Check that `raw` survives a save and reload of the settings file.
///
/// A trailing `\` would swallow the next line on load, and `\r` is lost
/// when lines are split.
///
/// # Errors
///
/// Returns [`SettingsError::InvalidValue`] if `raw` ends in `\` or contains
/// `\r`.
///
/// # Examples
///
/// ```
/// use project_builder::settings::value::ensure_storable;
///
/// assert!(ensure_storable("SHOWCASE", "C:\\work\\showcase").is_ok());
/// assert!(ensure_storable("SHOWCASE", "C:\\work\\showcase\\").is_err());
/// ```
pub fn ensure_storable(key: &str, raw: &str) -> Result<(), SettingsError> {
    if raw.ends_with('\\') || raw.contains('\r') {
        return Err(invalid_value::<String>(key, raw));
    }
    Ok(())
}

fn invalid_value<T: SettingValue>(key: &str, raw: &str) -> SettingsError {
    SettingsError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
        expected: T::EXPECTED,
    }
}

/// How the main window is placed on screen.
///
/// Stored by exact variant name; any other stored name is an error rather
/// than a silent reset.
///
/// # Examples
///
/// ```
/// use project_builder::settings::value::WindowPlacement;
///
/// let placement: WindowPlacement = "Maximized".parse().unwrap();
/// assert_eq!(placement, WindowPlacement::Maximized);
/// assert!("maximized".parse::<WindowPlacement>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WindowPlacement {
    /// A normal, freely positioned window.
    #[default]
    Floating,
    /// Maximized to the screen's work area.
    Maximized,
    /// Covering the whole screen.
    Fullscreen,
}

impl WindowPlacement {
    /// Every placement, in declaration order.
    pub const ALL: [Self; 3] = [Self::Floating, Self::Maximized, Self::Fullscreen];

    /// The stored name of this placement.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Floating => "Floating",
            Self::Maximized => "Maximized",
            Self::Fullscreen => "Fullscreen",
        }
    }
}

impl fmt::Display for WindowPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowPlacement {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|placement| placement.as_str() == s)
            .ok_or_else(|| SettingsError::InvalidPlacement(s.to_string()))
    }
}

impl SettingValue for WindowPlacement {
    const EXPECTED: &'static str = "Floating, Maximized or Fullscreen";

    fn decode(raw: &str) -> Result<Option<Self>, SettingsError> {
        raw.parse().map(Some)
    }

    fn parse_input(_key: &str, raw: &str) -> Result<Self, SettingsError> {
        raw.parse()
    }

    fn encode(&self) -> String {
        self.as_str().to_string()
    }
}

//! Flat `key=value` settings file with backslash line continuation.
//!
//! Format:
//! ```text
//! KEY=value possibly \
//! continued over \
//! multiple physical lines
//! OTHER_KEY=simple value
//! ```
//!
//! Keys must not contain `=` or line breaks, and a value must not end with a
//! lone `\` or contain `\r`; every other mapping survives a
//! [`save_settings`] / [`load_settings`] round trip.
use std::fs;
use std::path::Path;

use crate::error::SettingsError;

/// Trailing marker that joins a value with the next physical line.
const CONTINUATION: char = '\\';

/// Insertion-ordered mapping from setting key to raw string value.
///
/// Keys are unique. Inserting an existing key replaces its value in place so
/// the file layout stays stable across writes.
///
/// # Examples
///
/// ```
/// use project_builder::settings::store::SettingsMap;
///
/// let mut settings = SettingsMap::new();
/// settings.insert("SHOWCASE", "/src/showcase");
/// settings.insert("NBA", "/src/nba");
/// settings.insert("SHOWCASE", "/work/showcase");
///
/// let keys: Vec<&str> = settings.keys().collect();
/// assert_eq!(keys, ["SHOWCASE", "NBA"]);
/// assert_eq!(settings.get("SHOWCASE"), Some("/work/showcase"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsMap {
    entries: Vec<(String, String)>,
}

impl SettingsMap {
    /// Create an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Return the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Return `true` if `key` has a stored value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Store `value` under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of stored entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if no entries are stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SettingsMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut settings = Self::new();
        for (key, value) in iter {
            settings.insert(key, value);
        }
        settings
    }
}

/// Load the settings file at `path`.
///
/// A missing file yields an empty mapping.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] if the file exists but cannot be read.
pub fn load_settings(path: &Path) -> Result<SettingsMap, SettingsError> {
    if !path.exists() {
        return Ok(SettingsMap::new());
    }
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_settings_from_str(&content))
}

/// Parse settings file content.
///
/// Each line is split on its first `=`; lines without one are skipped. A
/// value ending in `\` continues on the following lines until one that does
/// not end in `\`.
///
/// # Examples
///
/// ```
/// use project_builder::settings::store::parse_settings_from_str;
///
/// let settings = parse_settings_from_str("A=line1\\\nline2\nB=x");
/// assert_eq!(settings.get("A"), Some("line1\nline2"));
/// assert_eq!(settings.get("B"), Some("x"));
/// ```
#[must_use]
pub fn parse_settings_from_str(content: &str) -> SettingsMap {
    let mut settings = SettingsMap::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some((key, raw)) = line.split_once('=') else {
            continue;
        };
        let value = match raw.strip_suffix(CONTINUATION) {
            Some(head) => join_continuation(head, &mut lines),
            None => raw.to_string(),
        };
        settings.insert(key, value);
    }

    settings
}

/// Rebuild a multi-line value whose first line (minus its `\`) is `head`.
///
/// Stops quietly when the input runs out mid-value.
fn join_continuation<'a>(head: &str, lines: impl Iterator<Item = &'a str>) -> String {
    let mut value = String::with_capacity(head.len() + 1);
    value.push_str(head);
    value.push('\n');

    for line in lines {
        if let Some(part) = line.strip_suffix(CONTINUATION) {
            value.push_str(part);
            value.push('\n');
        } else {
            value.push_str(line);
            break;
        }
    }

    value
}

/// Render a mapping in the settings file format.
///
/// Embedded newlines are written as `\` followed by a line break; entries
/// are separated by `\n` with no trailing newline.
///
/// # Examples
///
/// ```
/// use project_builder::settings::store::{SettingsMap, serialize_settings};
///
/// let settings: SettingsMap = [("A", "one\ntwo"), ("B", "x")].into_iter().collect();
/// assert_eq!(serialize_settings(&settings), "A=one\\\ntwo\nB=x");
/// ```
#[must_use]
pub fn serialize_settings(settings: &SettingsMap) -> String {
    settings
        .iter()
        .map(|(key, value)| format!("{key}={}", value.replace('\n', "\\\n")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Overwrite the settings file at `path` with the whole mapping.
///
/// The parent directory is created if needed. The write is not atomic.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] if the directory cannot be created or the
/// file cannot be written.
pub fn save_settings(path: &Path, settings: &SettingsMap) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, serialize_settings(settings)).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_entries() {
        let settings = parse_settings_from_str("SHOWCASE=/src/showcase\nNBA=/src/nba\n");
        assert_eq!(settings.len(), 2);
        assert_eq!(settings.get("SHOWCASE"), Some("/src/showcase"));
        assert_eq!(settings.get("NBA"), Some("/src/nba"));
    }

    #[test]
    fn parse_splits_on_first_equals() {
        let settings = parse_settings_from_str("ARGS=-Pkey=value");
        assert_eq!(settings.get("ARGS"), Some("-Pkey=value"));
    }

    #[test]
    fn parse_keeps_surrounding_whitespace() {
        let settings = parse_settings_from_str("KEY = value ");
        assert_eq!(settings.get("KEY "), Some(" value "));
    }

    #[test]
    fn parse_skips_lines_without_equals() {
        let settings = parse_settings_from_str("garbage\nA=1\n\nmore garbage\nB=2");
        let keys: Vec<&str> = settings.keys().collect();
        assert_eq!(keys, ["A", "B"]);
    }

    #[test]
    fn parse_continuation_value() {
        let settings = parse_settings_from_str("A=line1\\\nline2\nB=x");
        assert_eq!(settings.get("A"), Some("line1\nline2"));
        assert_eq!(settings.get("B"), Some("x"));
    }

    #[test]
    fn parse_continuation_over_several_lines() {
        let settings = parse_settings_from_str("A=one\\\ntwo\\\nthree\nB=x");
        assert_eq!(settings.get("A"), Some("one\ntwo\nthree"));
        assert_eq!(settings.get("B"), Some("x"));
    }

    #[test]
    fn parse_continuation_line_may_contain_equals() {
        let settings = parse_settings_from_str("A=one\\\nB=two\nC=3");
        assert_eq!(settings.get("A"), Some("one\nB=two"));
        assert_eq!(settings.get("B"), None);
        assert_eq!(settings.get("C"), Some("3"));
    }

    #[test]
    fn parse_continuation_past_end_keeps_partial_value() {
        let settings = parse_settings_from_str("A=one\\\ntwo\\");
        assert_eq!(settings.get("A"), Some("one\ntwo\n"));
    }

    #[test]
    fn parse_continuation_at_last_line() {
        let settings = parse_settings_from_str("A=dangling\\");
        assert_eq!(settings.get("A"), Some("dangling\n"));
    }

    #[test]
    fn parse_crlf_line_endings() {
        let settings = parse_settings_from_str("A=one\\\r\ntwo\r\nB=x\r\n");
        assert_eq!(settings.get("A"), Some("one\ntwo"));
        assert_eq!(settings.get("B"), Some("x"));
    }

    #[test]
    fn parse_duplicate_key_last_value_wins_first_position_kept() {
        let settings = parse_settings_from_str("A=1\nB=2\nA=3");
        let pairs: Vec<(&str, &str)> = settings.iter().collect();
        assert_eq!(pairs, [("A", "3"), ("B", "2")]);
    }

    #[test]
    fn parse_empty_key_and_value() {
        let settings = parse_settings_from_str("=orphan\nEMPTY=");
        assert_eq!(settings.get(""), Some("orphan"));
        assert_eq!(settings.get("EMPTY"), Some(""));
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(parse_settings_from_str("").is_empty());
    }

    #[test]
    fn serialize_escapes_newlines() {
        let settings: SettingsMap = [("A", "one\n\ntwo")].into_iter().collect();
        assert_eq!(serialize_settings(&settings), "A=one\\\n\\\ntwo");
    }

    #[test]
    fn serialize_empty_map_is_empty() {
        assert_eq!(serialize_settings(&SettingsMap::new()), "");
    }

    #[test]
    fn blank_lines_inside_value_round_trip() {
        let settings: SettingsMap = [("A", "one\n\ntwo"), ("B", "x")].into_iter().collect();
        let parsed = parse_settings_from_str(&serialize_settings(&settings));
        assert_eq!(parsed, settings);
    }

    #[test]
    fn trailing_newline_value_round_trips() {
        let settings: SettingsMap = [("A", "x\n"), ("B", "y")].into_iter().collect();
        let parsed = parse_settings_from_str(&serialize_settings(&settings));
        assert_eq!(parsed, settings);
    }

    #[test]
    fn inner_backslash_before_newline_round_trips() {
        let settings: SettingsMap = [("A", "C:\\\nD:\\tools")].into_iter().collect();
        let parsed = parse_settings_from_str(&serialize_settings(&settings));
        assert_eq!(parsed, settings);
    }

    #[test]
    fn map_insert_replaces_in_place() {
        let mut settings = SettingsMap::new();
        assert_eq!(settings.insert("A", "1"), None);
        settings.insert("B", "2");
        assert_eq!(settings.insert("A", "3"), Some("1".to_string()));
        let pairs: Vec<(&str, &str)> = settings.iter().collect();
        assert_eq!(pairs, [("A", "3"), ("B", "2")]);
    }

    #[test]
    fn map_remove() {
        let mut settings: SettingsMap = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(settings.remove("A"), Some("1".to_string()));
        assert_eq!(settings.remove("A"), None);
        assert!(!settings.contains_key("A"));
        assert!(settings.contains_key("B"));
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let settings = load_settings(&dir.path().join("settings")).expect("missing file is fine");
        assert!(settings.is_empty());
    }

    #[test]
    fn load_directory_is_an_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = load_settings(dir.path()).expect_err("a directory is not a settings file");
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn save_creates_parent_directory() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("nested").join("settings");
        let settings: SettingsMap = [("A", "1")].into_iter().collect();
        save_settings(&path, &settings).expect("save should succeed");
        assert_eq!(fs::read_to_string(&path).expect("read back"), "A=1");
    }

    #[test]
    fn save_overwrites_previous_content() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("settings");
        fs::write(&path, "OLD=value\nSTALE=1").expect("seed file");
        let settings: SettingsMap = [("NEW", "2")].into_iter().collect();
        save_settings(&path, &settings).expect("save should succeed");
        assert_eq!(load_settings(&path).expect("load"), settings);
    }
}

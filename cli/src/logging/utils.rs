//! Log file location, timestamp formatting and ANSI stripping.
use std::fs;
use std::path::{Path, PathBuf};

/// Subdirectory of the settings directory that holds log files.
const LOG_DIR_NAME: &str = "logs";

/// Return `<settings_dir>/logs/<command>.log`, creating the directory.
///
/// Returns `None` if the directory cannot be created.
#[must_use]
pub fn log_file_path(settings_dir: &Path, command: &str) -> Option<PathBuf> {
    let dir = settings_dir.join(LOG_DIR_NAME);
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Format the current UTC time as `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the current UTC time as `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}

/// Remove terminal escape sequences so log files stay plain text.
///
/// CSI sequences (`ESC [ ... final`) are dropped whole; any other escape
/// drops `ESC` and the character after it.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next() == Some('[') {
            let _final_byte = chars.by_ref().find(|param| ('@'..='~').contains(param));
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn log_file_path_creates_logs_dir() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = log_file_path(dir.path(), "show").expect("log path");
        assert_eq!(path, dir.path().join("logs").join("show.log"));
        assert!(dir.path().join("logs").is_dir());
    }

    #[test]
    fn log_file_path_fails_when_dir_is_a_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").expect("write blocker file");
        assert!(log_file_path(&blocker, "show").is_none());
    }

    #[test]
    fn strip_ansi_removes_colour_and_csi() {
        assert_eq!(strip_ansi("\x1b[33mWARN\x1b[0m  careful"), "WARN  careful");
        assert_eq!(strip_ansi("\x1b[1;34m==>\x1b[0m \x1b[1mLoading\x1b[0m"), "==> Loading");
        assert_eq!(strip_ansi("\x1b[2Kdone"), "done");
    }

    #[test]
    fn strip_ansi_short_escapes_and_plain_text() {
        assert_eq!(strip_ansi("\x1b7saved"), "saved");
        assert_eq!(strip_ansi("C:\\work\\nba"), "C:\\work\\nba");
        assert_eq!(strip_ansi(""), "");
        assert_eq!(strip_ansi("trailing\x1b"), "trailing");
    }

    #[test]
    fn format_utc_time_has_correct_format() {
        let s = format_utc_time();
        assert_eq!(s.len(), 8, "HH:MM:SS should be 8 chars");
        assert_eq!(&s[2..3], ":", "colon at position 2");
        assert_eq!(&s[5..6], ":", "colon at position 5");
    }

    #[test]
    fn format_utc_datetime_has_correct_format() {
        let s = format_utc_datetime();
        assert_eq!(s.len(), 19, "YYYY-MM-DD HH:MM:SS should be 19 chars");
        assert_eq!(&s[4..5], "-", "dash at position 4");
        assert_eq!(&s[10..11], " ", "space at position 10");
    }
}

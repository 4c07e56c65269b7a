//! Where the settings directory and file live.
use std::path::{Path, PathBuf};

/// Directory created under the user's home directory.
pub const SETTINGS_DIR_NAME: &str = ".project-builder";

/// File name of the settings store inside the settings directory.
pub const SETTINGS_FILE_NAME: &str = "settings";

/// Return `~/.project-builder`, using `HOME` or `USERPROFILE`.
///
/// Falls back to the current directory when neither variable is set.
#[must_use]
pub fn default_settings_dir() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_or_else(|_| PathBuf::from("."), PathBuf::from)
        .join(SETTINGS_DIR_NAME)
}

/// Resolve the settings directory, preferring an explicit override.
#[must_use]
pub fn resolve_settings_dir(override_dir: Option<&Path>) -> PathBuf {
    override_dir.map_or_else(default_settings_dir, Path::to_path_buf)
}

/// Path of the settings file inside `dir`.
#[must_use]
pub fn settings_file(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE_NAME)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let dir = resolve_settings_dir(Some(Path::new("/tmp/pb")));
        assert_eq!(dir, PathBuf::from("/tmp/pb"));
    }

    #[test]
    fn default_ends_with_settings_dir_name() {
        let dir = resolve_settings_dir(None);
        assert!(dir.ends_with(SETTINGS_DIR_NAME));
    }

    #[test]
    fn settings_file_is_inside_dir() {
        assert_eq!(
            settings_file(Path::new("/home/me/.project-builder")),
            PathBuf::from("/home/me/.project-builder/settings")
        );
    }
}

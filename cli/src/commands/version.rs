//! Command: print version information.
use std::io::Write;

use anyhow::Result;

/// Version string stamped by the build script, or the package version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("PROJECT_BUILDER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the project builder version.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn run(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "project-builder {}", version())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn prints_name_and_version() {
        let mut out = Vec::new();
        run(&mut out).expect("write to buffer");
        let text = String::from_utf8(out).expect("utf-8 output");
        assert_eq!(text, format!("project-builder {}\n", version()));
    }
}

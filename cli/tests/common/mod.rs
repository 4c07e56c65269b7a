// Shared helpers for integration tests.
//
// Provides a temporary settings directory and a fluent builder so each
// integration test can seed a settings file and fake Gradle checkouts without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use project_builder::cli::Command;
use project_builder::commands;
use project_builder::logging::BufferedLog;
use project_builder::paths::GRADLE_WRAPPER;

/// An isolated settings directory backed by a [`tempfile::TempDir`].
pub struct TestSettingsDir {
    /// Temporary directory used as the settings directory.
    pub root: tempfile::TempDir,
}

impl TestSettingsDir {
    /// Create an empty settings directory.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path to the settings directory.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.path().join("settings")
    }

    /// Write `content` verbatim as the settings file.
    #[must_use]
    pub fn with_settings(self, content: &str) -> Self {
        fs::write(self.settings_file(), content).expect("write settings file");
        self
    }

    /// Create `name/gradlew` under the settings directory.
    #[must_use]
    pub fn with_gradle_project(self, name: &str) -> Self {
        let dir = self.path().join(name);
        fs::create_dir_all(&dir).expect("create project dir");
        fs::write(dir.join(GRADLE_WRAPPER), "#!/bin/sh\n").expect("write gradlew");
        self
    }

    /// Create `name/` without a Gradle wrapper.
    #[must_use]
    pub fn with_plain_dir(self, name: &str) -> Self {
        fs::create_dir_all(self.path().join(name)).expect("create dir");
        self
    }

    /// Current settings file content.
    pub fn read_settings(&self) -> String {
        fs::read_to_string(self.settings_file()).expect("read settings file")
    }

    /// Run `command` against this directory, capturing output and log.
    pub fn run(&self, command: &Command) -> CommandOutcome {
        let log = BufferedLog::new();
        let mut out = Vec::new();
        let result = commands::run(command, self.path(), &log, &mut out);
        CommandOutcome {
            result,
            stdout: String::from_utf8(out).expect("utf-8 output"),
            log,
        }
    }
}

/// Result, printed output and captured log of one command run.
pub struct CommandOutcome {
    /// What the command returned.
    pub result: anyhow::Result<()>,
    /// Everything written to the output stream.
    pub stdout: String,
    /// Every message logged during the run.
    pub log: BufferedLog,
}

impl CommandOutcome {
    /// Assert success and return the output.
    pub fn ok(self) -> String {
        if let Err(err) = &self.result {
            panic!("command failed: {err:#}");
        }
        self.stdout
    }

    /// Assert failure and return the error message.
    pub fn err(self) -> String {
        match self.result {
            Ok(()) => panic!("command unexpectedly succeeded"),
            Err(err) => err.to_string(),
        }
    }
}

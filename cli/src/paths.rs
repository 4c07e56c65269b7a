//! Project path validation.
//!
//! A configured project path "looks like" a Gradle checkout when a
//! `gradlew` entry exists directly beneath it. Validation is a pure snapshot
//! of the filesystem: callers rebuild [`ProjectPaths`] whenever the inputs
//! change.
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::PathsError;

/// Marker file expected at the root of every project checkout.
pub const GRADLE_WRAPPER: &str = "gradlew";

/// Existence check used to look for the [`GRADLE_WRAPPER`] marker.
#[cfg_attr(test, mockall::automock)]
pub trait MarkerProbe {
    /// Return `true` if `path` exists. Errors count as "does not exist".
    fn exists(&self, path: &Path) -> bool;
}

/// [`MarkerProbe`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl MarkerProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// The three projects the builder works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Project {
    /// The Kotlin SDK checkout.
    StorytellerSdkKotlin,
    /// The Android showcase app checkout.
    Showcase,
    /// The NBA Android app checkout.
    Nba,
}

impl Project {
    /// Every project, in display order.
    pub const ALL: [Self; 3] = [Self::StorytellerSdkKotlin, Self::Showcase, Self::Nba];

    /// Repository name shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StorytellerSdkKotlin => "storyteller-sdk-kotlin",
            Self::Showcase => "storyteller-showcase-android",
            Self::Nba => "nba-nextgen-android",
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation outcome for one project path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPathStatus {
    /// Which project this is.
    pub project: Project,
    /// The path as configured.
    pub configured: String,
    /// The directory that was probed, or `None` when nothing is configured.
    pub resolved: Option<PathBuf>,
    /// Whether `resolved/gradlew` exists.
    pub valid: bool,
}

/// Derived validity of the three configured project paths.
///
/// Invariant: `is_valid() == is_storyteller_sdk_kotlin_valid() &&
/// is_showcase_valid() && is_nba_valid()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    statuses: [ProjectPathStatus; 3],
}

impl ProjectPaths {
    /// Validate the three paths against the filesystem.
    ///
    /// Relative paths resolve against `base`; absolute paths are used as-is.
    /// An empty path is "not configured" and never valid.
    #[must_use]
    pub fn new(base: &Path, storyteller_sdk_kotlin: &str, showcase: &str, nba: &str) -> Self {
        Self::with_probe(base, storyteller_sdk_kotlin, showcase, nba, &FsProbe)
    }

    /// Validate the three paths using `probe` for the existence checks.
    #[must_use]
    pub fn with_probe(
        base: &Path,
        storyteller_sdk_kotlin: &str,
        showcase: &str,
        nba: &str,
        probe: &dyn MarkerProbe,
    ) -> Self {
        let [a, b, c] = Project::ALL;
        Self {
            statuses: [
                check(a, base, storyteller_sdk_kotlin, probe),
                check(b, base, showcase, probe),
                check(c, base, nba, probe),
            ],
        }
    }

    /// `true` when all three projects have a `gradlew` marker.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.statuses.iter().all(|status| status.valid)
    }

    /// Whether the Kotlin SDK path is valid.
    #[must_use]
    pub const fn is_storyteller_sdk_kotlin_valid(&self) -> bool {
        self.statuses[0].valid
    }

    /// Whether the showcase app path is valid.
    #[must_use]
    pub const fn is_showcase_valid(&self) -> bool {
        self.statuses[1].valid
    }

    /// Whether the NBA app path is valid.
    #[must_use]
    pub const fn is_nba_valid(&self) -> bool {
        self.statuses[2].valid
    }

    /// Per-project results in [`Project::ALL`] order.
    #[must_use]
    pub const fn statuses(&self) -> &[ProjectPathStatus; 3] {
        &self.statuses
    }

    /// Status for a single project.
    #[must_use]
    pub fn status(&self, project: Project) -> &ProjectPathStatus {
        match project {
            Project::StorytellerSdkKotlin => &self.statuses[0],
            Project::Showcase => &self.statuses[1],
            Project::Nba => &self.statuses[2],
        }
    }

    /// Projects whose path is not valid.
    pub fn invalid_projects(&self) -> impl Iterator<Item = Project> + '_ {
        self.statuses
            .iter()
            .filter(|status| !status.valid)
            .map(|status| status.project)
    }

    /// Succeed only when every path is valid.
    ///
    /// # Errors
    ///
    /// Returns [`PathsError::Invalid`] naming every project without a marker.
    pub fn ensure_valid(&self) -> Result<(), PathsError> {
        if self.is_valid() {
            return Ok(());
        }
        let names = self
            .invalid_projects()
            .map(Project::label)
            .collect::<Vec<_>>()
            .join(", ");
        Err(PathsError::Invalid(names))
    }
}

fn check(
    project: Project,
    base: &Path,
    configured: &str,
    probe: &dyn MarkerProbe,
) -> ProjectPathStatus {
    if configured.trim().is_empty() {
        return ProjectPathStatus {
            project,
            configured: configured.to_string(),
            resolved: None,
            valid: false,
        };
    }
    let resolved = base.join(configured);
    let valid = probe.exists(&resolved.join(GRADLE_WRAPPER));
    ProjectPathStatus {
        project,
        configured: configured.to_string(),
        resolved: Some(resolved),
        valid,
    }
}

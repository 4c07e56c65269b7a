//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the project builder.
#[derive(Parser, Debug)]
#[command(
    name = "project-builder",
    about = "Manage Project Builder settings and project paths",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override the settings directory (default: ~/.project-builder)
    #[arg(long, global = true)]
    pub settings_dir: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every setting and project-path validity
    Show(ShowOpts),
    /// Print one setting
    Get {
        /// Setting key, e.g. INDENT
        key: String,
    },
    /// Assign a setting
    Set {
        /// Setting key, e.g. INDENT
        key: String,
        /// New value
        value: String,
    },
    /// Remove a setting, restoring its default
    Unset {
        /// Setting key
        key: String,
    },
    /// Validate the three project paths
    Paths,
    /// Save the three project paths
    Configure(ConfigureOpts),
    /// Show or change the saved window geometry
    Window(WindowOpts),
    /// Print the settings file location
    Path,
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name, used to name the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Show(_) => "show",
            Self::Get { .. } => "get",
            Self::Set { .. } => "set",
            Self::Unset { .. } => "unset",
            Self::Paths => "paths",
            Self::Configure(_) => "configure",
            Self::Window(_) => "window",
            Self::Path => "path",
            Self::Version => "version",
        }
    }

    /// `false` for commands that never read or write the settings
    /// directory (`path`, `version`).
    #[must_use]
    pub const fn loads_settings(&self) -> bool {
        !matches!(self, Self::Path | Self::Version)
    }
}

/// Options for the `show` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ShowOpts {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Options for the `configure` subcommand.
///
/// Omitted paths keep their current value.
#[derive(Parser, Debug, Clone)]
pub struct ConfigureOpts {
    /// Path of the storyteller-sdk-kotlin checkout
    #[arg(long)]
    pub storyteller_sdk_kotlin: Option<String>,

    /// Path of the storyteller-showcase-android checkout
    #[arg(long)]
    pub showcase: Option<String>,

    /// Path of the nba-nextgen-android checkout
    #[arg(long)]
    pub nba: Option<String>,

    /// Save even if some paths are invalid
    #[arg(short, long)]
    pub force: bool,
}

/// Options for the `window` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct WindowOpts {
    /// Window width
    #[arg(long)]
    pub width: Option<i32>,

    /// Window height
    #[arg(long)]
    pub height: Option<i32>,

    /// Window left edge (non-positive centers the window)
    #[arg(long, allow_negative_numbers = true)]
    pub x: Option<i32>,

    /// Window top edge (non-positive centers the window)
    #[arg(long, allow_negative_numbers = true)]
    pub y: Option<i32>,

    /// Floating, Maximized or Fullscreen
    #[arg(long)]
    pub placement: Option<String>,
}

impl WindowOpts {
    /// `true` when no option was given, i.e. the command only reports.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.x.is_none()
            && self.y.is_none()
            && self.placement.is_none()
    }
}

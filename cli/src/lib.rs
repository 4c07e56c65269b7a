//! Project Builder settings engine.
//!
//! Persists the builder's preferences in a flat `KEY=value` file under
//! `~/.project-builder/` and checks that the three configured project
//! checkouts each contain a Gradle wrapper.
//!
//! The public API is organised into these layers:
//!
//! - **[`settings`]**: the file format, typed observable settings and [`settings::BuilderState`]
//! - **[`paths`]**: project path validation
//! - **[`commands`]**: subcommand orchestration (`show`, `set`, `configure`, ...)
//! - **[`logging`]**: console and per-command log file output
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod paths;
pub mod settings;

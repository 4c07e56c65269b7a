//! Logging infrastructure for structured console and file output.

mod buffered;
mod logger;
mod subscriber;
mod types;
mod utils;

pub use buffered::{BufferedLog, LogLevel};
pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::Log;
pub use utils::log_file_path;

/// Target used for stage headers so formatters can render them distinctly.
pub(crate) const STAGE_TARGET: &str = "project_builder::stage";

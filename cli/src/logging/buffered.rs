//! Logger that captures messages in memory.
use std::sync::Mutex;

use super::types::Log;

/// Severity of a captured message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// A stage header.
    Stage,
    /// An informational message.
    Info,
    /// A debug message.
    Debug,
    /// A warning.
    Warn,
    /// An error.
    Error,
}

/// Implement the methods of [`Log`] by pushing each message with its level.
macro_rules! capture_log_methods {
    ($($method:ident => $level:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                if let Ok(mut guard) = self.entries.lock() {
                    guard.push((LogLevel::$level, msg.to_string()));
                }
            }
        )+
    };
}

/// A [`Log`] that keeps every message in memory.
///
/// Used where output must be inspected rather than printed: entries are
/// read back with [`entries`](Self::entries) or
/// [`messages`](Self::messages).
#[derive(Debug, Default)]
pub struct BufferedLog {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl BufferedLog {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every captured message, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().map_or_else(|_| Vec::new(), |g| g.clone())
    }

    /// Captured messages at `level`, oldest first.
    #[must_use]
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg)
            .collect()
    }
}

impl Log for BufferedLog {
    capture_log_methods! {
        stage => Stage,
        info  => Info,
        debug => Debug,
        warn  => Warn,
        error => Error,
    }
}

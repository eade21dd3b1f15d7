use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use crate::{TaskboardError, TaskboardResult};

pub const DEBUG_LOG_ENV: &str = "TASKBOARD_DEBUG_LOG";

/// Where log events end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Everything at DEBUG, appended to a file.
    File(PathBuf),
    /// Warnings on stderr; `RUST_LOG` may raise the level.
    Stderr,
    /// No subscriber. The TUI owns the terminal, so stderr output would
    /// land on top of the alternate screen.
    Silent,
}

impl LogTarget {
    /// A debug log path always wins. Without one, only non-interactive
    /// commands write to stderr.
    pub fn select(debug_log: Option<PathBuf>, interactive: bool) -> Self {
        match debug_log {
            Some(path) => Self::File(path),
            None if interactive => Self::Silent,
            None => Self::Stderr,
        }
    }
}

/// Installs the global subscriber for the given target.
pub fn init(target: &LogTarget) -> TaskboardResult<()> {
    let result = match target {
        LogTarget::File(log_path) => {
            let log_file = open_log(log_path)?;

            tracing_subscriber::fmt()
                .with_writer(log_file)
                .with_max_level(tracing::Level::DEBUG)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .try_init()
        }
        LogTarget::Stderr => {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
        }
        LogTarget::Silent => return Ok(()),
    };

    result.map_err(|e| TaskboardError::Internal(format!("logging init failed: {}", e)))
}

fn open_log(path: &Path) -> std::io::Result<std::fs::File> {
    std::fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Reads the debug log location from the environment.
pub fn debug_log_from_env() -> Option<PathBuf> {
    std::env::var(DEBUG_LOG_ENV)
        .ok()
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interactive_without_debug_log_is_silent() {
        assert_eq!(LogTarget::select(None, true), LogTarget::Silent);
    }

    #[test]
    fn test_commands_log_to_stderr() {
        assert_eq!(LogTarget::select(None, false), LogTarget::Stderr);
    }

    #[test]
    fn test_debug_log_wins_in_both_modes() {
        let path = PathBuf::from("/tmp/taskboard.log");
        assert_eq!(
            LogTarget::select(Some(path.clone()), true),
            LogTarget::File(path.clone())
        );
        assert_eq!(LogTarget::select(Some(path.clone()), false), LogTarget::File(path));
    }

    #[test]
    fn test_silent_installs_nothing() {
        assert!(init(&LogTarget::Silent).is_ok());
    }
}

//! Diagnostic logging through `tracing`.
//!
//! The interactive view owns the terminal, so it only logs when a file is
//! named. The one-shot `say` command logs to stderr.

use std::error::Error;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    Disabled,
}

impl LogTarget {
    /// Log file for the interactive view: the `--log-file` flag wins over
    /// the environment variable. Empty values are ignored.
    pub fn for_chat(flag: Option<PathBuf>, env_value: Option<OsString>) -> Self {
        flag.or_else(|| env_value.map(PathBuf::from))
            .filter(|path| !path.as_os_str().is_empty())
            .map(LogTarget::File)
            .unwrap_or(LogTarget::Disabled)
    }
}

/// `RUST_LOG` when set, otherwise `default_directive`.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber. Calling this twice is an error.
pub fn init_tracing(target: LogTarget, default_directive: &str) -> Result<(), Box<dyn Error>> {
    let filter = env_filter(default_directive);
    let result = match target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    result.map_err(|e| -> Box<dyn Error> { e })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_log_target_prefers_flag() {
        assert_eq!(
            LogTarget::for_chat(
                Some(PathBuf::from("flag.log")),
                Some(OsString::from("env.log"))
            ),
            LogTarget::File(PathBuf::from("flag.log"))
        );
        assert_eq!(
            LogTarget::for_chat(None, Some(OsString::from("env.log"))),
            LogTarget::File(PathBuf::from("env.log"))
        );
    }

    #[test]
    fn chat_logging_is_off_without_a_file() {
        assert_eq!(LogTarget::for_chat(None, None), LogTarget::Disabled);
        assert_eq!(
            LogTarget::for_chat(None, Some(OsString::new())),
            LogTarget::Disabled
        );
    }

    #[test]
    fn disabled_target_installs_nothing() {
        assert!(init_tracing(LogTarget::Disabled, "info").is_ok());
    }
}

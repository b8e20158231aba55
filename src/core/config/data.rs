use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::constants::{DEFAULT_BASE_URL, DEFAULT_END_MARKER};
use crate::core::prompt::PromptTemplate;
use crate::utils::url::normalize_base_url;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the generation server (e.g., "http://localhost:8000")
    pub base_url: Option<String>,
    /// UI theme name ("dark" or "light")
    pub theme: Option<String>,
    /// End-of-turn token stripped from the final streamed chunk
    pub end_marker: Option<String>,
    /// Turn delimiters used when flattening the transcript into a prompt
    pub prompt_template: Option<PromptTemplate>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
///
/// # Examples
/// - Unix: `/home/user/.config/mistral-chat/config.toml` → `~/.config/mistral-chat/config.toml`
/// - Windows: paths are shown unchanged
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    /// Pick the base URL: command-line flag, then environment, then config
    /// file, then the built-in default. Blank values are skipped.
    pub fn resolve_base_url(&self, flag: Option<&str>, env_value: Option<&str>) -> String {
        [flag, env_value, self.base_url.as_deref()]
            .into_iter()
            .flatten()
            .map(normalize_base_url)
            .find(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn end_marker(&self) -> &str {
        self.end_marker.as_deref().unwrap_or(DEFAULT_END_MARKER)
    }

    pub fn prompt_template(&self) -> PromptTemplate {
        self.prompt_template.clone().unwrap_or_default()
    }
}

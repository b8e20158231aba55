//! `set` / `unset` handling for config keys.

use std::fmt;

use crate::core::config::Config;
use crate::ui::theme::{Theme, THEME_NAMES};
use crate::utils::url::normalize_base_url;

pub const SETTING_KEYS: [&str; 3] = ["base-url", "theme", "end-marker"];

/// Errors that can occur when modifying configuration settings.
#[derive(Debug, PartialEq, Eq)]
pub enum SettingError {
    /// The provided setting key is not recognized.
    UnknownKey(String),
    /// The provided theme name is not one of the built-in themes.
    UnknownTheme { input: String },
    /// The value is empty after trimming.
    EmptyValue { key: String },
}

impl SettingError {
    /// Print the error message to stderr with appropriate formatting.
    pub fn print(&self) {
        match self {
            SettingError::UnknownKey(key) => {
                eprintln!("❌ Unknown config key: {key}");
                eprintln!("   Available keys: {}", SETTING_KEYS.join(", "));
            }
            SettingError::UnknownTheme { input } => {
                eprintln!(
                    "❌ Unknown theme: {input}. Available themes: {}",
                    THEME_NAMES.join(", ")
                );
            }
            SettingError::EmptyValue { key } => {
                eprintln!("⚠️  A value is required for {key}");
                eprintln!("Example: mistral-chat set {key} <VALUE>");
            }
        }
    }

    /// Returns the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => write!(f, "Unknown config key: {key}"),
            SettingError::UnknownTheme { input } => write!(f, "Unknown theme: {input}"),
            SettingError::EmptyValue { key } => write!(f, "A value is required for {key}"),
        }
    }
}

impl std::error::Error for SettingError {}

/// Apply `set <key> <value>` to `config` and return the confirmation text.
pub fn set_value(config: &mut Config, key: &str, value: &str) -> Result<String, SettingError> {
    let empty = || SettingError::EmptyValue {
        key: key.to_string(),
    };
    match key {
        "base-url" => {
            let url = normalize_base_url(value);
            if url.is_empty() {
                return Err(empty());
            }
            config.base_url = Some(url.clone());
            Ok(format!("✅ Set base-url to: {url}"))
        }
        "theme" => {
            let theme = Theme::from_name(value).ok_or_else(|| SettingError::UnknownTheme {
                input: value.to_string(),
            })?;
            config.theme = Some(theme.id.to_string());
            Ok(format!("✅ Set theme to: {}", theme.id))
        }
        "end-marker" => {
            let marker = value.trim();
            if marker.is_empty() {
                return Err(empty());
            }
            config.end_marker = Some(marker.to_string());
            Ok(format!("✅ Set end-marker to: {marker}"))
        }
        _ => Err(SettingError::UnknownKey(key.to_string())),
    }
}

pub fn unset_value(config: &mut Config, key: &str) -> Result<String, SettingError> {
    match key {
        "base-url" => config.base_url = None,
        "theme" => config.theme = None,
        "end-marker" => config.end_marker = None,
        _ => return Err(SettingError::UnknownKey(key.to_string())),
    }
    Ok(format!("✅ Unset {key}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_base_url_normalizes_trailing_slash() {
        let mut config = Config::default();
        set_value(&mut config, "base-url", "http://gpu:9000/").expect("set");
        assert_eq!(config.base_url.as_deref(), Some("http://gpu:9000"));
    }

    #[test]
    fn set_theme_rejects_unknown_names() {
        let mut config = Config::default();
        assert_eq!(
            set_value(&mut config, "theme", "dracula"),
            Err(SettingError::UnknownTheme {
                input: "dracula".to_string()
            })
        );
        set_value(&mut config, "theme", "LIGHT").expect("set");
        assert_eq!(config.theme.as_deref(), Some("light"));
    }

    #[test]
    fn blank_values_are_rejected() {
        let mut config = Config::default();
        assert!(matches!(
            set_value(&mut config, "end-marker", "  "),
            Err(SettingError::EmptyValue { .. })
        ));
        assert!(matches!(
            set_value(&mut config, "base-url", "/"),
            Err(SettingError::EmptyValue { .. })
        ));
    }

    #[test]
    fn unset_clears_value_and_rejects_unknown_keys() {
        let mut config = Config {
            end_marker: Some("<|end|>".to_string()),
            ..Default::default()
        };
        unset_value(&mut config, "end-marker").expect("unset");
        assert_eq!(config.end_marker, None);
        assert_eq!(
            unset_value(&mut config, "model"),
            Err(SettingError::UnknownKey("model".to_string()))
        );
    }
}

//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod say;
pub mod settings;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::cli::say::run_say;
use crate::cli::settings::{set_value, unset_value};
use crate::core::app::AppInitConfig;
use crate::core::config::data::path_display;
use crate::core::config::Config;
use crate::core::constants::{BASE_URL_ENV_VAR, LOG_FILE_ENV_VAR};
use crate::logging::{init_tracing, LogTarget};
use crate::ui::chat_loop::run_chat;

#[derive(Parser)]
#[command(name = "mistral-chat")]
#[command(version)]
#[command(about = "A terminal chat interface for a streaming text-generation server")]
#[command(
    long_about = "mistral-chat is a full-screen terminal chat interface that streams replies \
from a text-generation server exposing GET /generate-stream?prompt=...\n\n\
Environment Variables:\n\
  MISTRAL_CHAT_BASE_URL   Server base URL (defaults to http://localhost:8000)\n\
  MISTRAL_CHAT_LOG        File that receives diagnostic logs in the chat view\n\
  RUST_LOG                Log filter (defaults to info)\n\n\
Controls:\n\
  Enter             Send the message\n\
  Esc               Dismiss a notification\n\
  Ctrl+L            Start a new chat\n\
  Ctrl+T            Toggle dark/light theme\n\
  Up/Down/PgUp/PgDn Scroll the transcript (End jumps to the bottom)\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the generation server
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Use this config file instead of the platform default
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write diagnostic logs to this file
    #[arg(short = 'l', long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send a single prompt and stream the reply to stdout
    Say {
        /// Prompt text (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Set a configuration value (base-url, theme, end-marker)
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset a configuration value
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Show the current configuration
    Show,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config_path = Config::config_path(args.config.as_deref())?;
    let config = Config::load_from_path(&config_path)?;
    let base_url = resolve_base_url(&config, args.base_url.as_deref());

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let target =
                LogTarget::for_chat(args.log_file, std::env::var_os(LOG_FILE_ENV_VAR));
            init_tracing(target, "info")?;
            run_chat(
                AppInitConfig {
                    base_url,
                    config_path: Some(config_path),
                },
                config,
            )
            .await
        }
        Commands::Say { prompt } => {
            let target = match args.log_file {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Stderr,
            };
            init_tracing(target, "warn")?;
            run_say(prompt, base_url, &config).await
        }
        Commands::Set { key, value } => {
            let mut config = config;
            if value.is_empty() {
                config.print_all();
                return Ok(());
            }
            match set_value(&mut config, &key, &value.join(" ")) {
                Ok(message) => {
                    save_config(&config, &config_path)?;
                    println!("{message}");
                    Ok(())
                }
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
        }
        Commands::Unset { key } => {
            let mut config = config;
            match unset_value(&mut config, &key) {
                Ok(message) => {
                    save_config(&config, &config_path)?;
                    println!("{message}");
                    Ok(())
                }
                Err(err) => {
                    err.print();
                    std::process::exit(err.exit_code());
                }
            }
        }
        Commands::Show => {
            println!("Config file: {}", path_display(&config_path));
            config.print_all();
            println!("Effective base URL: {base_url}");
            Ok(())
        }
    }
}

fn resolve_base_url(config: &Config, flag: Option<&str>) -> String {
    let env_value = std::env::var(BASE_URL_ENV_VAR).ok();
    config.resolve_base_url(flag, env_value.as_deref())
}

fn save_config(config: &Config, path: &Path) -> Result<(), Box<dyn Error>> {
    config
        .save_to_path(path)
        .map_err(|e| format!("Failed to save configuration to {}: {e}", path_display(path)).into())
}

#[cfg(test)]
mod tests;

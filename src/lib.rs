//! mistral-chat is a terminal chat client for a streaming text-generation
//! server.
//!
//! - [`core`] owns the transcript, prompt formatting, the stream consumer,
//!   configuration, and the action-driven application state.
//! - [`ui`] renders the view and runs the interactive event loop.
//! - [`cli`] parses arguments and dispatches to the view, the one-shot
//!   `say` command, or config management.
//! - [`logging`] installs the `tracing` subscriber.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod cli;
pub mod core;
pub mod logging;
pub mod ui;
pub mod utils;

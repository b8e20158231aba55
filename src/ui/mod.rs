//! Terminal UI layer for the chat view.
//!
//! - [`chat_loop`]: terminal setup and the event loop that merges key input,
//!   stream updates, and queued actions.
//! - [`renderer`] and [`toast`]: frame composition.
//! - [`theme`]: the dark and light palettes.

pub mod chat_loop;
pub mod renderer;
pub mod theme;
pub mod toast;

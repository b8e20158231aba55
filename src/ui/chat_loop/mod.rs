//! Main chat event loop and terminal lifecycle
//!
//! The loop owns the terminal, polls input on a background task, feeds
//! stream updates and key presses through the action queue, and redraws at
//! a bounded frame rate.

mod event_loop;
mod keybindings;
mod lifecycle;

pub use event_loop::run_chat;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::app::App;

/// Shared handle to the application state used by the event loop.
///
/// All access goes through short `read`/`update` closures so the lock is
/// never held across an await point.
#[derive(Clone)]
pub struct AppHandle {
    inner: Arc<Mutex<App>>,
}

impl AppHandle {
    pub fn new(inner: Arc<Mutex<App>>) -> Self {
        Self { inner }
    }

    pub async fn read<R>(&self, f: impl FnOnce(&App) -> R) -> R {
        let guard = self.inner.lock().await;
        f(&guard)
    }

    pub async fn update<R>(&self, f: impl FnOnce(&mut App) -> R) -> R {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }
}

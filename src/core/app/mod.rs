use std::path::PathBuf;

use reqwest::Client;
use tracing::warn;

use crate::core::config::Config;
use crate::ui::theme::Theme;

pub mod actions;
pub mod conversation;
pub mod session;
pub mod ui_state;

pub use actions::{
    apply_action, apply_actions, AppAction, AppActionContext, AppActionDispatcher,
    AppActionEnvelope, AppCommand,
};
pub use conversation::ConversationController;
pub use session::SessionContext;
pub use ui_state::{Toast, UiState};

pub struct App {
    pub session: SessionContext,
    pub ui: UiState,
}

/// Resolved startup settings for the interactive view.
pub struct AppInitConfig {
    pub base_url: String,
    pub config_path: Option<PathBuf>,
}

impl App {
    pub fn new(init: AppInitConfig, config: &Config) -> Result<App, Box<dyn std::error::Error>> {
        let client = Client::builder().build()?;
        let session = SessionContext::new(client, init.base_url, config, init.config_path);
        Ok(App {
            session,
            ui: UiState::new(resolve_theme(config)),
        })
    }

    pub fn conversation(&mut self) -> ConversationController<'_> {
        ConversationController::new(&mut self.session, &mut self.ui)
    }

    pub fn is_current_stream(&self, stream_id: u64) -> bool {
        self.session.is_current_stream(stream_id)
    }
}

pub(crate) fn resolve_theme(config: &Config) -> Theme {
    match config.theme.as_deref() {
        Some(name) => Theme::from_name(name).unwrap_or_else(|| {
            warn!(theme = name, "unknown theme in config, using dark");
            Theme::dark_default()
        }),
        None => Theme::dark_default(),
    }
}

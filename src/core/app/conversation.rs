use super::{session::SessionContext, ui_state::Toast, ui_state::UiState};
use crate::core::constants::{ERROR_TOAST_DESCRIPTION, ERROR_TOAST_TITLE};
use crate::core::message::Message;
use tracing::{debug, warn};

/// Transcript mutations that need both the session and the UI state.
pub struct ConversationController<'a> {
    session: &'a mut SessionContext,
    ui: &'a mut UiState,
}

impl<'a> ConversationController<'a> {
    pub fn new(session: &'a mut SessionContext, ui: &'a mut UiState) -> Self {
        Self { session, ui }
    }

    /// Append the user's message and return the prompt for the whole
    /// transcript, that message included.
    pub fn add_user_message(&mut self, content: String) -> String {
        self.ui.messages.push(Message::user(content));
        self.session.prompt_template.format(&self.ui.messages)
    }

    pub fn start_new_stream(&mut self) -> u64 {
        self.ui.dismiss_toast();
        self.ui.begin_streaming();
        self.session.start_new_stream()
    }

    pub fn append_to_response(&mut self, content: &str) {
        self.ui.current_response.push_str(content);
    }

    /// Commit the streamed text as an assistant message.
    pub fn finalize_response(&mut self) {
        let content = std::mem::take(&mut self.ui.current_response);
        debug!(chars = content.chars().count(), "committing assistant response");
        self.ui.messages.push(Message::assistant(content));
        self.ui.end_streaming();
    }

    /// Abandon the in-flight response. The transcript is left as it is.
    pub fn fail_stream(&mut self, error: &str) {
        warn!(error, stream_id = self.session.current_stream_id, "generation failed");
        self.ui.current_response.clear();
        self.ui.end_streaming();
        self.ui
            .show_toast(Toast::new(ERROR_TOAST_TITLE, ERROR_TOAST_DESCRIPTION));
    }

    pub fn clear_transcript(&mut self) {
        self.ui.messages.clear();
        self.ui.current_response.clear();
        self.ui.dismiss_toast();
        self.ui.scroll_offset = 0;
        self.ui.auto_scroll = true;
    }

    pub fn update_scroll_position(&mut self, term_width: u16, term_height: u16) {
        let available_height = UiState::calculate_available_height(term_height);
        self.ui.update_scroll_position(available_height, term_width);
    }
}

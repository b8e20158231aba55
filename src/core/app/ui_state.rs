use crate::core::constants::{HEADER_HEIGHT, INPUT_AREA_HEIGHT};
use crate::core::message::Message;
use crate::ui::theme::Theme;
use crate::utils::scroll::ScrollCalculator;
use ratatui::text::Line;
use std::time::Instant;

/// Transient bordered notification. At most one is shown at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
}

impl Toast {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

pub struct UiState {
    /// Committed transcript, oldest first.
    pub messages: Vec<Message>,
    /// Text streamed so far for the in-flight request.
    pub current_response: String,
    pub is_streaming: bool,
    pub pulse_start: Instant,
    pub toast: Option<Toast>,
    pub theme: Theme,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub exit_requested: bool,
    input: String,
    /// Cursor position in characters, not bytes.
    input_cursor_position: usize,
}

impl UiState {
    pub fn new(theme: Theme) -> Self {
        Self {
            messages: Vec::new(),
            current_response: String::new(),
            is_streaming: false,
            pulse_start: Instant::now(),
            toast: None,
            theme,
            scroll_offset: 0,
            auto_scroll: true,
            exit_requested: false,
            input: String::new(),
            input_cursor_position: 0,
        }
    }

    pub fn begin_streaming(&mut self) {
        self.current_response.clear();
        self.is_streaming = true;
        self.pulse_start = Instant::now();
    }

    pub fn end_streaming(&mut self) {
        self.is_streaming = false;
    }

    pub fn show_toast(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    /// Wrapped transcript lines, including the in-flight response while
    /// streaming.
    pub fn build_display_lines(&self, terminal_width: u16, indicator: &str) -> Vec<Line<'static>> {
        let pending = self.is_streaming.then_some(self.current_response.as_str());
        ScrollCalculator::build_display_lines(
            &self.messages,
            pending,
            indicator,
            &self.theme,
            terminal_width,
        )
    }

    pub fn calculate_wrapped_line_count(&self, terminal_width: u16) -> usize {
        self.build_display_lines(terminal_width, " ").len()
    }

    pub fn calculate_available_height(term_height: u16) -> u16 {
        term_height.saturating_sub(HEADER_HEIGHT + INPUT_AREA_HEIGHT)
    }

    pub fn calculate_max_scroll_offset(&self, available_height: u16, terminal_width: u16) -> u16 {
        ScrollCalculator::calculate_max_scroll_offset(
            self.calculate_wrapped_line_count(terminal_width),
            available_height,
        )
    }

    /// Stick to the bottom when new content arrives, unless the user has
    /// scrolled away from it.
    pub fn update_scroll_position(&mut self, available_height: u16, terminal_width: u16) {
        if self.auto_scroll {
            self.scroll_offset = self.calculate_max_scroll_offset(available_height, terminal_width);
        }
    }

    pub fn scroll_up(&mut self, lines: u16, available_height: u16, terminal_width: u16) {
        let max_offset = self.calculate_max_scroll_offset(available_height, terminal_width);
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.min(max_offset).saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16, available_height: u16, terminal_width: u16) {
        let max_offset = self.calculate_max_scroll_offset(available_height, terminal_width);
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(max_offset);
        if self.scroll_offset >= max_offset {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_to_bottom(&mut self, available_height: u16, terminal_width: u16) {
        self.auto_scroll = true;
        self.update_scroll_position(available_height, terminal_width);
    }

    pub fn get_input_text(&self) -> &str {
        &self.input
    }

    pub fn get_input_cursor_position(&self) -> usize {
        self.input_cursor_position
    }

    pub fn set_input_text(&mut self, text: String) {
        self.input_cursor_position = text.chars().count();
        self.input = text;
    }

    /// Take the input for submission, leaving the line empty.
    pub fn take_input(&mut self) -> String {
        self.input_cursor_position = 0;
        std::mem::take(&mut self.input)
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.input.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        let offset = self.byte_offset(self.input_cursor_position);
        self.input.insert(offset, ch);
        self.input_cursor_position += 1;
    }

    pub fn insert_text(&mut self, text: &str) {
        let offset = self.byte_offset(self.input_cursor_position);
        self.input.insert_str(offset, text);
        self.input_cursor_position += text.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.input_cursor_position == 0 {
            return;
        }
        self.input_cursor_position -= 1;
        let offset = self.byte_offset(self.input_cursor_position);
        self.input.remove(offset);
    }

    pub fn delete(&mut self) {
        if self.input_cursor_position >= self.input.chars().count() {
            return;
        }
        let offset = self.byte_offset(self.input_cursor_position);
        self.input.remove(offset);
    }

    pub fn move_cursor_left(&mut self) {
        self.input_cursor_position = self.input_cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let len = self.input.chars().count();
        self.input_cursor_position = (self.input_cursor_position + 1).min(len);
    }

    pub fn move_cursor_home(&mut self) {
        self.input_cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.input_cursor_position = self.input.chars().count();
    }
}

use crate::core::message::Message;
use crate::ui::theme::Theme;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Indentation applied to message text under its author label.
pub const MESSAGE_INDENT: &str = "  ";

/// Greedy word wrap measured in terminal columns.
///
/// Explicit newlines always break, words longer than `width` are split
/// across lines, and empty source lines are kept so paragraph spacing
/// survives.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for raw_line in text.split('\n') {
        let raw_line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in raw_line.split(' ') {
            let word_width = word.width();
            let sep = usize::from(!current.is_empty());
            if current_width + sep + word_width <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += sep + word_width;
                continue;
            }

            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }

            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }

        out.push(current);
    }

    out
}

/// Handles all scroll-related calculations and line building
pub struct ScrollCalculator;

impl ScrollCalculator {
    /// Build the transcript as already-wrapped lines for `terminal_width`.
    ///
    /// `pending` is the in-flight response; when present it is rendered as a
    /// trailing assistant block whose label carries `indicator`.
    pub fn build_display_lines(
        messages: &[Message],
        pending: Option<&str>,
        indicator: &str,
        theme: &Theme,
        terminal_width: u16,
    ) -> Vec<Line<'static>> {
        let text_width = (terminal_width as usize).saturating_sub(MESSAGE_INDENT.len());
        let mut lines = Vec::new();

        for message in messages {
            let (label_style, text_style) = if message.is_user() {
                (theme.user_prefix_style, theme.user_text_style)
            } else {
                (theme.assistant_prefix_style, theme.assistant_text_style)
            };
            lines.push(Line::from(Span::styled(
                message.role.display_name(),
                label_style,
            )));
            for row in wrap_text(message.content.trim_end(), text_width) {
                lines.push(Line::from(Span::styled(
                    format!("{MESSAGE_INDENT}{row}"),
                    text_style,
                )));
            }
            lines.push(Line::from(""));
        }

        if let Some(pending) = pending {
            lines.push(Line::from(vec![
                Span::styled("Assistant ", theme.assistant_prefix_style),
                Span::styled(indicator.to_string(), theme.streaming_indicator_style),
            ]));
            if !pending.is_empty() {
                for row in wrap_text(pending, text_width) {
                    lines.push(Line::from(Span::styled(
                        format!("{MESSAGE_INDENT}{row}"),
                        theme.assistant_text_style,
                    )));
                }
            }
        }

        lines
    }

    pub fn calculate_max_scroll_offset(total_lines: usize, available_height: u16) -> u16 {
        let total = u16::try_from(total_lines).unwrap_or(u16::MAX);
        total.saturating_sub(available_height)
    }
}

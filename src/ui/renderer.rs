use crate::core::app::App;
use crate::core::constants::{HEADER_HEIGHT, INDICATOR_SPACE, INPUT_AREA_HEIGHT};
use crate::ui::toast::render_toast;
use crate::utils::scroll::ScrollCalculator;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Instant;
use unicode_width::UnicodeWidthChar;

const INPUT_PLACEHOLDER: &str = "Start typing...";

pub fn ui(f: &mut Frame, app: &App) {
    let theme = &app.ui.theme;
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        area,
    );

    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(INPUT_AREA_HEIGHT),
    ])
    .split(area);

    render_header(f, app, chunks[0]);
    render_transcript(f, app, chunks[1]);
    render_input(f, app, chunks[2]);

    if let Some(toast) = &app.ui.toast {
        render_toast(f, toast, theme, area, INPUT_AREA_HEIGHT);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let status = format!(
        "theme: {} (Ctrl+T) · v{} ",
        theme.id,
        env!("CARGO_PKG_VERSION")
    );
    let [title_area, status_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(status.chars().count() as u16),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(Span::styled(" MISTRAL CHAT", theme.title_style)),
        title_area,
    );
    f.render_widget(
        Paragraph::new(Span::styled(status, theme.input_title_style)).alignment(Alignment::Right),
        status_area,
    );
}

fn render_transcript(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    if app.ui.messages.is_empty() && !app.ui.is_streaming {
        let row = Rect {
            y: area.y + area.height / 2,
            height: area.height.min(1),
            ..area
        };
        f.render_widget(
            Paragraph::new(Span::styled("Mistral Chat", theme.empty_state_style))
                .alignment(Alignment::Center),
            row,
        );
        return;
    }

    let lines = app
        .ui
        .build_display_lines(area.width, pulse_symbol(app.ui.pulse_start));
    let max_offset = ScrollCalculator::calculate_max_scroll_offset(lines.len(), area.height);
    let scroll_offset = if app.ui.auto_scroll {
        max_offset
    } else {
        app.ui.scroll_offset.min(max_offset)
    };

    f.render_widget(Paragraph::new(lines).scroll((scroll_offset, 0)), area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let (title, text_style) = if app.ui.is_streaming {
        (" Generating... ", theme.input_disabled_style)
    } else {
        (
            " Message (Enter send · Ctrl+L new chat · Ctrl+C quit) ",
            theme.input_text_style,
        )
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(Span::styled(title, theme.input_title_style));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text_width = inner.width.saturating_sub(INDICATOR_SPACE) as usize;
    let input = app.ui.get_input_text();
    let (visible, cursor_x) =
        visible_input_window(input, app.ui.get_input_cursor_position(), text_width);

    let line = if input.is_empty() && !app.ui.is_streaming {
        Line::from(Span::styled(INPUT_PLACEHOLDER, theme.input_placeholder_style))
    } else {
        Line::from(Span::styled(visible, text_style))
    };
    f.render_widget(Paragraph::new(line), inner);

    if app.ui.is_streaming {
        if inner.width > 1 {
            let indicator_area = Rect {
                x: inner.x + inner.width - 2,
                width: 1,
                height: inner.height.min(1),
                ..inner
            };
            f.render_widget(
                Paragraph::new(Span::styled(
                    pulse_symbol(app.ui.pulse_start),
                    theme.streaming_indicator_style,
                )),
                indicator_area,
            );
        }
    } else if inner.width > 0 && inner.height > 0 {
        f.set_cursor_position((inner.x + cursor_x, inner.y));
    }
}

/// Pulsing activity symbol, two cycles per second.
pub fn pulse_symbol(start: Instant) -> &'static str {
    let elapsed = start.elapsed().as_millis() as f32 / 1000.0;
    let pulse_phase = (elapsed * 2.0) % 2.0;
    let pulse_intensity = if pulse_phase < 1.0 {
        pulse_phase
    } else {
        2.0 - pulse_phase
    };

    if pulse_intensity < 0.33 {
        "○"
    } else if pulse_intensity < 0.66 {
        "◐"
    } else {
        "●"
    }
}

/// Slice of a single-line input that fits in `width` columns with the
/// cursor visible, plus the cursor column relative to that slice.
pub(crate) fn visible_input_window(text: &str, cursor: usize, width: usize) -> (String, u16) {
    let width = width.max(1);
    let char_width = |ch: char| ch.width().unwrap_or(0);
    let cursor_col: usize = text.chars().take(cursor).map(char_width).sum();
    let start_col = cursor_col.saturating_sub(width - 1);

    let mut skipped = 0usize;
    let mut visible = String::new();
    let mut visible_width = 0usize;
    for ch in text.chars() {
        let w = char_width(ch);
        if skipped < start_col {
            skipped += w;
            continue;
        }
        if visible_width + w > width {
            break;
        }
        visible.push(ch);
        visible_width += w;
    }

    let cursor_x = cursor_col.saturating_sub(skipped);
    (visible, u16::try_from(cursor_x).unwrap_or(u16::MAX))
}

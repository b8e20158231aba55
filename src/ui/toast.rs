use crate::core::app::Toast;
use crate::ui::theme::Theme;
use crate::utils::scroll::wrap_text;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TOAST_MAX_WIDTH: u16 = 46;

/// Bottom-right placement, kept clear of the `bottom_margin` rows below it.
pub fn toast_area(toast: &Toast, frame_area: Rect, bottom_margin: u16) -> Rect {
    let width = TOAST_MAX_WIDTH.min(frame_area.width.saturating_sub(2));
    let inner_width = width.saturating_sub(2) as usize;
    let text_rows = wrap_text(&toast.description, inner_width).len() as u16;
    let max_height = frame_area.height.saturating_sub(bottom_margin);
    let height = (text_rows + 2).min(max_height);

    Rect {
        x: frame_area.x + frame_area.width.saturating_sub(width + 1),
        y: frame_area.y + max_height.saturating_sub(height),
        width,
        height,
    }
}

pub fn render_toast(
    f: &mut Frame,
    toast: &Toast,
    theme: &Theme,
    frame_area: Rect,
    bottom_margin: u16,
) {
    let area = toast_area(toast, frame_area, bottom_margin);
    if area.width < 3 || area.height < 3 {
        return;
    }

    let lines: Vec<Line> = wrap_text(&toast.description, area.width.saturating_sub(2) as usize)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, theme.toast_text_style)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.toast_border_style)
        .title(Span::styled(format!(" {} ", toast.title), theme.toast_title_style))
        .style(ratatui::style::Style::default().bg(theme.background_color));

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_sits_in_bottom_right_above_margin() {
        let toast = Toast::new("Some error occurred", "short text");
        let frame = Rect::new(0, 0, 80, 24);
        let area = toast_area(&toast, frame, 3);
        assert_eq!(area.width, TOAST_MAX_WIDTH);
        assert_eq!(area.height, 3);
        assert_eq!(area.x + area.width, 79);
        assert_eq!(area.y + area.height, 21);
    }

    #[test]
    fn toast_shrinks_on_narrow_terminals() {
        let toast = Toast::new("t", "a description that needs to wrap");
        let area = toast_area(&toast, Rect::new(0, 0, 20, 10), 3);
        assert_eq!(area.width, 18);
        assert!(area.height > 3);
        assert!(area.y + area.height <= 7);
    }
}

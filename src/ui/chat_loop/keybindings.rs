//! Key and mouse bindings for the chat view.

use crate::core::app::AppAction;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

/// Lines moved per mouse wheel notch.
const WHEEL_SCROLL_LINES: u16 = 3;

/// Map a key press to the action it triggers, if any.
///
/// `page_lines` is the transcript viewport height used for PageUp/PageDown.
pub fn action_for_key(key: &KeyEvent, page_lines: u16) -> Option<AppAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let action = match key.code {
        KeyCode::Char('c') if ctrl => AppAction::Quit,
        KeyCode::Char('l') if ctrl => AppAction::NewChat,
        KeyCode::Char('t') if ctrl => AppAction::ToggleTheme,
        KeyCode::Char('a') if ctrl => AppAction::CursorHome,
        KeyCode::Char('e') if ctrl => AppAction::CursorEnd,
        KeyCode::Char(ch) if !ctrl && !alt => AppAction::InsertChar(ch),
        KeyCode::Enter => AppAction::SubmitInput,
        KeyCode::Esc => AppAction::DismissToast,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Delete => AppAction::Delete,
        KeyCode::Left => AppAction::CursorLeft,
        KeyCode::Right => AppAction::CursorRight,
        KeyCode::Home => AppAction::CursorHome,
        KeyCode::End => AppAction::ScrollToBottom,
        KeyCode::Up => AppAction::ScrollUp(1),
        KeyCode::Down => AppAction::ScrollDown(1),
        KeyCode::PageUp => AppAction::ScrollUp(page_lines.max(1)),
        KeyCode::PageDown => AppAction::ScrollDown(page_lines.max(1)),
        _ => return None,
    };
    Some(action)
}

pub fn action_for_mouse(event: &MouseEvent) -> Option<AppAction> {
    match event.kind {
        MouseEventKind::ScrollUp => Some(AppAction::ScrollUp(WHEEL_SCROLL_LINES)),
        MouseEventKind::ScrollDown => Some(AppAction::ScrollDown(WHEEL_SCROLL_LINES)),
        _ => None,
    }
}

/// Pasted text goes into a single-line input: line breaks and tabs become
/// spaces and other control characters are dropped.
pub(crate) fn sanitize_pasted_text(text: &str) -> String {
    let without_crlf = text.replace("\r\n", " ");
    without_crlf
        .chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .filter(|&c| !c.is_control())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn control_chords_map_to_commands() {
        let ctrl = KeyModifiers::CONTROL;
        assert_eq!(
            action_for_key(&key(KeyCode::Char('c'), ctrl), 10),
            Some(AppAction::Quit)
        );
        assert_eq!(
            action_for_key(&key(KeyCode::Char('l'), ctrl), 10),
            Some(AppAction::NewChat)
        );
        assert_eq!(
            action_for_key(&key(KeyCode::Char('t'), ctrl), 10),
            Some(AppAction::ToggleTheme)
        );
        assert_eq!(action_for_key(&key(KeyCode::Char('x'), ctrl), 10), None);
    }

    #[test]
    fn plain_and_shifted_characters_are_inserted() {
        assert_eq!(
            action_for_key(&key(KeyCode::Char('a'), KeyModifiers::NONE), 10),
            Some(AppAction::InsertChar('a'))
        );
        assert_eq!(
            action_for_key(&key(KeyCode::Char('A'), KeyModifiers::SHIFT), 10),
            Some(AppAction::InsertChar('A'))
        );
    }

    #[test]
    fn paging_uses_viewport_height() {
        assert_eq!(
            action_for_key(&key(KeyCode::PageUp, KeyModifiers::NONE), 18),
            Some(AppAction::ScrollUp(18))
        );
        assert_eq!(
            action_for_key(&key(KeyCode::PageDown, KeyModifiers::NONE), 0),
            Some(AppAction::ScrollDown(1))
        );
        assert_eq!(
            action_for_key(&key(KeyCode::End, KeyModifiers::CONTROL), 18),
            Some(AppAction::ScrollToBottom)
        );
    }

    #[test]
    fn enter_submits_and_escape_dismisses() {
        assert_eq!(
            action_for_key(&key(KeyCode::Enter, KeyModifiers::NONE), 10),
            Some(AppAction::SubmitInput)
        );
        assert_eq!(
            action_for_key(&key(KeyCode::Esc, KeyModifiers::NONE), 10),
            Some(AppAction::DismissToast)
        );
    }

    #[test]
    fn pasted_text_is_flattened_to_one_line() {
        assert_eq!(
            sanitize_pasted_text("line one\r\nline two\n\tend\u{7}"),
            "line one line two  end"
        );
    }
}

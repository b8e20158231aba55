use super::{App, AppAction, AppActionContext, AppCommand};
use crate::core::app::UiState;
use tracing::debug;

pub(super) fn handle_input_action(
    app: &mut App,
    action: AppAction,
    ctx: AppActionContext,
) -> Option<AppCommand> {
    let available_height = UiState::calculate_available_height(ctx.term_height);
    match action {
        AppAction::InsertChar(_)
        | AppAction::InsertText(_)
        | AppAction::Backspace
        | AppAction::Delete
        | AppAction::CursorLeft
        | AppAction::CursorRight
        | AppAction::CursorHome
        | AppAction::CursorEnd => {
            // The input line is read-only while a reply is loading.
            if !app.ui.is_streaming {
                edit_input(&mut app.ui, action);
            }
            None
        }
        AppAction::DismissToast => {
            app.ui.dismiss_toast();
            None
        }
        AppAction::NewChat => {
            if app.ui.is_streaming {
                return None;
            }
            debug!(messages = app.ui.messages.len(), "starting new chat");
            app.conversation().clear_transcript();
            None
        }
        AppAction::ToggleTheme => {
            app.ui.theme = app.ui.theme.toggled();
            Some(AppCommand::PersistTheme(app.ui.theme.id.to_string()))
        }
        AppAction::ScrollUp(lines) => {
            app.ui.scroll_up(lines, available_height, ctx.term_width);
            None
        }
        AppAction::ScrollDown(lines) => {
            app.ui.scroll_down(lines, available_height, ctx.term_width);
            None
        }
        AppAction::ScrollToBottom => {
            app.ui.scroll_to_bottom(available_height, ctx.term_width);
            None
        }
        AppAction::Quit => {
            app.ui.exit_requested = true;
            None
        }
        _ => None,
    }
}

fn edit_input(ui: &mut UiState, action: AppAction) {
    match action {
        AppAction::InsertChar(ch) => ui.insert_char(ch),
        AppAction::InsertText(text) => ui.insert_text(&text),
        AppAction::Backspace => ui.backspace(),
        AppAction::Delete => ui.delete(),
        AppAction::CursorLeft => ui.move_cursor_left(),
        AppAction::CursorRight => ui.move_cursor_right(),
        AppAction::CursorHome => ui.move_cursor_home(),
        AppAction::CursorEnd => ui.move_cursor_end(),
        _ => {}
    }
}

mod input;
mod streaming;

use tokio::sync::mpsc;

use super::App;
use crate::core::chat_stream::StreamParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    InsertChar(char),
    InsertText(String),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    SubmitInput,
    AppendResponseChunk { content: String, stream_id: u64 },
    StreamCompleted { stream_id: u64 },
    StreamErrored { message: String, stream_id: u64 },
    DismissToast,
    NewChat,
    ToggleTheme,
    ScrollUp(u16),
    ScrollDown(u16),
    ScrollToBottom,
    Quit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppActionContext {
    pub term_width: u16,
    pub term_height: u16,
}

pub struct AppActionEnvelope {
    pub action: AppAction,
    pub context: AppActionContext,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppActionEnvelope>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppActionEnvelope>) -> Self {
        Self { tx }
    }

    pub fn dispatch_many<I>(&self, actions: I, ctx: AppActionContext)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            let _ = self.tx.send(AppActionEnvelope {
                action,
                context: ctx,
            });
        }
    }
}

/// Side effects requested by an action, executed by the event loop.
pub enum AppCommand {
    SpawnStream(StreamParams),
    /// Save the named theme to the config file.
    PersistTheme(String),
}

pub fn apply_actions(
    app: &mut App,
    envelopes: impl IntoIterator<Item = AppActionEnvelope>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for envelope in envelopes {
        if let Some(cmd) = apply_action(app, envelope.action, envelope.context) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction, ctx: AppActionContext) -> Option<AppCommand> {
    match action {
        AppAction::SubmitInput
        | AppAction::AppendResponseChunk { .. }
        | AppAction::StreamCompleted { .. }
        | AppAction::StreamErrored { .. } => streaming::handle_streaming_action(app, action, ctx),

        AppAction::InsertChar(_)
        | AppAction::InsertText(_)
        | AppAction::Backspace
        | AppAction::Delete
        | AppAction::CursorLeft
        | AppAction::CursorRight
        | AppAction::CursorHome
        | AppAction::CursorEnd
        | AppAction::DismissToast
        | AppAction::NewChat
        | AppAction::ToggleTheme
        | AppAction::ScrollUp(_)
        | AppAction::ScrollDown(_)
        | AppAction::ScrollToBottom
        | AppAction::Quit => input::handle_input_action(app, action, ctx),
    }
}

use super::{App, AppAction, AppActionContext, AppCommand};
use tracing::{debug, info};

pub(super) fn handle_streaming_action(
    app: &mut App,
    action: AppAction,
    ctx: AppActionContext,
) -> Option<AppCommand> {
    match action {
        AppAction::SubmitInput => submit_input(app, ctx),
        AppAction::AppendResponseChunk { content, stream_id } => {
            if !is_live_stream(app, stream_id) {
                return None;
            }
            append_response_chunk(app, &content, ctx);
            None
        }
        AppAction::StreamCompleted { stream_id } => {
            if !is_live_stream(app, stream_id) {
                return None;
            }
            finalize_stream(app, ctx);
            None
        }
        AppAction::StreamErrored { message, stream_id } => {
            if !is_live_stream(app, stream_id) {
                return None;
            }
            app.conversation().fail_stream(message.trim());
            None
        }
        _ => None,
    }
}

/// Updates only count for the current request while it is still loading;
/// the `End` that trails an error therefore changes nothing.
fn is_live_stream(app: &App, stream_id: u64) -> bool {
    if app.is_current_stream(stream_id) && app.ui.is_streaming {
        return true;
    }
    debug!(stream_id, "ignoring update from inactive stream");
    false
}

fn submit_input(app: &mut App, ctx: AppActionContext) -> Option<AppCommand> {
    if app.ui.is_streaming || app.ui.get_input_text().is_empty() {
        return None;
    }

    let content = app.ui.take_input();
    app.ui.auto_scroll = true;
    let (prompt, stream_id) = {
        let mut conversation = app.conversation();
        let prompt = conversation.add_user_message(content);
        let stream_id = conversation.start_new_stream();
        conversation.update_scroll_position(ctx.term_width, ctx.term_height);
        (prompt, stream_id)
    };
    info!(stream_id, prompt_len = prompt.len(), "submitting prompt");

    Some(AppCommand::SpawnStream(
        app.session.build_stream_params(prompt, stream_id),
    ))
}

fn append_response_chunk(app: &mut App, chunk: &str, ctx: AppActionContext) {
    let mut conversation = app.conversation();
    conversation.append_to_response(chunk);
    conversation.update_scroll_position(ctx.term_width, ctx.term_height);
}

fn finalize_stream(app: &mut App, ctx: AppActionContext) {
    let mut conversation = app.conversation();
    conversation.finalize_response();
    conversation.update_scroll_position(ctx.term_width, ctx.term_height);
}

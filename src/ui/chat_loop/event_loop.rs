//! Event polling, dispatching, and UI rendering loop.
//!
//! Terminal input is read on a background task and turned into
//! [`AppAction`]s. Stream updates arrive on the [`ChatStreamService`]
//! channel. Both go through the same action queue, and the commands the
//! actions produce (spawning a stream, persisting the theme) are executed
//! here.

use std::{
    error::Error,
    io,
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::Size;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::core::app::{
    apply_actions, App, AppAction, AppActionContext, AppActionDispatcher, AppActionEnvelope,
    AppCommand, AppInitConfig, UiState,
};
use crate::core::chat_stream::{ChatStreamService, StreamMessage};
use crate::core::config::Config;
use crate::ui::renderer::ui;

use super::keybindings::{action_for_key, action_for_mouse, sanitize_pasted_text};
use super::lifecycle::{restore_terminal, setup_terminal, SharedTerminal};
use super::AppHandle;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

async fn is_exit_requested(app: &AppHandle) -> bool {
    app.read(|app| app.ui.exit_requested).await
}

async fn current_terminal_size(terminal: &SharedTerminal) -> Size {
    let terminal_guard = terminal.lock().await;
    terminal_guard.size().unwrap_or_default()
}

async fn try_draw_frame(
    app: &AppHandle,
    terminal: &SharedTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    let mut terminal_guard = terminal.lock().await;
    app.read(|app| terminal_guard.draw(|f| ui(f, app)).map(|_| ()))
        .await?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

struct EventProcessingOutcome {
    events_processed: bool,
    request_redraw: bool,
}

/// Translate queued terminal events into actions.
fn process_ui_events(
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    dispatcher: &AppActionDispatcher,
    term_size: Size,
) -> EventProcessingOutcome {
    let mut outcome = EventProcessingOutcome {
        events_processed: false,
        request_redraw: false,
    };
    let ctx = AppActionContext {
        term_width: term_size.width,
        term_height: term_size.height,
    };
    let page_lines = UiState::calculate_available_height(term_size.height);

    while let Ok(ev) = event_rx.try_recv() {
        outcome.events_processed = true;
        let action = match ev {
            UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                action_for_key(&key, page_lines)
            }
            UiEvent::Crossterm(Event::Mouse(mouse)) => action_for_mouse(&mouse),
            UiEvent::Crossterm(Event::Paste(text)) => {
                let sanitized_text = sanitize_pasted_text(&text);
                (!sanitized_text.is_empty()).then_some(AppAction::InsertText(sanitized_text))
            }
            UiEvent::Crossterm(Event::Resize(_, _)) => {
                outcome.request_redraw = true;
                None
            }
            UiEvent::Crossterm(_) => None,
        };

        if let Some(action) = action {
            dispatcher.dispatch_many([action], ctx);
            outcome.request_redraw = true;
        }
    }

    outcome
}

/// Forward stream messages for the current request as actions. Consecutive
/// chunks are coalesced so a burst costs one redraw.
fn process_stream_updates(
    dispatcher: &AppActionDispatcher,
    rx: &mut mpsc::UnboundedReceiver<(StreamMessage, u64)>,
    term_width: u16,
    term_height: u16,
    current_stream_id: u64,
) -> bool {
    let mut received_any = false;
    let mut coalesced_chunks = String::new();
    let mut followup_actions = Vec::new();

    while let Ok((message, msg_stream_id)) = rx.try_recv() {
        if msg_stream_id != current_stream_id {
            continue;
        }

        match message {
            StreamMessage::Chunk(content) => {
                coalesced_chunks.push_str(&content);
            }
            StreamMessage::Error(err) => {
                followup_actions.push(AppAction::StreamErrored {
                    message: err,
                    stream_id: msg_stream_id,
                });
            }
            StreamMessage::End => followup_actions.push(AppAction::StreamCompleted {
                stream_id: msg_stream_id,
            }),
        }

        received_any = true;
    }

    if !received_any {
        return false;
    }

    let ctx = AppActionContext {
        term_width,
        term_height,
    };

    let mut actions = Vec::with_capacity(1 + followup_actions.len());
    if !coalesced_chunks.is_empty() {
        actions.push(AppAction::AppendResponseChunk {
            content: coalesced_chunks,
            stream_id: current_stream_id,
        });
    }
    actions.extend(followup_actions);

    if !actions.is_empty() {
        dispatcher.dispatch_many(actions, ctx);
    }

    true
}

async fn drain_action_queue(
    app: &AppHandle,
    stream_service: &ChatStreamService,
    theme_writer: Option<&ThemeWriter>,
    action_rx: &mut mpsc::UnboundedReceiver<AppActionEnvelope>,
) -> bool {
    let mut pending = Vec::new();
    while let Ok(envelope) = action_rx.try_recv() {
        pending.push(envelope);
    }

    if pending.is_empty() {
        return false;
    }

    let commands = app.update(|app| apply_actions(app, pending)).await;
    for cmd in commands {
        match cmd {
            AppCommand::SpawnStream(params) => {
                stream_service.spawn_stream(params);
            }
            AppCommand::PersistTheme(theme) => match theme_writer {
                Some(writer) => writer.save(theme),
                None => debug!(%theme, "no config file, theme not saved"),
            },
        }
    }
    true
}

/// Writes theme choices to the config file one at a time, in the order they
/// were made. Choices queued behind a running write collapse to the newest.
pub struct ThemeWriter {
    tx: mpsc::UnboundedSender<String>,
    handle: tokio::task::JoinHandle<()>,
}

impl ThemeWriter {
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let handle = tokio::spawn(async move {
            while let Some(mut theme) = rx.recv().await {
                while let Ok(newer) = rx.try_recv() {
                    theme = newer;
                }
                let path = path.clone();
                if let Err(e) =
                    tokio::task::spawn_blocking(move || persist_theme(path, theme)).await
                {
                    warn!(error = %e, "theme writer task failed");
                }
            }
        });
        Self { tx, handle }
    }

    pub fn save(&self, theme: String) {
        let _ = self.tx.send(theme);
    }

    /// Wait for queued writes to land.
    pub async fn finish(self) {
        drop(self.tx);
        let _ = self.handle.await;
    }
}

fn persist_theme(path: PathBuf, theme: String) {
    let result = Config::load_from_path(&path)
        .map_err(|e| -> Box<dyn Error> { Box::new(e) })
        .and_then(|mut config| {
            config.theme = Some(theme.clone());
            config.save_to_path(&path)
        });
    match result {
        Ok(()) => debug!(%theme, "saved theme to config"),
        Err(e) => warn!(%theme, error = %e, "failed to save theme to config"),
    }
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

pub async fn run_chat(init: AppInitConfig, config: Config) -> Result<(), Box<dyn Error>> {
    info!(base_url = %init.base_url, "starting chat view");
    let app = AppHandle::new(Arc::new(Mutex::new(App::new(init, &config)?)));

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppActionEnvelope>();
    let action_dispatcher = AppActionDispatcher::new(action_tx);

    let terminal = setup_terminal()?;

    let (stream_service, mut rx) = ChatStreamService::new();
    let theme_writer = app
        .read(|app| app.session.config_path.clone())
        .await
        .map(ThemeWriter::spawn);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    const MAX_FPS: u64 = 60;
    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;
    let mut indicator_visible = false;
    let mut last_indicator_frame = Instant::now() - frame_duration;

    let result: Result<(), Box<dyn Error>> = 'main_loop: loop {
        if is_exit_requested(&app).await {
            break 'main_loop Ok(());
        }

        if let Err(e) = try_draw_frame(
            &app,
            &terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        )
        .await
        {
            break 'main_loop Err(e.into());
        }

        let term_size = current_terminal_size(&terminal).await;

        let event_outcome = process_ui_events(&mut event_rx, &action_dispatcher, term_size);
        if event_outcome.request_redraw {
            request_redraw = true;
        }

        let current_stream_id = app.read(|app| app.session.current_stream_id).await;
        let received_any = process_stream_updates(
            &action_dispatcher,
            &mut rx,
            term_size.width,
            term_size.height,
            current_stream_id,
        );
        if received_any {
            request_redraw = true;
        }

        let actions_applied = drain_action_queue(
            &app,
            &stream_service,
            theme_writer.as_ref(),
            &mut action_rx,
        )
        .await;
        if actions_applied {
            request_redraw = true;
        }

        let indicator_now = app.read(|app| app.ui.is_streaming).await;
        if indicator_now != indicator_visible {
            indicator_visible = indicator_now;
            request_redraw = true;
        }

        if indicator_now {
            let now = Instant::now();
            if now.duration_since(last_indicator_frame) >= frame_duration {
                request_redraw = true;
                last_indicator_frame = now;
            }
        }

        let idle = !event_outcome.events_processed && !received_any && !request_redraw;

        if idle {
            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    };

    event_reader_handle.abort();
    restore_terminal(&terminal).await?;
    if let Some(writer) = theme_writer {
        writer.finish().await;
    }
    info!("chat view closed");

    result
}

#[cfg(test)]
#[path = "event_loop_tests.rs"]
mod tests;

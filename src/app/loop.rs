use crate::app::{
    action::Action, command::Command, features::handler, input::map_event_to_action, reducer,
    state::AppState, ui,
};
use crate::domain::document::MarkdownDocument;
use crate::domain::store::DocumentStore;
use crate::infrastructure::watcher::DocumentWatcher;

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(250);
const WATCH_DEBOUNCE: Duration = Duration::from_millis(300);
const TITLE_REFRESH_DELAY: Duration = Duration::from_millis(100);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    store: Arc<dyn DocumentStore>,
    files: Vec<PathBuf>,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, store, files, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    store: Arc<dyn DocumentStore>,
    files: Vec<PathBuf>,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);

    // Actions queued behind the current one. Drained before new input.
    let mut deferred = VecDeque::new();

    // Document watcher
    let (change_tx, change_rx) = mpsc::channel(64);
    let mut watcher = match DocumentWatcher::new(change_tx) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            tracing::warn!(error = %e, "file watching unavailable");
            None
        }
    };
    spawn_change_debouncer(change_rx, action_tx.clone());

    // Initial Load
    if files.is_empty() {
        if app_state.workspace.is_empty() {
            app_state.open_document(MarkdownDocument::default());
        }
    } else {
        for path in files {
            handler::handle_command(Command::Open(path), store.clone(), action_tx.clone())?;
        }
    }
    collect_surface_signals(&mut app_state, &mut deferred);

    loop {
        // --- 1. Render ---
        terminal.draw(|f| {
            ui::draw(f, &mut app_state);
        })?;

        // --- 2. Event Handling (TEA Runtime) ---
        let action = if let Some(action) = deferred.pop_front() {
            Some(action)
        } else {
            tokio::select! {
                _ = interval.tick() => Some(Action::Tick),

                // User Input
                Some(res) = event_rx.recv() => {
                    let event = res?;
                    map_event_to_action(event, &app_state, terminal.size()?)
                },

                // Async Results
                Some(a) = action_rx.recv() => Some(a),
            }
        };

        // --- 3. Update (Reducer) ---
        if let Some(action) = action {
            let command = step(&mut app_state, action, &mut deferred);

            if app_state.should_quit {
                break;
            }

            if let Some(cmd) = command {
                match cmd {
                    Command::SettleRemoteUpdate(window) => {
                        deferred.push_back(Action::RemoteUpdateSettled(window));
                    }
                    Command::RefreshTitlesLater => {
                        let tx = action_tx.clone();
                        tokio::spawn(async move {
                            tokio::time::sleep(TITLE_REFRESH_DELAY).await;
                            let _ = tx.send(Action::RefreshTabTitles).await;
                        });
                    }
                    Command::Watch(path) => {
                        if let Some(watcher) = &mut watcher {
                            watcher.watch(&path);
                        }
                    }
                    Command::Unwatch(path) => {
                        if let Some(watcher) = &mut watcher {
                            watcher.unwatch(&path);
                        }
                    }
                    other_cmd => {
                        handler::handle_command(other_cmd, store.clone(), action_tx.clone())?;
                    }
                }
            }
        }
    }

    tracing::info!("editor loop finished");
    Ok(())
}

/// One reducer pass plus the bridge work that must follow it: native text
/// changes are pushed to their surfaces, and whatever the surfaces reported
/// is queued to run next.
pub(crate) fn step(
    app_state: &mut AppState,
    action: Action,
    deferred: &mut VecDeque<Action>,
) -> Option<Command> {
    let command = reducer::update(app_state, action);
    app_state.workspace.reconcile();
    collect_surface_signals(app_state, deferred);
    command
}

fn collect_surface_signals(app_state: &mut AppState, deferred: &mut VecDeque<Action>) {
    for (window, signal) in app_state.workspace.drain_surface_signals() {
        deferred.push_back(Action::Surface(window, signal));
    }
}

/// Coalesces bursts of change events per path into one notification.
fn spawn_change_debouncer(mut change_rx: mpsc::Receiver<PathBuf>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        let mut pending: HashSet<PathBuf> = HashSet::new();

        loop {
            if pending.is_empty() {
                match change_rx.recv().await {
                    Some(path) => {
                        pending.insert(path);
                    }
                    None => break,
                }
            } else {
                tokio::select! {
                    received = change_rx.recv() => match received {
                        Some(path) => {
                            pending.insert(path);
                        }
                        None => break,
                    },
                    () = tokio::time::sleep(WATCH_DEBOUNCE) => {
                        for path in pending.drain() {
                            tracing::debug!(path = %path.display(), "document changed on disk");
                            if tx.send(Action::ExternalChangeDetected(path)).await.is_err() {
                                return;
                            }
                        }
                    }
                }
            }
        }
    });
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;

use super::{
    action::{Action, UpdateResult},
    command::Command,
    features,
    state::{AppMode, AppState, PendingDiscard},
};
use std::time::{Duration, Instant};

const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    if cancels_pending_discard(&action) {
        state.pending_discard = None;
    }

    // --- Features ---
    let features: [fn(&mut AppState, &Action) -> UpdateResult; 4] = [
        features::palette::update,
        features::tabs::update,
        features::documents::update,
        features::editor::update,
    ];
    for feature in features {
        if let UpdateResult::Handled(command) = feature(state, &action) {
            return command;
        }
    }

    match action {
        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
            if let Some(since) = state.status_clear_time {
                if since.elapsed() >= STATUS_TIMEOUT {
                    state.status_message = None;
                    state.status_clear_time = None;
                }
            }
        }
        Action::Quit => {
            if state.workspace.has_unsaved_changes()
                && state.pending_discard != Some(PendingDiscard::Quit)
            {
                let hint = state.keymap.label('q', false);
                state.pending_discard = Some(PendingDiscard::Quit);
                state.set_status(format!("Unsaved changes. Press {hint} again to quit"));
            } else {
                state.should_quit = true;
            }
        }
        Action::CancelMode => {
            features::documents::close_prompt(state);
            state.command_palette = None;
            state.last_error = None;
            state.mode = AppMode::Editing;
        }
        Action::DismissError => {
            state.last_error = None;
        }
        other => {
            tracing::trace!(action = ?other, "unhandled action");
        }
    }

    None
}

/// A discard armed by the first press only survives until the user does
/// something else.
fn cancels_pending_discard(action: &Action) -> bool {
    !matches!(
        action,
        Action::Tick
            | Action::Quit
            | Action::CloseTab
            | Action::FocusChanged
            | Action::Resize(_, _)
            | Action::RefreshTabTitles
            | Action::Surface(_, _)
            | Action::RemoteUpdateSettled(_)
            | Action::ExternalChangeDetected(_)
            | Action::DocumentOpened(_)
            | Action::DocumentReloaded(_, _)
            | Action::DocumentSaved(_, _, _)
            | Action::OperationStarted(_)
            | Action::ErrorOccurred(_)
    )
}

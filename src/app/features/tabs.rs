use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppState, PendingDiscard},
};
use crate::domain::document::MarkdownDocument;
use crate::domain::tabs::{refresh_tab_titles, switch_to_tab};
use crate::domain::window::WindowHost;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::SwitchToTab(number) => {
            if switch_to_tab(&mut state.workspace, *number) {
                UpdateResult::Handled(focus_changed(state))
            } else {
                tracing::debug!(number, "no tab at that position");
                UpdateResult::Handled(None)
            }
        }
        Action::ActivateTab(window) => {
            if state.workspace.key_window() == Some(*window) {
                return UpdateResult::Handled(None);
            }
            state.workspace.activate(*window);
            UpdateResult::Handled(focus_changed(state))
        }
        Action::NextTab => {
            state.workspace.cycle(1);
            UpdateResult::Handled(focus_changed(state))
        }
        Action::PrevTab => {
            state.workspace.cycle(-1);
            UpdateResult::Handled(focus_changed(state))
        }
        Action::CloseTab => UpdateResult::Handled(close_active(state)),
        Action::RefreshTabTitles => {
            refresh_tab_titles(&mut state.workspace);
            UpdateResult::Handled(None)
        }
        Action::FocusChanged | Action::Resize(_, _) => {
            UpdateResult::Handled(focus_changed(state))
        }
        _ => UpdateResult::NotHandled,
    }
}

/// Renumbers now and once more after focus has settled.
pub fn focus_changed(state: &mut AppState) -> Option<Command> {
    refresh_tab_titles(&mut state.workspace);
    Some(Command::RefreshTitlesLater)
}

fn close_active(state: &mut AppState) -> Option<Command> {
    let window = state.workspace.active()?;
    let id = window.id;

    if window.document.dirty && state.pending_discard != Some(PendingDiscard::CloseTab(id)) {
        let name = window.document.display_name();
        let hint = state.keymap.label('w', false);
        state.pending_discard = Some(PendingDiscard::CloseTab(id));
        state.set_status(format!("{name} has unsaved changes. Press {hint} again to discard"));
        return None;
    }

    state.pending_discard = None;
    let closed = state.workspace.close(id)?;
    tracing::info!(window = %id, "closed tab");

    // There is always at least one tab to type into.
    if state.workspace.is_empty() {
        state.open_document(MarkdownDocument::default());
    }
    refresh_tab_titles(&mut state.workspace);

    // Only unwatch when no other tab still shows the same file.
    match closed.document.path {
        Some(path) if state.workspace.find_by_path(&path).is_none() => {
            Some(Command::Unwatch(path))
        }
        _ => Some(Command::RefreshTitlesLater),
    }
}

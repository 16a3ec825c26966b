use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    reducer,
    state::{AppMode, AppState, ErrorSeverity, ErrorState, InputState, PromptKind},
};
use crate::domain::document::MarkdownDocument;
use crate::domain::window::WindowHost;
use std::path::PathBuf;

use super::tabs::focus_changed;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::NewDocument => {
            state.open_document(MarkdownDocument::default());
            UpdateResult::Handled(focus_changed(state))
        }
        Action::OpenFileIntent => {
            open_prompt(state, PromptKind::OpenFile, String::new());
            UpdateResult::Handled(None)
        }
        Action::OpenFile(path) => {
            // Already open: just bring it forward.
            if let Some(id) = state.workspace.find_by_path(path) {
                state.workspace.activate(id);
                return UpdateResult::Handled(focus_changed(state));
            }
            UpdateResult::Handled(Some(Command::Open(path.clone())))
        }
        Action::Save => {
            let Some(window) = state.workspace.active() else {
                return UpdateResult::Handled(None);
            };
            match &window.document.path {
                Some(path) => UpdateResult::Handled(Some(Command::Save {
                    window: window.id,
                    path: path.clone(),
                    text: window.document.text.clone(),
                })),
                None => {
                    open_prompt(state, PromptKind::SaveAs, String::new());
                    UpdateResult::Handled(None)
                }
            }
        }
        Action::SaveAsIntent => {
            let initial = state
                .workspace
                .active()
                .and_then(|w| w.document.path.as_ref())
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            open_prompt(state, PromptKind::SaveAs, initial);
            UpdateResult::Handled(None)
        }
        Action::SaveAs(path) => {
            let Some(window) = state.workspace.active() else {
                return UpdateResult::Handled(None);
            };
            UpdateResult::Handled(Some(Command::Save {
                window: window.id,
                path: path.clone(),
                text: window.document.text.clone(),
            }))
        }
        Action::PromptInput(key) => {
            if let Some(input) = &mut state.input {
                input.text_area.input(*key);
            }
            UpdateResult::Handled(None)
        }
        Action::PromptSubmit => {
            let Some(input) = &state.input else {
                return UpdateResult::Handled(None);
            };
            // An empty prompt stays open.
            let Some(value) = input.value() else {
                return UpdateResult::Handled(None);
            };
            let next = match input.kind {
                PromptKind::OpenFile => Action::OpenFile(PathBuf::from(value)),
                PromptKind::SaveAs => Action::SaveAs(PathBuf::from(value)),
            };
            close_prompt(state);
            UpdateResult::Handled(reducer::update(state, next))
        }

        // --- Async Results ---
        Action::DocumentOpened(document) => {
            let document = (**document).clone();
            if let Some(id) = document
                .path
                .as_deref()
                .and_then(|p| state.workspace.find_by_path(p))
            {
                state.workspace.activate(id);
                return UpdateResult::Handled(focus_changed(state));
            }
            let name = document.display_name();
            let path = document.path.clone();
            let id = state.open_document(document);
            tracing::info!(window = %id, name, "opened document");
            state.set_status(format!("Opened {name}"));
            focus_changed(state);
            UpdateResult::Handled(path.map(Command::Watch))
        }
        Action::DocumentSaved(id, path, text) => {
            let Some(window) = state.workspace.get_mut(*id) else {
                return UpdateResult::Handled(None);
            };
            window.document.bind(path.clone());
            // Edits made while the write was in flight keep the tab dirty.
            window.document.dirty = window.document.text != *text;
            window.on_disk = Some(text.clone());
            window.title = window.document.display_name();
            let name = window.title.clone();
            state.set_status(format!("Saved {name}"));
            focus_changed(state);
            UpdateResult::Handled(Some(Command::Watch(path.clone())))
        }
        Action::DocumentReloaded(id, document) => {
            let Some(window) = state.workspace.get_mut(*id) else {
                return UpdateResult::Handled(None);
            };
            // Our own saves come back through the watcher too.
            if window.on_disk.as_deref() == Some(document.text.as_str()) {
                tracing::debug!(window = %id, "disk content unchanged");
                return UpdateResult::Handled(None);
            }
            let name = window.document.display_name();
            if window.document.dirty {
                state.set_status(format!("{name} changed on disk; keeping your unsaved edits"));
                return UpdateResult::Handled(None);
            }
            window.on_disk = Some(document.text.clone());
            if window.document.text != document.text {
                // A native change: the bridge pushes it to the surface.
                window.document.text = document.text.clone();
                state.set_status(format!("Reloaded {name} from disk"));
            }
            UpdateResult::Handled(None)
        }
        Action::ExternalChangeDetected(path) => {
            // Whether anything really changed is only known once the file
            // is read back.
            let id = state.workspace.find_by_path(path);
            UpdateResult::Handled(id.map(|id| Command::Reload(id, path.clone())))
        }
        Action::OperationStarted(message) => {
            state.set_status(message.clone());
            UpdateResult::Handled(None)
        }
        Action::ErrorOccurred(message) => {
            tracing::error!(message, "operation failed");
            state.last_error = Some(ErrorState::new(message.clone(), ErrorSeverity::Error));
            if state.workspace.is_empty() {
                state.open_document(MarkdownDocument::default());
            }
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

fn open_prompt(state: &mut AppState, kind: PromptKind, initial: String) {
    state.command_palette = None;
    state.input = Some(InputState::new(kind, &initial));
    state.mode = AppMode::Prompt;
}

pub fn close_prompt(state: &mut AppState) {
    state.input = None;
    if state.mode == AppMode::Prompt {
        state.mode = AppMode::Editing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::window::WindowId;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::path::Path;

    fn type_into_prompt(state: &mut AppState, s: &str) {
        for c in s.chars() {
            reducer::update(
                state,
                Action::PromptInput(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
            );
        }
    }

    fn opened(path: &str, text: &str) -> Action {
        let mut doc = MarkdownDocument::new(text.to_string());
        doc.bind(PathBuf::from(path));
        Action::DocumentOpened(Box::new(doc))
    }

    #[test]
    fn test_save_untitled_prompts_for_path() {
        let mut state = AppState::default();
        state.open_document(MarkdownDocument::new("draft".to_string()));

        assert_eq!(reducer::update(&mut state, Action::Save), None);
        assert_eq!(state.mode, AppMode::Prompt);
        assert_eq!(state.input.as_ref().unwrap().kind, PromptKind::SaveAs);

        type_into_prompt(&mut state, "draft.md");
        let cmd = reducer::update(&mut state, Action::PromptSubmit);
        assert_eq!(
            cmd,
            Some(Command::Save {
                window: WindowId(1),
                path: PathBuf::from("draft.md"),
                text: "draft".to_string(),
            })
        );
        assert_eq!(state.mode, AppMode::Editing);
        assert!(state.input.is_none());
    }

    #[test]
    fn test_empty_prompt_stays_open() {
        let mut state = AppState::default();
        reducer::update(&mut state, Action::OpenFileIntent);
        type_into_prompt(&mut state, "   ");
        assert_eq!(reducer::update(&mut state, Action::PromptSubmit), None);
        assert_eq!(state.mode, AppMode::Prompt);
    }

    #[test]
    fn test_open_file_prompt_issues_open() {
        let mut state = AppState::default();
        reducer::update(&mut state, Action::OpenFileIntent);
        type_into_prompt(&mut state, "notes.md");
        assert_eq!(
            reducer::update(&mut state, Action::PromptSubmit),
            Some(Command::Open(PathBuf::from("notes.md")))
        );
    }

    #[test]
    fn test_document_opened_adds_tab_and_watches() {
        let mut state = AppState::default();
        state.open_document(MarkdownDocument::default());

        let cmd = reducer::update(&mut state, opened("/tmp/a.md", "# A"));
        assert_eq!(cmd, Some(Command::Watch(PathBuf::from("/tmp/a.md"))));
        assert_eq!(state.workspace.len(), 2);
        assert_eq!(state.workspace.active().unwrap().title, "2. a.md");
    }

    #[test]
    fn test_opening_open_file_focuses_existing_tab() {
        let mut state = AppState::default();
        reducer::update(&mut state, opened("/tmp/a.md", "# A"));
        state.open_document(MarkdownDocument::default());

        reducer::update(&mut state, opened("/tmp/a.md", "# A"));
        assert_eq!(state.workspace.len(), 2);
        assert_eq!(state.workspace.active_id(), Some(WindowId(1)));

        let cmd = reducer::update(&mut state, Action::OpenFile(PathBuf::from("/tmp/a.md")));
        assert_eq!(cmd, Some(Command::RefreshTitlesLater));
    }

    #[test]
    fn test_document_saved_binds_path_and_clears_dirty() {
        let mut state = AppState::default();
        let id = state.open_document(MarkdownDocument::new("text".to_string()));
        state.workspace.get_mut(id).unwrap().document.dirty = true;

        let cmd = reducer::update(
            &mut state,
            Action::DocumentSaved(id, PathBuf::from("/tmp/b.md"), "text".to_string()),
        );
        let window = state.workspace.get(id).unwrap();
        assert!(!window.document.dirty);
        assert_eq!(window.title, "b.md");
        assert_eq!(window.document.path.as_deref(), Some(Path::new("/tmp/b.md")));
        assert_eq!(cmd, Some(Command::Watch(PathBuf::from("/tmp/b.md"))));
    }

    #[test]
    fn test_edits_during_save_keep_dirty() {
        let mut state = AppState::default();
        let id = state.open_document(MarkdownDocument::new("newer".to_string()));
        state.workspace.get_mut(id).unwrap().document.dirty = true;
        reducer::update(
            &mut state,
            Action::DocumentSaved(id, PathBuf::from("/tmp/b.md"), "older".to_string()),
        );
        assert!(state.workspace.get(id).unwrap().document.dirty);
    }

    #[test]
    fn test_external_change_reloads_clean_document() {
        let mut state = AppState::default();
        reducer::update(&mut state, opened("/tmp/a.md", "# A"));
        let path = PathBuf::from("/tmp/a.md");

        let cmd = reducer::update(&mut state, Action::ExternalChangeDetected(path.clone()));
        assert_eq!(cmd, Some(Command::Reload(WindowId(1), path.clone())));

        let mut fresh = MarkdownDocument::new("# B".to_string());
        fresh.bind(path);
        reducer::update(&mut state, Action::DocumentReloaded(WindowId(1), Box::new(fresh)));
        assert_eq!(state.workspace.get(WindowId(1)).unwrap().document.text, "# B");
    }

    fn reloaded(path: &str, text: &str) -> Action {
        let mut doc = MarkdownDocument::new(text.to_string());
        doc.bind(PathBuf::from(path));
        Action::DocumentReloaded(WindowId(1), Box::new(doc))
    }

    #[test]
    fn test_external_change_of_dirty_document_only_warns() {
        let mut state = AppState::default();
        reducer::update(&mut state, opened("/tmp/a.md", "# A"));
        state.workspace.active_mut().unwrap().document.text = "# A edited".to_string();
        state.workspace.active_mut().unwrap().document.dirty = true;

        let cmd = reducer::update(
            &mut state,
            Action::ExternalChangeDetected(PathBuf::from("/tmp/a.md")),
        );
        assert_eq!(cmd, Some(Command::Reload(WindowId(1), PathBuf::from("/tmp/a.md"))));

        reducer::update(&mut state, reloaded("/tmp/a.md", "# Someone else"));
        let window = state.workspace.get(WindowId(1)).unwrap();
        assert_eq!(window.document.text, "# A edited");
        assert!(state.status_message.as_deref().unwrap().contains("changed on disk"));
    }

    #[test]
    fn test_own_save_seen_by_watcher_is_not_an_external_change() {
        let mut state = AppState::default();
        let id = state.open_document(MarkdownDocument::new("draft".to_string()));
        reducer::update(
            &mut state,
            Action::DocumentSaved(id, PathBuf::from("/tmp/a.md"), "draft".to_string()),
        );
        state.status_message = None;

        // Typing right after the save, before the watcher reports the write.
        let window = state.workspace.get_mut(id).unwrap();
        window.document.text = "draft, continued".to_string();
        window.document.dirty = true;

        let cmd = reducer::update(
            &mut state,
            Action::ExternalChangeDetected(PathBuf::from("/tmp/a.md")),
        );
        assert_eq!(cmd, Some(Command::Reload(id, PathBuf::from("/tmp/a.md"))));
        reducer::update(&mut state, reloaded("/tmp/a.md", "draft"));

        assert_eq!(state.status_message, None);
        let window = state.workspace.get(id).unwrap();
        assert_eq!(window.document.text, "draft, continued");
        assert!(window.document.dirty);
    }

    #[test]
    fn test_unchanged_reload_of_clean_document_is_silent() {
        let mut state = AppState::default();
        reducer::update(&mut state, opened("/tmp/a.md", "# A"));
        state.status_message = None;

        reducer::update(&mut state, reloaded("/tmp/a.md", "# A"));
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn test_unknown_path_change_is_ignored() {
        let mut state = AppState::default();
        state.open_document(MarkdownDocument::default());
        let cmd = reducer::update(
            &mut state,
            Action::ExternalChangeDetected(PathBuf::from("/tmp/elsewhere.md")),
        );
        assert_eq!(cmd, None);
    }

    #[test]
    fn test_error_occurred_sets_error_with_suggestions() {
        let mut state = AppState::default();
        reducer::update(
            &mut state,
            Action::ErrorOccurred(
                "/tmp/x.md could not be read: the file is corrupt or not valid UTF-8".to_string(),
            ),
        );
        let error = state.last_error.as_ref().unwrap();
        assert_eq!(error.severity, ErrorSeverity::Error);
        assert!(!error.suggestions.is_empty());
        // Failing to open the only file still leaves a tab to type into.
        assert_eq!(state.workspace.len(), 1);
    }
}

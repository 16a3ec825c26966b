use crate::app::{
    action::{Action, UpdateResult},
    command_palette::build_commands,
    reducer,
    state::{AppMode, AppState, PaletteState},
};
use crossterm::event::{KeyCode, KeyModifiers};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::OpenPalette => {
            // Rebuilt on every open so tab entries reflect the current group.
            let items = build_commands(&state.workspace, &state.keymap);
            state.command_palette = Some(PaletteState::new(items));
            state.input = None;
            state.last_error = None;
            state.mode = AppMode::CommandPalette;
            UpdateResult::Handled(None)
        }
        Action::ClosePalette => {
            close(state);
            UpdateResult::Handled(None)
        }
        Action::PaletteNext => {
            if let Some(palette) = &mut state.command_palette {
                palette.move_down();
            }
            UpdateResult::Handled(None)
        }
        Action::PalettePrev => {
            if let Some(palette) = &mut state.command_palette {
                palette.move_up();
            }
            UpdateResult::Handled(None)
        }
        Action::PaletteExecute => {
            let chosen = state
                .command_palette
                .as_ref()
                .and_then(PaletteState::execute_selected);
            UpdateResult::Handled(run(state, chosen))
        }
        Action::PaletteExecuteIndex(index) => {
            let chosen = state
                .command_palette
                .as_ref()
                .and_then(|p| p.execute_index(*index));
            UpdateResult::Handled(run(state, chosen))
        }
        Action::PaletteInput(key) => {
            if let Some(palette) = &mut state.command_palette {
                let chorded = key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);
                match key.code {
                    KeyCode::Char(c) if !chorded => palette.push_char(c),
                    KeyCode::Backspace => palette.pop_char(),
                    _ => {}
                }
            }
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

fn close(state: &mut AppState) {
    state.command_palette = None;
    if state.mode == AppMode::CommandPalette {
        state.mode = AppMode::Editing;
    }
}

/// The palette closes before the chosen action runs, so actions that open
/// another overlay are not undone by the close.
fn run(state: &mut AppState, chosen: Option<Action>) -> Option<crate::app::command::Command> {
    close(state);
    let action = chosen?;
    tracing::debug!(?action, "palette command");
    reducer::update(state, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::command::Command;
    use crate::domain::document::MarkdownDocument;
    use crate::domain::tabs::refresh_tab_titles;
    use crate::domain::window::WindowId;
    use crossterm::event::KeyEvent;

    fn typed(state: &mut AppState, s: &str) {
        for c in s.chars() {
            update(
                state,
                &Action::PaletteInput(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
            );
        }
    }

    #[test]
    fn test_open_builds_registry_from_tabs() {
        let mut state = AppState::default();
        state.open_document(MarkdownDocument::default());
        state.open_document(MarkdownDocument::default());
        refresh_tab_titles(&mut state.workspace);

        update(&mut state, &Action::OpenPalette);

        let palette = state.command_palette.as_ref().unwrap();
        // Two tabs plus the seven editing commands.
        assert_eq!(palette.items().len(), 9);
        assert_eq!(palette.items()[0].title, "Untitled");
        assert_eq!(palette.items()[0].action, Action::ActivateTab(WindowId(1)));
        assert_eq!(state.mode, AppMode::CommandPalette);
    }

    #[test]
    fn test_single_tab_has_no_tab_entries() {
        let mut state = AppState::default();
        state.open_document(MarkdownDocument::default());
        update(&mut state, &Action::OpenPalette);
        assert_eq!(state.command_palette.as_ref().unwrap().items().len(), 7);
    }

    #[test]
    fn test_typing_filters_and_execute_runs_item() {
        let mut state = AppState::default();
        state.open_document(MarkdownDocument::new("word".to_string()));
        update(&mut state, &Action::OpenPalette);
        typed(&mut state, "bo");

        let palette = state.command_palette.as_ref().unwrap();
        let titles: Vec<_> = palette.filtered_items().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Bold"]);

        update(&mut state, &Action::PaletteExecute);
        assert!(!state.is_palette_visible());
        assert_eq!(state.mode, AppMode::Editing);
    }

    #[test]
    fn test_chorded_keys_do_not_reach_query() {
        let mut state = AppState::default();
        update(&mut state, &Action::OpenPalette);
        update(
            &mut state,
            &Action::PaletteInput(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::CONTROL)),
        );
        assert_eq!(state.command_palette.as_ref().unwrap().query(), "");
    }

    #[test]
    fn test_execute_with_no_results_just_closes() {
        let mut state = AppState::default();
        update(&mut state, &Action::OpenPalette);
        typed(&mut state, "zzzz");
        let result = update(&mut state, &Action::PaletteExecute);
        assert!(matches!(result, UpdateResult::Handled(None)));
        assert!(!state.is_palette_visible());
    }

    #[test]
    fn test_execute_open_file_leaves_prompt_open() {
        let mut state = AppState::default();
        update(&mut state, &Action::OpenPalette);
        typed(&mut state, "open");
        update(&mut state, &Action::PaletteExecute);
        assert_eq!(state.mode, AppMode::Prompt);
        assert!(state.input.is_some());
    }

    #[test]
    fn test_clicked_row_runs_that_row() {
        let mut state = AppState::default();
        let id = state.open_document(MarkdownDocument::default());
        state.workspace.get_mut(id).unwrap().document.path = Some("notes.md".into());
        update(&mut state, &Action::OpenPalette);
        // New Document, Open File…, Save
        let result = update(&mut state, &Action::PaletteExecuteIndex(2));
        assert!(matches!(
            result,
            UpdateResult::Handled(Some(Command::Save { .. }))
        ));
    }
}

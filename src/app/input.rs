use crate::app::{
    action::Action,
    router::{route_key, KeyRoute, RouterState},
    state::{AppMode, AppState},
    ui,
};
use crate::components::header::tab_at;
use crate::components::modals::{command_palette::hit_test, PaletteHit};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Rect, Size};

const SCROLL_ROWS: i16 = 3;

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    match event {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            let router_state = if app_state.is_palette_visible() {
                RouterState::PaletteActive
            } else {
                RouterState::Idle
            };
            match route_key(&key, router_state, &app_state.keymap) {
                KeyRoute::Consumed(action) => action,
                KeyRoute::Forward => map_forwarded_key(key, app_state),
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse, app_state, terminal_size),
        Event::Resize(w, h) => Some(Action::Resize(w, h)),
        Event::FocusGained | Event::FocusLost => Some(Action::FocusChanged),
        Event::Paste(_) => None,
    }
}

fn map_forwarded_key(key: KeyEvent, app_state: &AppState<'_>) -> Option<Action> {
    if app_state.mode == AppMode::CommandPalette {
        return Some(Action::PaletteInput(key));
    }

    // The error overlay swallows typing until it is dismissed.
    if app_state.last_error.is_some() {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::DismissError),
            _ => app_state.keymap.get_action(key),
        };
    }

    if let Some(action) = app_state.keymap.get_action(key) {
        return Some(action);
    }

    match app_state.mode {
        AppMode::Prompt => match key.code {
            KeyCode::Esc => Some(Action::CancelMode),
            KeyCode::Enter => Some(Action::PromptSubmit),
            _ => Some(Action::PromptInput(key)),
        },
        AppMode::Editing => match key.code {
            KeyCode::Esc => Some(Action::CancelMode),
            _ => Some(Action::EditorInput(key)),
        },
        AppMode::CommandPalette => None,
    }
}

fn map_mouse(mouse: MouseEvent, app_state: &AppState<'_>, terminal_size: Size) -> Option<Action> {
    let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);

    if let Some(palette) = &app_state.command_palette {
        return match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match hit_test(palette, area, mouse.column, mouse.row) {
                    PaletteHit::Row(index) => Some(Action::PaletteExecuteIndex(index)),
                    PaletteHit::Inside => None,
                    PaletteHit::Outside => Some(Action::ClosePalette),
                }
            }
            MouseEventKind::ScrollUp => Some(Action::PalettePrev),
            MouseEventKind::ScrollDown => Some(Action::PaletteNext),
            _ => None,
        };
    }

    // Prompts and errors are keyboard-only.
    if app_state.mode != AppMode::Editing || app_state.last_error.is_some() {
        return None;
    }

    let layout = ui::get_layout(area);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if mouse.row == layout.header.y => {
            tab_at(&app_state.workspace, mouse.column).map(Action::ActivateTab)
        }
        MouseEventKind::ScrollUp if mouse.row >= layout.body.y => {
            Some(Action::EditorScroll(-SCROLL_ROWS))
        }
        MouseEventKind::ScrollDown if mouse.row >= layout.body.y => {
            Some(Action::EditorScroll(SCROLL_ROWS))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::reducer;
    use crate::app::state::{ErrorSeverity, ErrorState};
    use crate::domain::document::MarkdownDocument;
    use crate::domain::tabs::refresh_tab_titles;
    use crate::domain::window::WindowId;
    use crossterm::event::{KeyEventState, KeyModifiers, MouseEvent};

    const SIZE: Size = Size::new(80, 24);

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn editing_state() -> AppState<'static> {
        let mut state = AppState::default();
        state.open_document(MarkdownDocument::default());
        state
    }

    #[test]
    fn test_release_events_are_ignored() {
        let state = editing_state();
        let event = Event::Key(KeyEvent {
            code: KeyCode::Char('k'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event_to_action(event, &state, SIZE), None);
    }

    #[test]
    fn test_router_runs_before_keymap_and_surface() {
        let state = editing_state();
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('k'), KeyModifiers::CONTROL), &state, SIZE),
            Some(Action::OpenPalette)
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('2'), KeyModifiers::CONTROL), &state, SIZE),
            Some(Action::SwitchToTab(2))
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('s'), KeyModifiers::CONTROL), &state, SIZE),
            Some(Action::Save)
        );
        let plain = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(
            map_event_to_action(Event::Key(plain), &state, SIZE),
            Some(Action::EditorInput(plain))
        );
    }

    #[test]
    fn test_global_shortcuts_preempt_prompt() {
        let mut state = editing_state();
        reducer::update(&mut state, Action::OpenFileIntent);
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('k'), KeyModifiers::CONTROL), &state, SIZE),
            Some(Action::OpenPalette)
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Enter, KeyModifiers::NONE), &state, SIZE),
            Some(Action::PromptSubmit)
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Esc, KeyModifiers::NONE), &state, SIZE),
            Some(Action::CancelMode)
        );
    }

    #[test]
    fn test_palette_keys() {
        let mut state = editing_state();
        reducer::update(&mut state, Action::OpenPalette);
        assert_eq!(
            map_event_to_action(key(KeyCode::Down, KeyModifiers::NONE), &state, SIZE),
            Some(Action::PaletteNext)
        );
        let typed = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(
            map_event_to_action(Event::Key(typed), &state, SIZE),
            Some(Action::PaletteInput(typed))
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Esc, KeyModifiers::NONE), &state, SIZE),
            Some(Action::ClosePalette)
        );
    }

    #[test]
    fn test_error_overlay_dismissal() {
        let mut state = editing_state();
        state.last_error = Some(ErrorState::new("boom", ErrorSeverity::Error));
        assert_eq!(
            map_event_to_action(key(KeyCode::Enter, KeyModifiers::NONE), &state, SIZE),
            Some(Action::DismissError)
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('x'), KeyModifiers::NONE), &state, SIZE),
            None
        );
    }

    #[test]
    fn test_click_outside_palette_closes_it() {
        let mut state = editing_state();
        reducer::update(&mut state, Action::OpenPalette);
        assert_eq!(
            map_event_to_action(click(0, 0), &state, SIZE),
            Some(Action::ClosePalette)
        );
    }

    #[test]
    fn test_click_tab_activates_it() {
        let mut state = editing_state();
        state.open_document(MarkdownDocument::default());
        refresh_tab_titles(&mut state.workspace);
        // The first tab label starts after the logo.
        assert_eq!(
            map_event_to_action(click(10, 0), &state, SIZE),
            Some(Action::ActivateTab(WindowId(1)))
        );
        assert_eq!(map_event_to_action(click(10, 5), &state, SIZE), None);
    }

    #[test]
    fn test_focus_events() {
        let state = editing_state();
        assert_eq!(
            map_event_to_action(Event::FocusLost, &state, SIZE),
            Some(Action::FocusChanged)
        );
    }
}

//! First stop for every key event, ahead of mode-specific handling.
//!
//! The router only knows whether the palette is showing. It claims the
//! global shortcuts (palette toggle, tab switching) and the palette's
//! navigation keys; everything else is forwarded unchanged.

use super::action::Action;
use super::keymap::KeyMap;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RouterState {
    Idle,
    PaletteActive,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyRoute {
    /// The event stops here; the action (if any) is dispatched instead.
    Consumed(Option<Action>),
    Forward,
}

pub fn route_key(key: &KeyEvent, state: RouterState, keys: &KeyMap) -> KeyRoute {
    match state {
        RouterState::Idle => {
            if keys.is_primary_chord(key, 'k') {
                return KeyRoute::Consumed(Some(Action::OpenPalette));
            }
            if let Some(number) = keys.primary_digit(key) {
                // Consumed even when there is no such tab.
                return KeyRoute::Consumed(Some(Action::SwitchToTab(number)));
            }
            KeyRoute::Forward
        }
        RouterState::PaletteActive => {
            if key.modifiers == KeyModifiers::NONE {
                match key.code {
                    KeyCode::Esc => return KeyRoute::Consumed(Some(Action::ClosePalette)),
                    KeyCode::Down => return KeyRoute::Consumed(Some(Action::PaletteNext)),
                    KeyCode::Up => return KeyRoute::Consumed(Some(Action::PalettePrev)),
                    KeyCode::Enter => return KeyRoute::Consumed(Some(Action::PaletteExecute)),
                    _ => {}
                }
            }
            if keys.is_primary_chord(key, 'k') {
                return KeyRoute::Consumed(Some(Action::ClosePalette));
            }
            KeyRoute::Forward
        }
    }
}

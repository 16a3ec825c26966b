use super::action::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The modifier that plays the role of the command key.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryModifier {
    #[default]
    Ctrl,
    Super,
    Alt,
}

impl PrimaryModifier {
    pub fn modifiers(self) -> KeyModifiers {
        match self {
            Self::Ctrl => KeyModifiers::CONTROL,
            Self::Super => KeyModifiers::SUPER,
            Self::Alt => KeyModifiers::ALT,
        }
    }

    /// Without the kitty keyboard protocol, Ctrl+digits collapse into
    /// control bytes (Ctrl+3 is Esc, Ctrl+I is Tab) and Super is never
    /// reported. Alt chords arrive intact as an ESC prefix.
    pub fn for_terminal(self, enhanced_keyboard: bool) -> Self {
        if enhanced_keyboard {
            self
        } else {
            Self::Alt
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Ctrl => "^",
            Self::Super => "⌘",
            Self::Alt => "⌥",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct KeyConfig {
    pub primary: PrimaryModifier,
}

#[derive(Debug)]
pub struct KeyMap {
    pub primary: PrimaryModifier,
    pub global: HashMap<KeyEvent, Action>,
}

impl KeyMap {
    pub fn from_config(config: &KeyConfig) -> Self {
        let primary = config.primary;
        let mut global = HashMap::new();

        global.insert(chord(primary, 'n', false), Action::NewDocument);
        global.insert(chord(primary, 'o', false), Action::OpenFileIntent);
        global.insert(chord(primary, 's', false), Action::Save);
        global.insert(chord(primary, 's', true), Action::SaveAsIntent);
        global.insert(chord(primary, 'z', false), Action::Undo);
        global.insert(chord(primary, 'z', true), Action::Redo);
        global.insert(chord(primary, 'y', false), Action::Redo);
        global.insert(chord(primary, 'b', false), Action::ToggleBold);
        global.insert(chord(primary, 'i', false), Action::ToggleItalic);
        global.insert(chord(primary, 'w', false), Action::CloseTab);
        global.insert(chord(primary, 'q', false), Action::Quit);
        global.insert(
            KeyEvent::new(KeyCode::PageDown, primary.modifiers()),
            Action::NextTab,
        );
        global.insert(
            KeyEvent::new(KeyCode::PageUp, primary.modifiers()),
            Action::PrevTab,
        );

        Self { primary, global }
    }

    pub fn get_action(&self, event: KeyEvent) -> Option<Action> {
        self.global.get(&normalize(event)).cloned()
    }

    /// True when `event` is exactly primary+`c` (no other modifiers).
    pub fn is_primary_chord(&self, event: &KeyEvent, c: char) -> bool {
        normalize(*event) == chord(self.primary, c, false)
    }

    /// primary+1 through primary+9.
    pub fn primary_digit(&self, event: &KeyEvent) -> Option<usize> {
        let event = normalize(*event);
        if event.modifiers != self.primary.modifiers() {
            return None;
        }
        match event.code {
            KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize),
            _ => None,
        }
    }

    pub fn label(&self, c: char, shift: bool) -> String {
        let shift = if shift { "⇧" } else { "" };
        format!("{}{shift}{}", self.primary.glyph(), c.to_ascii_uppercase())
    }
}

fn chord(primary: PrimaryModifier, c: char, shift: bool) -> KeyEvent {
    let mut modifiers = primary.modifiers();
    if shift {
        modifiers |= KeyModifiers::SHIFT;
    }
    KeyEvent::new(KeyCode::Char(c), modifiers)
}

/// Terminals disagree on how shifted letters arrive ('Z', 'Z'+SHIFT or
/// 'z'+SHIFT), and kitty-protocol terminals attach kind/state bits. Reduce
/// all of them to lowercase char + explicit SHIFT, kind Press.
fn normalize(event: KeyEvent) -> KeyEvent {
    let mut modifiers = event.modifiers;
    let code = match event.code {
        KeyCode::Char(c) if c.is_ascii_uppercase() => {
            modifiers |= KeyModifiers::SHIFT;
            KeyCode::Char(c.to_ascii_lowercase())
        }
        other => other,
    };
    KeyEvent::new(code, modifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keymap(primary: PrimaryModifier) -> KeyMap {
        KeyMap::from_config(&KeyConfig { primary })
    }

    #[test]
    fn test_shifted_letters_normalize() {
        let keys = keymap(PrimaryModifier::Ctrl);
        let variants = [
            KeyEvent::new(KeyCode::Char('Z'), KeyModifiers::CONTROL),
            KeyEvent::new(KeyCode::Char('Z'), KeyModifiers::CONTROL | KeyModifiers::SHIFT),
            KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL | KeyModifiers::SHIFT),
        ];
        for event in variants {
            assert_eq!(keys.get_action(event), Some(Action::Redo));
        }
        assert_eq!(
            keys.get_action(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL)),
            Some(Action::Undo)
        );
    }

    #[test]
    fn test_primary_modifier_is_exact() {
        let keys = keymap(PrimaryModifier::Super);
        let k = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::SUPER);
        assert!(keys.is_primary_chord(&k, 'k'));
        let with_ctrl = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::SUPER | KeyModifiers::CONTROL);
        assert!(!keys.is_primary_chord(&with_ctrl, 'k'));
        let plain = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE);
        assert!(!keys.is_primary_chord(&plain, 'k'));
    }

    #[test]
    fn test_primary_digit() {
        let keys = keymap(PrimaryModifier::Alt);
        assert_eq!(
            keys.primary_digit(&KeyEvent::new(KeyCode::Char('3'), KeyModifiers::ALT)),
            Some(3)
        );
        assert_eq!(
            keys.primary_digit(&KeyEvent::new(KeyCode::Char('0'), KeyModifiers::ALT)),
            None
        );
        assert_eq!(
            keys.primary_digit(&KeyEvent::new(KeyCode::Char('3'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_legacy_terminal_falls_back_to_alt() {
        assert_eq!(PrimaryModifier::Ctrl.for_terminal(false), PrimaryModifier::Alt);
        assert_eq!(PrimaryModifier::Super.for_terminal(false), PrimaryModifier::Alt);
        assert_eq!(PrimaryModifier::Ctrl.for_terminal(true), PrimaryModifier::Ctrl);
        assert_eq!(PrimaryModifier::Super.for_terminal(true), PrimaryModifier::Super);

        let keys = keymap(PrimaryModifier::Ctrl.for_terminal(false));
        // What a legacy terminal reports for Alt+3 and Alt+I.
        assert_eq!(
            keys.primary_digit(&KeyEvent::new(KeyCode::Char('3'), KeyModifiers::ALT)),
            Some(3)
        );
        assert_eq!(
            keys.get_action(KeyEvent::new(KeyCode::Char('i'), KeyModifiers::ALT)),
            Some(Action::ToggleItalic)
        );
        // Alt+Shift+S arrives as an uppercase letter.
        assert_eq!(
            keys.get_action(KeyEvent::new(KeyCode::Char('S'), KeyModifiers::ALT)),
            Some(Action::SaveAsIntent)
        );
        assert_eq!(keys.label('n', false), "⌥N");
    }

    #[test]
    fn test_labels() {
        assert_eq!(keymap(PrimaryModifier::Super).label('z', true), "⌘⇧Z");
        assert_eq!(keymap(PrimaryModifier::Ctrl).label('n', false), "^N");
    }
}

use super::action::Action;
use super::keymap::KeyMap;
use crate::domain::tabs::{tab_entries, MAX_NUMBERED_TAB};
use crate::domain::window::{WindowHost, WindowId};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommandKind {
    SwitchTab(WindowId),
    NewDocument,
    OpenFile,
    Save,
    Undo,
    Redo,
    Bold,
    Italic,
}

impl CommandKind {
    pub fn action(self) -> Action {
        match self {
            Self::SwitchTab(window) => Action::ActivateTab(window),
            Self::NewDocument => Action::NewDocument,
            Self::OpenFile => Action::OpenFileIntent,
            Self::Save => Action::Save,
            Self::Undo => Action::Undo,
            Self::Redo => Action::Redo,
            Self::Bold => Action::ToggleBold,
            Self::Italic => Action::ToggleItalic,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::SwitchTab(_) => "⧉",
            Self::NewDocument => "+",
            Self::OpenFile => "↗",
            Self::Save => "↓",
            Self::Undo => "↶",
            Self::Redo => "↷",
            Self::Bold => "B",
            Self::Italic => "I",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandItem {
    pub kind: CommandKind,
    pub icon: &'static str,
    pub title: String,
    pub subtitle: String,
    pub shortcut: String,
    pub action: Action,
}

impl CommandItem {
    fn new(kind: CommandKind, title: &str, subtitle: &str, shortcut: String) -> Self {
        Self {
            kind,
            icon: kind.icon(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            shortcut,
            action: kind.action(),
        }
    }
}

/// Builds the palette contents for the current window state: one entry per
/// tab when the key window is tabbed, then the fixed editing commands.
pub fn build_commands<H: WindowHost + ?Sized>(host: &H, keys: &KeyMap) -> Vec<CommandItem> {
    let mut items: Vec<CommandItem> = tab_entries(host)
        .into_iter()
        .enumerate()
        .map(|(i, (window, title))| {
            let position = i + 1;
            let shortcut = if position <= MAX_NUMBERED_TAB {
                format!("{}{position}", keys.primary.glyph())
            } else {
                String::new()
            };
            CommandItem::new(CommandKind::SwitchTab(window), &title, "Switch to tab", shortcut)
        })
        .collect();

    items.extend(editing_commands(keys));
    items
}

pub fn editing_commands(keys: &KeyMap) -> Vec<CommandItem> {
    vec![
        CommandItem::new(
            CommandKind::NewDocument,
            "New Document",
            "Create a new markdown file",
            keys.label('n', false),
        ),
        CommandItem::new(
            CommandKind::OpenFile,
            "Open File…",
            "Open a file from disk",
            keys.label('o', false),
        ),
        CommandItem::new(
            CommandKind::Save,
            "Save",
            "Save the current document",
            keys.label('s', false),
        ),
        CommandItem::new(
            CommandKind::Undo,
            "Undo",
            "Undo the last change",
            keys.label('z', false),
        ),
        CommandItem::new(
            CommandKind::Redo,
            "Redo",
            "Redo the last undone change",
            keys.label('z', true),
        ),
        CommandItem::new(
            CommandKind::Bold,
            "Bold",
            "Toggle bold formatting",
            keys.label('b', false),
        ),
        CommandItem::new(
            CommandKind::Italic,
            "Italic",
            "Toggle italic formatting",
            keys.label('i', false),
        ),
    ]
}

use super::types::{FooterGroup, FooterItem};
use crate::app::state::{AppMode, AppState, PendingDiscard};

pub fn get_groups(state: &AppState) -> Vec<FooterGroup> {
    if state.last_error.is_some() {
        return vec![FooterGroup {
            name: "ERROR",
            items: vec![FooterItem::new("Esc", "dismiss")],
        }];
    }

    let keys = &state.keymap;
    match state.mode {
        AppMode::Editing => {
            let mut file = vec![
                FooterItem::new(keys.label('s', false), "save"),
                FooterItem::new(keys.label('o', false), "open"),
                FooterItem::new(keys.label('n', false), "new"),
            ];
            let mut close = FooterItem::new(keys.label('w', false), "close");
            close.highlighted = matches!(state.pending_discard, Some(PendingDiscard::CloseTab(_)));
            file.push(close);
            let mut quit = FooterItem::new(keys.label('q', false), "quit");
            quit.highlighted = state.pending_discard == Some(PendingDiscard::Quit);
            file.push(quit);

            vec![
                FooterGroup {
                    name: "CMD",
                    items: vec![FooterItem::new(keys.label('k', false), "palette")],
                },
                FooterGroup {
                    name: "FILE",
                    items: file,
                },
                FooterGroup {
                    name: "TABS",
                    items: vec![FooterItem::new(format!("{}1-9", keys.primary.glyph()), "switch")],
                },
            ]
        }
        AppMode::CommandPalette => vec![FooterGroup {
            name: "PALETTE",
            items: vec![
                FooterItem::new("↑/↓", "move"),
                FooterItem::new("Enter", "run"),
                FooterItem::new("Esc", "close"),
            ],
        }],
        AppMode::Prompt => vec![FooterGroup {
            name: "PROMPT",
            items: vec![
                FooterItem::new("Enter", "confirm"),
                FooterItem::new("Esc", "cancel"),
            ],
        }],
    }
}

use super::document::UNTITLED;
use super::window::{WindowHost, WindowId};
use regex::Regex;
use std::sync::LazyLock;

/// Tabs past this position have no number and no shortcut.
pub const MAX_NUMBERED_TAB: usize = 9;

static NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s").expect("tab number pattern is valid"));

/// Strips one leading `"<digits>. "` group, e.g. `"3. Notes"` -> `"Notes"`.
pub fn strip_number_prefix(title: &str) -> &str {
    match NUMBER_PREFIX.find(title) {
        Some(m) => &title[m.end()..],
        None => title,
    }
}

/// `position` is 1-based.
pub fn numbered_title(title: &str, position: usize) -> String {
    let title = strip_number_prefix(title);
    if position <= MAX_NUMBERED_TAB {
        format!("{position}. {title}")
    } else {
        title.to_string()
    }
}

/// Renumbers the titles of every visible tab group, stripping numbers from
/// windows that are not part of a multi-tab group. Titles are only written
/// when they actually change.
pub fn refresh_tab_titles<H: WindowHost + ?Sized>(host: &mut H) {
    for window in host.windows() {
        let peers = host.tab_peers(window);
        if peers.len() > 1 {
            for (i, peer) in peers.iter().enumerate() {
                let Some(current) = host.title(*peer) else {
                    continue;
                };
                let wanted = numbered_title(&current, i + 1);
                if current != wanted {
                    host.set_title(*peer, wanted);
                }
            }
        } else if let Some(current) = host.title(window) {
            let stripped = strip_number_prefix(&current);
            if stripped != current {
                let stripped = stripped.to_string();
                host.set_title(window, stripped);
            }
        }
    }
}

/// Activates the tab at 1-based `number` in the key window's group.
pub fn switch_to_tab<H: WindowHost + ?Sized>(host: &mut H, number: usize) -> bool {
    let Some(key) = host.key_window() else {
        return false;
    };
    let peers = host.tab_peers(key);
    if number == 0 || number > peers.len() {
        return false;
    }
    host.activate(peers[number - 1]);
    true
}

/// Display titles of the key window's tab group, numbers stripped. Empty
/// when the key window is not part of a multi-tab group.
pub fn tab_entries<H: WindowHost + ?Sized>(host: &H) -> Vec<(WindowId, String)> {
    let Some(key) = host.key_window() else {
        return Vec::new();
    };
    let peers = host.tab_peers(key);
    if peers.len() <= 1 {
        return Vec::new();
    }
    peers
        .into_iter()
        .map(|peer| {
            let title = host.title(peer).unwrap_or_default();
            let title = if title.is_empty() {
                UNTITLED.to_string()
            } else {
                strip_number_prefix(&title).to_string()
            };
            (peer, title)
        })
        .collect()
}

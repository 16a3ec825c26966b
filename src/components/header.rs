use crate::app::state::Workspace;
use crate::domain::window::WindowId;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::ops::Range;

const LOGO: &str = " SCRIVO ";
const DIRTY_MARK: &str = " ●";

/// Column span of each tab label, left to right. Shared by rendering and
/// mouse hit-testing so both agree on where a tab is.
pub fn tab_regions(workspace: &Workspace<'_>) -> Vec<(WindowId, Range<u16>)> {
    let mut x = LOGO.chars().count() as u16 + 1;
    workspace
        .iter()
        .map(|window| {
            let width = label(&window.title, window.document.dirty).chars().count() as u16;
            let region = x..x.saturating_add(width);
            x = region.end.saturating_add(1);
            (window.id, region)
        })
        .collect()
}

pub fn tab_at(workspace: &Workspace<'_>, column: u16) -> Option<WindowId> {
    tab_regions(workspace)
        .into_iter()
        .find(|(_, region)| region.contains(&column))
        .map(|(id, _)| id)
}

fn label(title: &str, dirty: bool) -> String {
    let mark = if dirty { DIRTY_MARK } else { "" };
    format!(" {title}{mark} ")
}

pub struct TabBar<'a> {
    pub workspace: &'a Workspace<'a>,
    pub theme: &'a Theme,
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let active = self.workspace.active_id();
        let mut spans = vec![
            Span::styled(LOGO, self.theme.header_logo),
            Span::styled(" ", self.theme.header),
        ];

        for window in self.workspace.iter() {
            let style = if Some(window.id) == active {
                self.theme.tab_active
            } else {
                self.theme.tab_inactive
            };
            spans.push(Span::styled(format!(" {}", window.title), style));
            if window.document.dirty {
                spans.push(Span::styled(DIRTY_MARK, style.patch(self.theme.tab_dirty)));
            }
            spans.push(Span::styled(" ", style));
            spans.push(Span::styled(" ", self.theme.header));
        }

        Paragraph::new(Line::from(spans))
            .style(self.theme.header)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::EditorConfig;
    use crate::domain::document::MarkdownDocument;
    use crate::domain::tabs::refresh_tab_titles;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn workspace() -> Workspace<'static> {
        let mut ws = Workspace::default();
        let config = EditorConfig::default();
        ws.open(MarkdownDocument::default(), &config);
        let mut dirty = MarkdownDocument::new("x".to_string());
        dirty.dirty = true;
        ws.open(dirty, &config);
        refresh_tab_titles(&mut ws);
        ws
    }

    #[test]
    fn test_render_numbered_tabs_with_dirty_mark() {
        let ws = workspace();
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(
                    TabBar {
                        workspace: &ws,
                        theme: &theme,
                    },
                    f.area(),
                );
            })
            .unwrap();

        let row: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(row.starts_with(" SCRIVO "));
        assert!(row.contains(" 1. Untitled "));
        assert!(row.contains(" 2. Untitled ● "));
    }

    #[test]
    fn test_hit_testing_matches_layout() {
        let ws = workspace();
        // " SCRIVO " + gap, then " 1. Untitled " (13 columns).
        assert_eq!(tab_at(&ws, 0), None);
        assert_eq!(tab_at(&ws, 9), Some(WindowId(1)));
        assert_eq!(tab_at(&ws, 21), Some(WindowId(1)));
        assert_eq!(tab_at(&ws, 22), None);
        assert_eq!(tab_at(&ws, 23), Some(WindowId(2)));
    }
}

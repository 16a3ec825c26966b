use crate::app::state::PaletteState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use super::helpers::{centered_rect_fixed_height, contains, draw_drop_shadow};

pub const MAX_VISIBLE_ROWS: u16 = 10;

/// Borders, query line and separator.
const CHROME_HEIGHT: u16 = 4;

pub struct PaletteLayout {
    pub outer: Rect,
    pub query: Rect,
    pub separator: Rect,
    pub list: Rect,
}

/// Sized to the filtered view so short result lists give a short palette.
/// An empty view keeps one row for "No results".
pub fn palette_layout(area: Rect, visible_items: usize) -> PaletteLayout {
    let rows = (visible_items.min(MAX_VISIBLE_ROWS as usize) as u16).max(1);
    let outer = centered_rect_fixed_height(60, rows + CHROME_HEIGHT, area);
    let inner = Block::default().borders(Borders::ALL).inner(outer);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Query input
            Constraint::Length(1), // Separator
            Constraint::Min(0),    // Results
        ])
        .split(inner);
    PaletteLayout {
        outer,
        query: parts[0],
        separator: parts[1],
        list: parts[2],
    }
}

/// First visible row, keeping the selection on screen.
pub fn scroll_offset(selected: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return 0;
    }
    selected.saturating_sub(visible_rows - 1)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PaletteHit {
    /// Index into the filtered view.
    Row(usize),
    Inside,
    Outside,
}

pub fn hit_test(state: &PaletteState, area: Rect, column: u16, row: u16) -> PaletteHit {
    let filtered = state.filtered_items().len();
    let layout = palette_layout(area, filtered);
    if !contains(layout.outer, column, row) {
        return PaletteHit::Outside;
    }
    if !contains(layout.list, column, row) {
        return PaletteHit::Inside;
    }
    let offset = scroll_offset(state.selected_index(), layout.list.height as usize);
    let index = offset + (row - layout.list.y) as usize;
    if index < filtered {
        PaletteHit::Row(index)
    } else {
        PaletteHit::Inside
    }
}

pub struct CommandPaletteModal<'a> {
    pub theme: &'a Theme,
    pub state: &'a PaletteState,
}

impl Widget for CommandPaletteModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items = self.state.filtered_items();
        let layout = palette_layout(area, items.len());
        if layout.outer.width == 0 || layout.outer.height == 0 {
            return;
        }

        draw_drop_shadow(buf, layout.outer, area);
        Clear.render(layout.outer, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" COMMANDS ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);
        block.render(layout.outer, buf);
        if layout.list.height == 0 {
            return;
        }

        // Query
        let query = self.state.query();
        let query_line = if query.is_empty() {
            Line::from(vec![
                Span::styled(" > ", self.theme.footer_segment_key),
                Span::styled("Type a command", self.theme.dimmed),
            ])
        } else {
            Line::from(vec![
                Span::styled(" > ", self.theme.footer_segment_key),
                Span::styled(query, self.theme.footer_segment_val),
                Span::styled(
                    "_",
                    self.theme
                        .footer_segment_val
                        .add_modifier(Modifier::SLOW_BLINK),
                ),
            ])
        };
        buf.set_line(layout.query.x, layout.query.y, &query_line, layout.query.width);

        let separator = "─".repeat(layout.separator.width as usize);
        buf.set_string(
            layout.separator.x,
            layout.separator.y,
            separator,
            self.theme.border_focus,
        );

        if items.is_empty() {
            let no_results = Line::from(Span::styled("  No results", self.theme.dimmed));
            buf.set_line(layout.list.x, layout.list.y, &no_results, layout.list.width);
            return;
        }

        let visible = layout.list.height as usize;
        let offset = scroll_offset(self.state.selected_index(), visible);
        for (row, (i, item)) in items.iter().enumerate().skip(offset).take(visible).enumerate() {
            let y = layout.list.y + row as u16;
            let selected = i == self.state.selected_index();
            let style = if selected {
                self.theme.list_selected
            } else {
                self.theme.list_item
            };
            let subtitle_style = if selected {
                style
            } else {
                self.theme.dimmed
            };

            if selected {
                buf.set_string(
                    layout.list.x,
                    y,
                    " ".repeat(layout.list.width as usize),
                    style,
                );
            }
            let line = Line::from(vec![
                Span::styled(format!(" {} ", item.icon), style),
                Span::styled(format!("{}  ", item.title), style),
                Span::styled(item.subtitle.as_str(), subtitle_style),
            ]);
            buf.set_line(layout.list.x, y, &line, layout.list.width);

            let width = item.shortcut.chars().count() as u16 + 1;
            if !item.shortcut.is_empty() && width < layout.list.width {
                buf.set_string(
                    layout.list.right() - width,
                    y,
                    &item.shortcut,
                    style.add_modifier(Modifier::BOLD),
                );
            }
        }
    }
}

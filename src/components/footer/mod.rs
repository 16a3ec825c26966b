mod groups;
mod types;

use crate::app::state::AppState;
use crate::theme::Theme;
pub use types::{FooterGroup, FooterItem};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Footer<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let state = self.state;

        // Status segment
        let status_span = if let Some(err) = &state.last_error {
            Span::styled(format!("  {}  ", err.title().trim()), theme.status_error)
        } else if let Some(msg) = &state.status_message {
            let style = if state.pending_discard.is_some() {
                theme.status_warn
            } else {
                theme.status_info
            };
            Span::styled(format!("  {msg}  "), style)
        } else {
            Span::raw("")
        };

        let mut spans = Vec::new();
        if !status_span.content.is_empty() {
            spans.push(status_span);
            spans.push(Span::raw(" "));
        }

        // Document context
        if let Some(window) = state.workspace.active() {
            let (row, col) = window.surface.text_area.cursor();
            spans.push(Span::styled(
                format!(" {} ", window.document.content_type.label()),
                theme.header_item,
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!(" Ln {}, Col {} ", row + 1, col + 1),
                theme.header_item,
            ));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!(" {} ", state.encoding_name), theme.header_item));
        spans.push(Span::raw("  "));

        let available_width = area.width.saturating_sub(4) as usize;
        let mut current_width = spans.iter().map(Span::width).sum::<usize>();

        for group in groups::get_groups(state) {
            let Some(first) = group.items.first() else {
                continue;
            };
            if current_width + first.key.chars().count() + first.desc.len() + 4 > available_width {
                break;
            }

            for item in group.items {
                let key_str = format!(" {} ", item.key);
                let desc_str = format!(" {} ", item.desc);

                let item_width = key_str.chars().count() + desc_str.len();
                if current_width + item_width + 1 > available_width {
                    break;
                }

                let (key_style, val_style) = if item.highlighted {
                    (theme.status_warn, theme.header_warn)
                } else {
                    (theme.footer_segment_key, theme.footer_segment_val)
                };

                spans.push(Span::styled(key_str, key_style));
                spans.push(Span::styled(desc_str, val_style));
                spans.push(Span::raw(" "));
                current_width += item_width + 1;
            }
            spans.push(Span::raw("  "));
            current_width += 2;
        }

        Paragraph::new(Line::from(spans))
            .style(theme.footer)
            .render(area, buf);
    }
}

use crate::app::state::InputState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use super::helpers::{centered_rect_fixed_height, draw_drop_shadow};

/// Single-line path prompt (open / save as).
pub struct PromptModal<'a> {
    pub theme: &'a Theme,
    pub input: &'a InputState<'a>,
    pub base_dir: &'a str,
}

impl Widget for PromptModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect_fixed_height(60, 3, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(self.input.kind.title(), self.theme.header_active),
                Span::raw(" "),
            ]))
            .title_bottom(Line::from(vec![
                Span::raw(" relative to "),
                Span::styled(self.base_dir, self.theme.dimmed),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let inner_area = block.inner(modal_area);
        block.render(modal_area, buf);

        if inner_area.width > 0 && inner_area.height > 0 {
            Widget::render(&self.input.text_area, inner_area, buf);
        }
    }
}

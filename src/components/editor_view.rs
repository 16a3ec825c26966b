use crate::app::state::DocumentWindow;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

/// The active tab's editing surface, framed with the document name.
pub struct EditorView<'a> {
    pub window: &'a DocumentWindow<'a>,
    pub theme: &'a Theme,
    pub focused: bool,
}

impl Widget for EditorView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (border, title_style) = if self.focused {
            (self.theme.border_focus, self.theme.header_active)
        } else {
            (self.theme.border, self.theme.header_item)
        };

        let document = &self.window.document;
        let mut title = vec![
            Span::raw(" "),
            Span::styled(format!(" {} ", document.display_name()), title_style),
        ];
        if document.dirty {
            title.push(Span::styled(" modified ", self.theme.header_warn));
        }
        title.push(Span::raw(" "));

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .style(self.theme.editor);

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width > 0 && inner.height > 0 {
            Widget::render(&self.window.surface.text_area, inner, buf);
        }
    }
}

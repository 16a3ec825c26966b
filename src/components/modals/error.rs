use crate::app::state::{ErrorSeverity, ErrorState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::helpers::{centered_rect_fixed_height, draw_drop_shadow};

pub struct ErrorModal<'a> {
    pub theme: &'a Theme,
    pub error: &'a ErrorState,
}

impl Widget for ErrorModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title_text = self.error.title();
        let (title_style, icon) = match self.error.severity {
            ErrorSeverity::Warning => (self.theme.header_warn, "!"),
            ErrorSeverity::Error => (self.theme.status_error, "✗"),
        };
        let timestamp = self.error.timestamp.format("%H:%M:%S").to_string();

        let mut text_lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("{icon} "), title_style),
                Span::styled(&self.error.message, self.theme.list_item),
            ]),
            Line::from(vec![Span::styled(
                format!("Occurred at: {timestamp}"),
                self.theme.dimmed,
            )]),
            Line::from(""),
        ];

        if !self.error.suggestions.is_empty() {
            text_lines.push(Line::from(Span::styled(
                "Suggestions:",
                self.theme.header_item,
            )));
            for suggestion in &self.error.suggestions {
                text_lines.push(Line::from(vec![
                    Span::styled("  • ", self.theme.header_item),
                    Span::styled(suggestion, self.theme.list_item),
                ]));
            }
            text_lines.push(Line::from(""));
        }

        // Borders, the wrapped body and the dismiss hint.
        let width = centered_rect_fixed_height(70, 1, area).width;
        let inner_width = width.saturating_sub(2);
        let body_rows: u16 = text_lines
            .iter()
            .map(|line| wrapped_rows(line, inner_width))
            .sum();
        let modal_area = centered_rect_fixed_height(70, body_rows + 3, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(title_text, title_style),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(title_style);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);
        if inner.height == 0 {
            return;
        }

        // The hint keeps the last row even when the body has to be cut.
        let [body, hint] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        Paragraph::new(text_lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(body, buf);

        Paragraph::new(Line::from(vec![
            Span::raw(" Press "),
            Span::styled("Esc", self.theme.footer_segment_key),
            Span::raw(" or "),
            Span::styled("Enter", self.theme.footer_segment_key),
            Span::raw(" to dismiss "),
        ]))
        .alignment(Alignment::Center)
        .render(hint, buf);
    }
}

/// Rows `line` takes when word-wrapped to `width` columns.
fn wrapped_rows(line: &Line, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    let mut rows = 1;
    let mut used = 0;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        let needed = if used == 0 { len } else { used + 1 + len };
        if needed <= width {
            used = needed;
        } else {
            if used > 0 {
                rows += 1;
            }
            // Words longer than a row are broken across rows.
            rows += len.saturating_sub(1) / width;
            used = match len % width {
                0 => width,
                rest => rest,
            };
        }
    }
    u16::try_from(rows).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_error_modal_shows_message_and_suggestions() {
        let theme = Theme::default();
        let error = ErrorState::new(
            "/tmp/x.md could not be read: the file is corrupt or not valid UTF-8",
            ErrorSeverity::Error,
        );
        let screen = render(&theme, &error, 100, 30);
        assert!(screen.contains("ERROR"));
        assert!(screen.contains("Suggestions:"));
        assert!(screen.contains("corrupt"));
        assert!(screen.contains("Press Esc or Enter to dismiss"));
    }

    #[test]
    fn test_dismiss_hint_survives_wrapping_and_short_terminals() {
        let theme = Theme::default();
        let error = ErrorState::new(
            "/home/someone/notes/a-rather-long-file-name.md could not be saved: \
             the text cannot be represented in windows-1252",
            ErrorSeverity::Error,
        );
        for (width, height) in [(60, 30), (50, 30), (80, 10)] {
            let screen = render(&theme, &error, width, height);
            assert!(
                screen.contains("Esc or Enter"),
                "hint missing at {width}x{height}"
            );
        }
    }

    #[test]
    fn test_wrapped_rows() {
        assert_eq!(wrapped_rows(&Line::from(""), 10), 1);
        assert_eq!(wrapped_rows(&Line::from("one two"), 10), 1);
        assert_eq!(wrapped_rows(&Line::from("one two three"), 10), 2);
        // A word longer than a row is broken.
        assert_eq!(wrapped_rows(&Line::from("abcdefghijklmnopqrstuvwxyz"), 10), 3);
    }

    fn render(theme: &Theme, error: &ErrorState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(ErrorModal { theme, error }, f.area());
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

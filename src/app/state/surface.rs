//! The editing surface hosted inside a document tab.
//!
//! The surface owns its own copy of the text and is driven only through the
//! script channel: the native side never touches the text area directly.
//! Local edits are reported back as `ContentChanged` signals.

use super::input::AppTextArea;
use crate::app::config::EditorConfig;
use crate::domain::formatting::{toggle_emphasis, Emphasis};
use crate::domain::script::{ScriptCall, SurfaceSignal};
use crate::theme::Theme;
use crossterm::event::KeyEvent;
use ratatui::style::{Modifier, Style};
use std::collections::VecDeque;
use tui_textarea::{CursorMove, Scrolling, TextArea};

#[derive(Debug, Clone)]
pub struct EditorSurface<'a> {
    pub text_area: AppTextArea<'a>,
    loaded: bool,
    outbox: VecDeque<SurfaceSignal>,
    line_numbers: bool,
    tab_width: u8,
}

impl<'a> EditorSurface<'a> {
    pub fn new(config: &EditorConfig) -> Self {
        let mut surface = Self {
            text_area: AppTextArea::default(),
            loaded: false,
            outbox: VecDeque::new(),
            line_numbers: config.line_numbers,
            tab_width: config.tab_width,
        };
        surface.apply_styles();
        surface
    }

    /// Finishes loading and announces readiness. Until then scripts are
    /// rejected.
    pub fn load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        self.outbox.push_back(SurfaceSignal::Ready);
    }

    pub fn text(&self) -> String {
        self.text_area.lines().join("\n")
    }

    pub fn drain_signals(&mut self) -> Vec<SurfaceSignal> {
        self.outbox.drain(..).collect()
    }

    /// Failures are logged and leave the surface untouched.
    pub fn evaluate(&mut self, script: &str) {
        if !self.loaded {
            tracing::warn!("script evaluated before the surface finished loading");
            return;
        }
        match ScriptCall::parse(script) {
            Ok(call) => self.apply(call),
            Err(e) => tracing::error!(error = %e, "surface script failed"),
        }
    }

    pub fn input(&mut self, key: KeyEvent) {
        if self.text_area.input(key) {
            self.content_changed();
        }
    }

    /// Colors are reapplied on every frame, since a `setMarkdown` replaces
    /// the text area wholesale.
    pub fn apply_theme(&mut self, theme: &Theme) {
        self.text_area.set_style(theme.editor);
        self.text_area.set_cursor_style(theme.editor_cursor);
        self.text_area.set_selection_style(theme.editor_selection);
        if self.line_numbers {
            self.text_area.set_line_number_style(theme.editor_line_number);
        }
    }

    pub fn scroll(&mut self, rows: i16) {
        self.text_area.scroll(Scrolling::Delta { rows, cols: 0 });
    }

    fn apply(&mut self, call: ScriptCall) {
        let changed = match call {
            // Text set from the native side is not reported back.
            ScriptCall::SetMarkdown(text) => {
                self.replace_text(&text);
                false
            }
            ScriptCall::Undo => self.text_area.undo(),
            ScriptCall::Redo => self.text_area.redo(),
            ScriptCall::ToggleBold => self.toggle(Emphasis::Bold),
            ScriptCall::ToggleItalic => self.toggle(Emphasis::Italic),
        };
        if changed {
            self.content_changed();
        }
    }

    fn toggle(&mut self, emphasis: Emphasis) -> bool {
        let has_selection = self
            .text_area
            .selection_range()
            .is_some_and(|(start, end)| start != end);

        if has_selection {
            let clipboard = self.text_area.yank_text();
            self.text_area.cut();
            let selected = self.text_area.yank_text();
            self.text_area.set_yank_text(clipboard);
            self.text_area.insert_str(toggle_emphasis(&selected, emphasis))
        } else {
            self.text_area.cancel_selection();
            let marker = emphasis.marker();
            self.text_area.insert_str(format!("{marker}{marker}"));
            for _ in 0..marker.chars().count() {
                self.text_area.move_cursor(CursorMove::Back);
            }
            true
        }
    }

    fn replace_text(&mut self, text: &str) {
        let (row, col) = self.text_area.cursor();
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        self.text_area = AppTextArea(TextArea::new(lines));
        self.apply_styles();
        // Jump clamps to the new text.
        self.text_area.move_cursor(CursorMove::Jump(
            row.min(u16::MAX as usize) as u16,
            col.min(u16::MAX as usize) as u16,
        ));
    }

    fn apply_styles(&mut self) {
        self.text_area.set_tab_length(self.tab_width);
        self.text_area.set_cursor_line_style(Style::default());
        if self.line_numbers {
            self.text_area
                .set_line_number_style(Style::default().add_modifier(Modifier::DIM));
        } else {
            self.text_area.remove_line_number();
        }
    }

    fn content_changed(&mut self) {
        let text = self.text();
        // Coalesce bursts of keystrokes handled within one tick.
        if let Some(SurfaceSignal::ContentChanged(pending)) = self.outbox.back_mut() {
            *pending = text;
        } else {
            self.outbox.push_back(SurfaceSignal::ContentChanged(text));
        }
    }
}

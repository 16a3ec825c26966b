use crate::app::state::{AppMode, AppState};
use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::command_palette::CommandPaletteModal;
use super::error::ErrorModal;
use super::helpers::dim_area;
use super::prompt::PromptModal;

/// Draws whichever overlay is active over the dimmed editor.
pub struct ModalManager<'a> {
    pub theme: &'a Theme,
    pub app_state: &'a AppState<'a>,
}

impl Widget for ModalManager<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // --- Visual Dimming ---
        let is_modal_active =
            self.app_state.mode != AppMode::Editing || self.app_state.last_error.is_some();
        if is_modal_active {
            dim_area(buf, area);
        }

        // --- Modals ---
        match self.app_state.mode {
            AppMode::CommandPalette => {
                if let Some(palette) = &self.app_state.command_palette {
                    CommandPaletteModal {
                        theme: self.theme,
                        state: palette,
                    }
                    .render(area, buf);
                }
            }
            AppMode::Prompt => {
                if let Some(input) = &self.app_state.input {
                    let base_dir = self.app_state.base_dir.display().to_string();
                    PromptModal {
                        theme: self.theme,
                        input,
                        base_dir: &base_dir,
                    }
                    .render(area, buf);
                }
            }
            AppMode::Editing => {}
        }

        // Errors sit above everything else.
        if let Some(error) = &self.app_state.last_error {
            ErrorModal {
                theme: self.theme,
                error,
            }
            .render(area, buf);
        }
    }
}

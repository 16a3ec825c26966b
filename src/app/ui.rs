use crate::app::state::{AppMode, AppState};
use crate::components::editor_view::EditorView;
use crate::components::footer::Footer;
use crate::components::header::TabBar;
use crate::components::modals::ModalManager;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

pub struct AppLayout {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub fn get_layout(area: Rect) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Editor
            Constraint::Length(1), // Footer
        ])
        .split(area);

    AppLayout {
        header: main[0],
        body: main[1],
        footer: main[2],
    }
}

pub fn draw(f: &mut Frame, app_state: &mut AppState) {
    if f.area().width == 0 || f.area().height == 0 {
        return;
    }

    if let Some(window) = app_state.workspace.active_mut() {
        window.surface.apply_theme(&app_state.theme);
    }

    let theme = &app_state.theme;
    let layout = get_layout(f.area());

    // --- Header ---
    if layout.header.height > 0 {
        f.render_widget(
            TabBar {
                workspace: &app_state.workspace,
                theme,
            },
            layout.header,
        );
    }

    // --- Editor ---
    if layout.body.width > 0 && layout.body.height > 0 {
        if let Some(window) = app_state.workspace.active() {
            f.render_widget(
                EditorView {
                    window,
                    theme,
                    focused: app_state.mode == AppMode::Editing,
                },
                layout.body,
            );
        } else {
            f.render_widget(
                Paragraph::new("No open documents")
                    .style(theme.dimmed)
                    .alignment(Alignment::Center),
                layout.body,
            );
        }
    }

    // --- Footer ---
    if layout.footer.height > 0 {
        f.render_widget(
            Footer {
                state: app_state,
                theme,
            },
            layout.footer,
        );
    }

    // --- Overlays ---
    f.render_widget(
        ModalManager {
            theme,
            app_state,
        },
        f.area(),
    );
}

use super::config::{Config, EditorConfig};
use super::keymap::KeyMap;
use crate::domain::document::MarkdownDocument;
use crate::domain::window::WindowId;
use crate::theme::Theme;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

pub mod error;
pub mod input;
pub mod palette;
pub mod surface;
pub mod workspace;

// Re-exports
pub use error::{ErrorSeverity, ErrorState};
pub use input::{AppTextArea, InputState, PromptKind};
pub use palette::PaletteState;
pub use surface::EditorSurface;
pub use workspace::{DocumentWindow, Workspace};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AppMode {
    Editing,        // Keys go to the editing surface
    CommandPalette, // Palette overlay has the keyboard
    Prompt,         // A path prompt is open
}

/// Something destructive that is waiting for the same key a second time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PendingDiscard {
    CloseTab(WindowId),
    Quit,
}

#[derive(Debug)]
pub struct AppState<'a> {
    // --- Connectivity & Status ---
    pub should_quit: bool,
    pub mode: AppMode,
    pub last_error: Option<ErrorState>,
    pub status_message: Option<String>, // "Saved notes.md"
    pub status_clear_time: Option<Instant>,
    pub pending_discard: Option<PendingDiscard>,

    // --- Documents ---
    pub workspace: Workspace<'a>,

    // --- Overlays ---
    pub command_palette: Option<PaletteState>,
    pub input: Option<InputState<'a>>,

    // --- Animation ---
    pub frame_count: u64,

    // --- Config ---
    pub keymap: Arc<KeyMap>,
    pub editor_config: EditorConfig,
    pub theme: Theme,
    pub base_dir: PathBuf,            // Prompts resolve relative paths here
    pub encoding_name: &'static str, // Encoding documents are read and written in
}

impl AppState<'_> {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            keymap: Arc::new(KeyMap::from_config(&config.keys)),
            editor_config: config.editor.clone(),
            theme: Theme::from_palette_type(config.editor.theme),
            ..Default::default()
        }
    }

    pub fn open_document(&mut self, document: MarkdownDocument) -> WindowId {
        self.workspace.open(document, &self.editor_config)
    }

    pub fn is_palette_visible(&self) -> bool {
        self.command_palette.is_some()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_clear_time = Some(Instant::now());
    }
}

impl Default for AppState<'_> {
    fn default() -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Editing,
            last_error: None,
            status_message: None,
            status_clear_time: None,
            pending_discard: None,
            workspace: Workspace::default(),
            command_palette: None,
            input: None,
            frame_count: 0,
            keymap: Arc::new(KeyMap::from_config(&Default::default())),
            editor_config: EditorConfig::default(),
            theme: Theme::default(),
            base_dir: PathBuf::from("."),
            encoding_name: "UTF-8",
        }
    }
}

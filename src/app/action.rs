use crate::app::command::Command;
use crate::domain::document::MarkdownDocument;
use crate::domain::script::SurfaceSignal;
use crate::domain::window::WindowId;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum UpdateResult {
    Handled(Option<Command>),
    NotHandled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    FocusChanged, // Terminal focus gained/lost
    Quit,

    // --- Command Palette ---
    OpenPalette,
    ClosePalette,
    PaletteNext,
    PalettePrev,
    PaletteExecute,             // Run the selected item, then close
    PaletteExecuteIndex(usize), // Run a clicked row, then close
    PaletteInput(crossterm::event::KeyEvent),

    // --- Tabs ---
    SwitchToTab(usize), // 1-based position in the tab group
    ActivateTab(WindowId),
    NextTab,
    PrevTab,
    CloseTab,
    RefreshTabTitles,

    // --- Documents ---
    NewDocument,
    OpenFileIntent,       // Open the path prompt
    OpenFile(PathBuf),    // Load a file into a new tab
    Save,                 // Save, prompting for a path if untitled
    SaveAsIntent,         // Open the save-as prompt
    SaveAs(PathBuf),
    ExternalChangeDetected(PathBuf),

    // --- Editing Surface ---
    EditorInput(crossterm::event::KeyEvent),
    EditorScroll(i16),
    Undo,
    Redo,
    ToggleBold,
    ToggleItalic,
    Surface(WindowId, SurfaceSignal),
    RemoteUpdateSettled(WindowId),

    // --- Prompt ---
    PromptInput(crossterm::event::KeyEvent),
    PromptSubmit,
    CancelMode, // ESC outside the palette
    DismissError,

    // --- Async Results ---
    DocumentOpened(Box<MarkdownDocument>),
    DocumentReloaded(WindowId, Box<MarkdownDocument>),
    DocumentSaved(WindowId, PathBuf, String), // The text that was written
    OperationStarted(String),
    ErrorOccurred(String),
}

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use scrivo::app::{config::Config, r#loop::run_loop, state::AppState};
use scrivo::domain::store::DocumentStore;
use scrivo::infrastructure::fs_store::FsDocumentStore;

/// A terminal markdown editor with tabs and a command palette.
#[derive(Debug, Parser)]
#[command(name = "scrivo", version, about)]
struct Args {
    /// Files to open, one tab each
    files: Vec<PathBuf>,

    /// Read configuration from this file instead of ~/.config/scrivo/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!(%panic_info, "panic");
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            PopKeyboardEnhancementFlags,
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableFocusChange
        );
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_panic_hook();

    // Logging is best effort; the editor runs without it.
    if let Err(e) = scrivo::logging::setup_tracing(args.verbose) {
        eprintln!("scrivo: logging disabled: {e:#}");
    }

    // Everything that can fail happens BEFORE terminal setup, so a bad
    // config or working directory never leaves the terminal in raw mode.
    let mut config = Config::load(args.config.as_deref());
    let base_dir = std::env::current_dir().context("cannot read the working directory")?;
    let store = FsDocumentStore::with_encoding_label(base_dir.clone(), &config.editor.encoding);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    let primary = config.keys.primary.for_terminal(enhanced);
    if primary != config.keys.primary {
        tracing::info!(
            configured = ?config.keys.primary,
            using = ?primary,
            "terminal lacks the kitty keyboard protocol, using Alt shortcuts"
        );
        config.keys.primary = primary;
    }

    let mut app_state = AppState::new(&config);
    app_state.base_dir = base_dir;
    app_state.encoding_name = store.encoding_name();
    tracing::info!(files = args.files.len(), encoding = app_state.encoding_name, "starting");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_loop(&mut terminal, app_state, Arc::new(store), args.files).await;

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "editor loop failed");
        println!("{:?}", err);
    }

    Ok(())
}

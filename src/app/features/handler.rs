use crate::app::{action::Action, command::Command};
use crate::domain::store::DocumentStore;
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs document I/O off the UI loop. Results come back as actions.
pub fn handle_command(
    command: Command,
    store: Arc<dyn DocumentStore>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    match command {
        Command::Open(path) => {
            let path = resolve(&store.base_dir(), &path);
            tokio::spawn(async move {
                let _ = tx
                    .send(Action::OperationStarted(format!(
                        "Opening {}...",
                        path.display()
                    )))
                    .await;
                match store.load(&path).await {
                    Ok(document) => {
                        let _ = tx.send(Action::DocumentOpened(Box::new(document))).await;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "open failed");
                        let _ = tx.send(Action::ErrorOccurred(e.to_string())).await;
                    }
                }
            });
        }
        Command::Reload(window, path) => {
            tokio::spawn(async move {
                match store.load(&path).await {
                    Ok(document) => {
                        let _ = tx
                            .send(Action::DocumentReloaded(window, Box::new(document)))
                            .await;
                    }
                    Err(e) => {
                        // The file may be mid-write; the next change event retries.
                        tracing::warn!(error = %e, "reload failed");
                    }
                }
            });
        }
        Command::Save { window, path, text } => {
            let path = resolve(&store.base_dir(), &path);
            tokio::spawn(async move {
                match store.save(&path, &text).await {
                    Ok(()) => {
                        let _ = tx.send(Action::DocumentSaved(window, path, text)).await;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "save failed");
                        let _ = tx.send(Action::ErrorOccurred(e.to_string())).await;
                    }
                }
            });
        }
        other => bail!("{other:?} is not a document operation"),
    }
    Ok(())
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

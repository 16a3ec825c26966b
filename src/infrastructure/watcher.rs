use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Reports modifications of open documents made outside the editor.
pub struct DocumentWatcher {
    watcher: RecommendedWatcher,
    watched: HashSet<PathBuf>,
}

impl DocumentWatcher {
    pub fn new(tx: mpsc::Sender<PathBuf>) -> notify::Result<Self> {
        let watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) => {
                    for path in event.paths {
                        // Dropped sends are fine: the debouncer only needs one per burst.
                        let _ = tx.try_send(path);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "file watcher error"),
            }
        })?;

        Ok(Self {
            watcher,
            watched: HashSet::new(),
        })
    }

    pub fn watch(&mut self, path: &Path) {
        if self.watched.contains(path) {
            return;
        }
        match self.watcher.watch(path, RecursiveMode::NonRecursive) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "watching document");
                self.watched.insert(path.to_path_buf());
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "cannot watch document"),
        }
    }

    pub fn unwatch(&mut self, path: &Path) {
        if self.watched.remove(path) {
            if let Err(e) = self.watcher.unwatch(path) {
                tracing::debug!(path = %path.display(), error = %e, "unwatch failed");
            }
        }
    }

    pub fn is_watching(&self, path: &Path) -> bool {
        self.watched.contains(path)
    }
}

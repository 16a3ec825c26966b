use crate::domain::window::WindowId;
use std::path::PathBuf;

/// Side effects requested by the reducer and carried out by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(PathBuf),
    Reload(WindowId, PathBuf),
    Save {
        window: WindowId,
        path: PathBuf,
        text: String,
    },
    Watch(PathBuf),
    Unwatch(PathBuf),
    /// Queue `RemoteUpdateSettled` behind the current update.
    SettleRemoteUpdate(WindowId),
    /// Renumber tabs again once focus changes have settled.
    RefreshTitlesLater,
}

pub mod fs_store;
pub mod watcher;

use super::document::{DocumentError, MarkdownDocument};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load(&self, path: &Path) -> Result<MarkdownDocument, DocumentError>;

    async fn save(&self, path: &Path, text: &str) -> Result<(), DocumentError>;

    /// Used to resolve relative paths typed into prompts.
    fn base_dir(&self) -> PathBuf;

    fn encoding_name(&self) -> &'static str;
}

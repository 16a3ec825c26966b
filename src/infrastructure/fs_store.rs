use crate::domain::{
    document::{DocumentError, MarkdownDocument},
    store::DocumentStore,
};
use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use std::path::{Path, PathBuf};

pub struct FsDocumentStore {
    base_dir: PathBuf,
    encoding: &'static Encoding,
}

impl FsDocumentStore {
    pub fn new(base_dir: PathBuf, encoding: &'static Encoding) -> Self {
        Self { base_dir, encoding }
    }

    /// Unknown labels fall back to UTF-8.
    pub fn with_encoding_label(base_dir: PathBuf, label: &str) -> Self {
        let encoding = Encoding::for_label(label.as_bytes()).unwrap_or_else(|| {
            tracing::warn!(label, "unknown document encoding, using UTF-8");
            UTF_8
        });
        Self::new(base_dir, encoding)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn load(&self, path: &Path) -> Result<MarkdownDocument, DocumentError> {
        let path = self.resolve(path);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| DocumentError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded document");
        MarkdownDocument::decode(&path, &bytes, self.encoding)
    }

    async fn save(&self, path: &Path, text: &str) -> Result<(), DocumentError> {
        let path = self.resolve(path);
        let bytes = MarkdownDocument::encode(&path, text, self.encoding)?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| DocumentError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved document");
        Ok(())
    }

    fn base_dir(&self) -> PathBuf {
        self.base_dir.clone()
    }

    fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::ContentType;
    use encoding_rs::WINDOWS_1252;

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path().to_path_buf(), UTF_8);

        store.save(Path::new("notes.md"), "# Notes\n- [ ] ship").await.unwrap();
        let doc = store.load(Path::new("notes.md")).await.unwrap();

        assert_eq!(doc.text, "# Notes\n- [ ] ship");
        assert_eq!(doc.path.as_deref(), Some(dir.path().join("notes.md").as_path()));
        assert_eq!(doc.content_type, ContentType::Markdown);
    }

    #[tokio::test]
    async fn test_load_non_utf8_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, [b'c', b'a', b'f', 0xe9]).unwrap();

        let store = FsDocumentStore::new(dir.path().to_path_buf(), UTF_8);
        let err = store.load(&path).await.unwrap_err();
        assert!(matches!(err, DocumentError::ReadCorruptFile { .. }));

        let latin = FsDocumentStore::new(dir.path().to_path_buf(), WINDOWS_1252);
        assert_eq!(latin.load(&path).await.unwrap().text, "café");
    }

    #[tokio::test]
    async fn test_save_unrepresentable_text_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path().to_path_buf(), WINDOWS_1252);

        let err = store.save(Path::new("a.txt"), "☃").await.unwrap_err();
        assert!(matches!(err, DocumentError::WriteInapplicableEncoding { .. }));
        assert!(!dir.path().join("a.txt").exists());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path().to_path_buf(), UTF_8);
        let err = store.load(Path::new("missing.md")).await.unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
    }

    #[test]
    fn test_unknown_encoding_label_falls_back() {
        let store = FsDocumentStore::with_encoding_label(PathBuf::from("."), "klingon");
        assert_eq!(store.encoding_name(), "UTF-8");
        let store = FsDocumentStore::with_encoding_label(PathBuf::from("."), "latin1");
        assert_eq!(store.encoding_name(), "windows-1252");
    }
}

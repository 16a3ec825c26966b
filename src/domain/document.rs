use encoding_rs::Encoding;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{} could not be read: the file is corrupt or not valid {encoding}", path.display())]
    ReadCorruptFile {
        path: PathBuf,
        encoding: &'static str,
    },
    #[error("{} could not be saved: the text cannot be represented in {encoding}", path.display())]
    WriteInapplicableEncoding {
        path: PathBuf,
        encoding: &'static str,
    },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    pub fn path(&self) -> &Path {
        match self {
            Self::ReadCorruptFile { path, .. }
            | Self::WriteInapplicableEncoding { path, .. }
            | Self::Io { path, .. } => path,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContentType {
    Markdown,
    PlainText,
}

impl ContentType {
    /// Anything without a markdown extension is treated as plain text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("md" | "markdown" | "mdown" | "mkd") => Self::Markdown,
            _ => Self::PlainText,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
            Self::PlainText => "Plain Text",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownDocument {
    pub text: String,
    pub path: Option<PathBuf>,
    pub content_type: ContentType,
    pub dirty: bool,
}

impl Default for MarkdownDocument {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl MarkdownDocument {
    pub fn new(text: String) -> Self {
        Self {
            text,
            path: None,
            content_type: ContentType::Markdown,
            dirty: false,
        }
    }

    pub fn decode(path: &Path, bytes: &[u8], encoding: &'static Encoding) -> Result<Self, DocumentError> {
        let text = encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| DocumentError::ReadCorruptFile {
                path: path.to_path_buf(),
                encoding: encoding.name(),
            })?;

        Ok(Self {
            text: text.into_owned(),
            path: Some(path.to_path_buf()),
            content_type: ContentType::from_path(path),
            dirty: false,
        })
    }

    pub fn encode(path: &Path, text: &str, encoding: &'static Encoding) -> Result<Vec<u8>, DocumentError> {
        let (bytes, _, unmappable) = encoding.encode(text);
        // encoding_rs substitutes HTML entities for unmappable characters; refuse instead.
        if unmappable {
            return Err(DocumentError::WriteInapplicableEncoding {
                path: path.to_path_buf(),
                encoding: encoding.name(),
            });
        }
        Ok(bytes.into_owned())
    }

    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    pub fn bind(&mut self, path: PathBuf) {
        self.content_type = ContentType::from_path(&path);
        self.path = Some(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, WINDOWS_1252};

    #[test]
    fn test_decode_utf8() {
        let doc = MarkdownDocument::decode(Path::new("notes.md"), "# Héllo".as_bytes(), UTF_8).unwrap();
        assert_eq!(doc.text, "# Héllo");
        assert_eq!(doc.content_type, ContentType::Markdown);
        assert!(!doc.dirty);
    }

    #[test]
    fn test_decode_invalid_utf8_is_corrupt() {
        let err = MarkdownDocument::decode(Path::new("bad.md"), &[0x66, 0xff, 0xfe], UTF_8).unwrap_err();
        assert!(matches!(err, DocumentError::ReadCorruptFile { .. }));
        assert_eq!(err.path(), Path::new("bad.md"));
    }

    #[test]
    fn test_encode_unmappable_character() {
        let err = MarkdownDocument::encode(Path::new("a.txt"), "snowman ☃", WINDOWS_1252).unwrap_err();
        assert!(matches!(err, DocumentError::WriteInapplicableEncoding { .. }));

        let bytes = MarkdownDocument::encode(Path::new("a.txt"), "café", WINDOWS_1252).unwrap();
        assert_eq!(bytes, vec![b'c', b'a', b'f', 0xe9]);
    }

    #[test]
    fn test_content_type_falls_back_to_plain_text() {
        assert_eq!(ContentType::from_path(Path::new("README.MD")), ContentType::Markdown);
        assert_eq!(ContentType::from_path(Path::new("notes.txt")), ContentType::PlainText);
        assert_eq!(ContentType::from_path(Path::new("Makefile")), ContentType::PlainText);
    }

    #[test]
    fn test_display_name() {
        let mut doc = MarkdownDocument::default();
        assert_eq!(doc.display_name(), "Untitled");
        doc.bind(PathBuf::from("/tmp/todo.txt"));
        assert_eq!(doc.display_name(), "todo.txt");
        assert_eq!(doc.content_type, ContentType::PlainText);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Process-local reference to uploaded bytes.
///
/// Never serialized: a record reloaded from storage has no handle and its
/// content cannot be downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHandle(String);

impl ContentHandle {
    pub(crate) fn generate() -> Self {
        Self(format!("blob:workhub/{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata of a file stored in a workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceFile {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip)]
    pub content: Option<ContentHandle>,
}

impl WorkspaceFile {
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty() || self.name.to_lowercase().contains(&term)
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_mime(&self.mime_type)
    }
}

/// Coarse file category used for icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Image,
    Text,
    Other,
}

impl FileKind {
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            FileKind::Image
        } else if mime_type.contains("text") || mime_type.contains("document") {
            FileKind::Text
        } else {
            FileKind::Other
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileKind::Image => "image",
            FileKind::Text => "text",
            FileKind::Other => "other",
        })
    }
}

/// A file handed to the upload action.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// How the caller may use a workspace's files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Editor,
    Viewer,
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessLevel::Editor => f.write_str("Editor"),
            AccessLevel::Viewer => f.write_str("Viewer"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceStats {
    pub total_files: usize,
    pub total_size: u64,
    pub contributors: usize,
    pub access: AccessLevel,
}

impl WorkspaceStats {
    pub fn from_files(files: &[WorkspaceFile], access: AccessLevel) -> Self {
        let contributors: HashSet<&str> = files.iter().map(|f| f.uploaded_by.as_str()).collect();
        Self {
            total_files: files.len(),
            total_size: files.iter().map(|f| f.size).sum(),
            contributors: contributors.len(),
            access,
        }
    }
}

/// Render a byte count as `0 Bytes`, `512 Bytes`, `1.5 KB`, `2 MB`, ...
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

use crate::paths;
use serde::{Deserialize, Serialize};

// ===== REMOTE RECORDS =====

/// Content type used for directory nodes that have no backing record.
pub const DIRECTORY_CONTENT_TYPE: &str = "inode/directory";

/// One stored item as returned by the listing call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub path: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default, alias = "size")]
    pub size_bytes: u64,
    #[serde(default)]
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl FileRecord {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let filename = paths::file_name(&paths::normalize(&path)).to_string();
        Self {
            path,
            filename,
            size_bytes: 0,
            uploaded_at: None,
            content_type: None,
        }
    }

    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = size_bytes;
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_uploaded_at(mut self, uploaded_at: impl Into<String>) -> Self {
        self.uploaded_at = Some(uploaded_at.into());
        self
    }

    /// True when the record itself says it is a directory (trailing slash or
    /// directory content type), independent of whether anything lives inside.
    pub fn declares_directory(&self) -> bool {
        self.path.ends_with('/')
            || matches!(
                self.content_type.as_deref(),
                Some(DIRECTORY_CONTENT_TYPE) | Some("directory")
            )
    }

    /// Copy of the record with a normalized path and a filename filled in.
    pub fn normalized(&self) -> Self {
        let path = paths::normalize(&self.path);
        let filename = if self.filename.trim().is_empty() {
            paths::file_name(&path).to_string()
        } else {
            self.filename.clone()
        };
        Self {
            path,
            filename,
            ..self.clone()
        }
    }
}

/// External namespace every path is relative to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Project {
    pub id: String,
    pub name: String,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// ===== TRANSFER TYPES =====

/// File content read from the user's machine, ready for the upload call.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    /// Target name relative to the project root
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Place the file inside `directory` on the remote side.
    pub fn into_directory(mut self, directory: &str) -> Self {
        self.name = paths::join(directory, paths::file_name(&self.name));
        self
    }
}

/// Archive returned by the download call.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedArchive {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_listing_entry() {
        let json = r#"{
            "path": "reports/q1.csv",
            "filename": "q1.csv",
            "size": 2048,
            "uploaded_at": "2024-03-01T10:00:00Z",
            "content_type": "text/csv"
        }"#;
        let record: FileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.path, "reports/q1.csv");
        assert_eq!(record.size_bytes, 2048);
        assert_eq!(record.content_type.as_deref(), Some("text/csv"));
    }

    #[test]
    fn missing_optional_fields_default() {
        let record: FileRecord = serde_json::from_str(r#"{"path": "a/b.txt"}"#).unwrap();
        let normalized = record.normalized();
        assert_eq!(normalized.filename, "b.txt");
        assert_eq!(normalized.size_bytes, 0);
        assert!(normalized.uploaded_at.is_none());
    }

    #[test]
    fn directory_declarations() {
        assert!(FileRecord::new("empty/").declares_directory());
        assert!(FileRecord::new("empty").with_content_type("inode/directory").declares_directory());
        assert!(!FileRecord::new("notes.txt").with_content_type("text/plain").declares_directory());
    }

    #[test]
    fn upload_file_moves_into_directory() {
        let file = UploadFile::new("photo.png", "image/png", vec![1, 2, 3]);
        assert_eq!(file.clone().into_directory("/").name, "photo.png");
        assert_eq!(file.into_directory("media/2024").name, "media/2024/photo.png");
    }
}

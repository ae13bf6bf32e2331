//! Data models for the drive API and persisted credentials.

use serde::{Deserialize, Serialize};

/// Credential set issued by the drive's auth service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebToken {
    pub access_token: String,
    pub refresh_token: String,
    /// Local time in the token zone, `YYYY-MM-DD HH:MM:SS`.
    pub expire_time: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
}

/// Kind of a drive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    File,
    Folder,
}

/// Metadata for a file or folder on the drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntity {
    pub file_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub parent_file_id: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Canonical path, filled in by the client after lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl FileEntity {
    pub fn is_folder(&self) -> bool {
        self.file_type == FileType::Folder
    }
}

impl std::fmt::Display for FileEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size_str = if self.is_folder() {
            "-".to_string()
        } else {
            self.size
                .map(format_size)
                .unwrap_or_else(|| "-".to_string())
        };
        let kind = if self.is_folder() { "dir" } else { "file" };
        let name = self.path.as_deref().unwrap_or(&self.name);
        write!(f, "{}\t{}\t{}\t{}", self.file_id, size_str, kind, name)
    }
}

/// Format bytes into human-readable size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Response from the file list endpoint.
#[derive(Debug, Deserialize)]
pub struct FileListResponse {
    #[serde(default)]
    pub items: Vec<FileEntity>,
    #[serde(default)]
    pub next_marker: Option<String>,
}

/// Drive API error response.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
}

/// Refresh-token exchange response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1048576), "1.00 MB");
        assert_eq!(format_size(1073741824), "1.00 GB");
    }

    #[test]
    fn test_file_entity_deserialize() {
        let json = r#"{
            "file_id": "abc123",
            "name": "test.txt",
            "type": "file",
            "size": 1024,
            "parent_file_id": "root"
        }"#;

        let entity: FileEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.file_id, "abc123");
        assert_eq!(entity.name, "test.txt");
        assert_eq!(entity.file_type, FileType::File);
        assert_eq!(entity.size, Some(1024));
        assert!(entity.path.is_none());
    }

    #[test]
    fn test_file_entity_display() {
        let entity = FileEntity {
            file_id: "abc123".to_string(),
            name: "test.txt".to_string(),
            file_type: FileType::File,
            size: Some(1024),
            parent_file_id: None,
            updated_at: None,
            path: Some("/docs/test.txt".to_string()),
        };

        let display = format!("{}", entity);
        assert!(display.contains("abc123"));
        assert!(display.contains("/docs/test.txt"));
        assert!(display.contains("1.00 KB"));
    }

    #[test]
    fn test_web_token_defaults_optional_fields() {
        let json = r#"{
            "access_token": "a",
            "refresh_token": "r",
            "expire_time": "2024-01-01 12:00:00"
        }"#;

        let token: WebToken = serde_json::from_str(json).unwrap();
        assert_eq!(token.refresh_token, "r");
        assert_eq!(token.expires_in, 0);
        assert!(token.token_type.is_empty());
    }
}

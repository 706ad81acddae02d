//! Resume file storage on the local filesystem.

use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Accepted resume content types and the extension stored for each.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("application/pdf", "pdf"),
    ("application/msword", "doc"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "docx",
    ),
];

/// URL prefix under which stored files are served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// A resume written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResume {
    pub file_name: String,
    /// Public URL, `/uploads/<file_name>`
    pub url: String,
    pub size: usize,
}

/// Writes resumes into the upload directory under random names.
#[derive(Debug, Clone)]
pub struct ResumeStore {
    dir: PathBuf,
    max_size: usize,
}

impl ResumeStore {
    pub fn new(dir: impl Into<PathBuf>, max_size: usize) -> Self {
        Self {
            dir: dir.into(),
            max_size,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it is missing.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Validate type and size, returning the extension to store under.
    pub fn check(&self, content_type: Option<&str>, size: usize) -> ApiResult<&'static str> {
        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_lowercase())
            .unwrap_or_default();

        let ext = ALLOWED_TYPES
            .iter()
            .find(|(allowed, _)| *allowed == mime)
            .map(|(_, ext)| *ext)
            .ok_or_else(|| ApiError::bad_request("Only PDF and Word documents are allowed"))?;

        if size > self.max_size {
            return Err(ApiError::bad_request(format!(
                "File too large. Maximum size is {} bytes",
                self.max_size
            )));
        }

        Ok(ext)
    }

    /// Validate and persist a resume.
    pub async fn save(&self, content_type: Option<&str>, data: &[u8]) -> ApiResult<StoredResume> {
        let ext = self.check(content_type, data.len())?;
        let file_name = format!("{}.{}", Uuid::new_v4().simple(), ext);

        self.ensure_dir()
            .await
            .map_err(|e| ApiError::internal(format!("Failed to create upload dir: {}", e)))?;
        tokio::fs::write(self.dir.join(&file_name), data)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to write resume: {}", e)))?;

        info!("Stored resume {} ({} bytes)", file_name, data.len());

        Ok(StoredResume {
            url: format!("{}/{}", UPLOADS_PREFIX, file_name),
            file_name,
            size: data.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_content_type() {
        let store = ResumeStore::new("unused", 1024);
        assert_eq!(store.check(Some("application/pdf"), 10).unwrap(), "pdf");
        assert_eq!(store.check(Some("application/msword"), 10).unwrap(), "doc");
        assert!(store.check(Some("image/png"), 10).is_err());
        assert!(store.check(None, 10).is_err());
    }

    #[test]
    fn test_check_size() {
        let store = ResumeStore::new("unused", 1024);
        assert!(store.check(Some("application/pdf"), 1024).is_ok());
        assert!(store.check(Some("application/pdf"), 1025).is_err());
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(tmp.path().join("uploads"), 1024);

        let stored = store
            .save(Some("application/pdf"), b"%PDF-1.4 test")
            .await
            .unwrap();

        assert!(stored.url.starts_with("/uploads/"));
        assert!(stored.file_name.ends_with(".pdf"));
        let on_disk = std::fs::read(store.dir().join(&stored.file_name)).unwrap();
        assert_eq!(on_disk, b"%PDF-1.4 test");
    }
}

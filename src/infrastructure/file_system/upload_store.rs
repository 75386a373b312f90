use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug)]
pub enum UploadError {
    InvalidFilename,
    Io(String),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::InvalidFilename => write!(f, "Error parsing uploaded filename."),
            UploadError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for UploadError {}

/// Writes uploaded documents under a single local directory, keyed by their
/// sanitized base name. A later upload of the same name overwrites the file.
pub struct UploadStore {
    upload_dir: PathBuf,
}

impl UploadStore {
    pub fn new(upload_dir: PathBuf) -> Self {
        Self { upload_dir }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Strip any path components, keeping only the base file name.
    pub fn sanitize_file_name(file_name: &str) -> Result<String, UploadError> {
        Path::new(file_name)
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.to_string())
            .filter(|name| !name.is_empty())
            .ok_or(UploadError::InvalidFilename)
    }

    /// Persist the raw bytes and return the stored path with the name used.
    pub async fn store(&self, file_name: &str, data: &[u8]) -> Result<(PathBuf, String), UploadError> {
        let safe_name = Self::sanitize_file_name(file_name)?;

        fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| UploadError::Io(e.to_string()))?;

        let file_path = self.upload_dir.join(&safe_name);
        fs::write(&file_path, data)
            .await
            .map_err(|e| UploadError::Io(e.to_string()))?;

        Ok((file_path, safe_name))
    }
}

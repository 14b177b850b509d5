//! Local seed file directory

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::errors::{Result, SeedError};
use crate::model::{mime_type_for, FileData};
use crate::ports::AssetSource;

/// Seed files addressed by name under a fixed root, e.g. `data/uploads`
#[derive(Debug, Clone)]
pub struct UploadsDir {
    root: PathBuf,
}

impl UploadsDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl AssetSource for UploadsDir {
    async fn file_data(&self, file_name: &str) -> Result<FileData> {
        let path = self.root.join(file_name);
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| SeedError::FileMetadata {
                file_name: file_name.to_string(),
                reason: e.to_string(),
            })?;

        if !metadata.is_file() {
            return Err(SeedError::FileMetadata {
                file_name: file_name.to_string(),
                reason: "not a regular file".to_string(),
            }
            .into());
        }

        Ok(FileData {
            path,
            original_file_name: file_name.to_string(),
            size: metadata.len(),
            mime_type: mime_type_for(file_name),
        })
    }
}

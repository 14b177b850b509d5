//! Filesystem blob store keyed by SHA-256 digest

#![allow(clippy::result_large_err)]

use crate::cas::atomic::atomic_write;
use crate::cas::sharding::BlobKey;
use crate::digest::sha256_hex;
use crate::errors::{blob_collision, blob_missing, io_error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Uploaded file bytes, stored once per distinct content
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write content and return its digest
    ///
    /// Writing identical content twice is a no-op; different content under
    /// an existing digest is reported as a collision.
    pub fn write(&self, content: &[u8], extension: &str) -> Result<String> {
        let digest = sha256_hex(content);
        let target_path = BlobKey::new(&digest, extension).path_under(&self.root);

        if target_path.exists() {
            let existing = fs::read(&target_path).map_err(|e| io_error("read_blob", e))?;
            return if existing == content {
                Ok(digest)
            } else {
                Err(blob_collision(&digest))
            };
        }

        atomic_write(&target_path, content)?;
        Ok(digest)
    }

    /// Read a blob back by digest and extension
    pub fn read(&self, digest: &str, extension: &str) -> Result<Vec<u8>> {
        let path = BlobKey::new(digest, extension).path_under(&self.root);
        if !path.exists() {
            return Err(blob_missing(digest));
        }
        fs::read(&path).map_err(|e| io_error("read_blob", e))
    }

    /// Public URL path of a blob, relative to the uploads mount
    pub fn url_for(&self, digest: &str, extension: &str) -> String {
        format!("/uploads/{}", BlobKey::new(digest, extension).file_name())
    }

    /// Number of blobs on disk
    pub fn count(&self) -> Result<usize> {
        if !self.root.exists() {
            return Ok(0);
        }
        let mut count = 0;
        for shard in fs::read_dir(&self.root).map_err(|e| io_error("list_blobs", e))? {
            let shard = shard.map_err(|e| io_error("list_blobs", e))?;
            if shard.path().is_dir() {
                count += fs::read_dir(shard.path())
                    .map_err(|e| io_error("list_blobs", e))?
                    .count();
            }
        }
        Ok(count)
    }
}

//! Asset resolution with upload deduplication
//!
//! Names are resolved one at a time. Because nothing else resolves
//! concurrently, "look up, then upload if absent" cannot race with itself
//! and each base name is uploaded at most once per run. Resolving in
//! parallel would need a lock around `resolve`.

use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::errors::{ExError, ExErrorKind, Result, SeedError};
use crate::model::{base_name, AssetHandle, FileInfo, Resolution};
use crate::ports::{AssetSource, AssetStore};
use crate::{log_op_end, log_op_error, log_op_start};

#[derive(Clone)]
pub struct AssetResolver {
    store: Arc<dyn AssetStore>,
    files: Arc<dyn AssetSource>,
}

impl AssetResolver {
    pub fn new(store: Arc<dyn AssetStore>, files: Arc<dyn AssetSource>) -> Self {
        Self { store, files }
    }

    /// Resolve file names to persisted assets, uploading missing ones
    ///
    /// Assets that already existed come first, newly uploaded ones after
    /// them, each group in input order. One resulting asset is returned as
    /// `Resolution::One`, otherwise `Resolution::Many`.
    pub async fn resolve<S>(&self, file_names: &[S]) -> Result<Resolution>
    where
        S: AsRef<str> + Sync,
    {
        let mut existing = Vec::new();
        let mut uploaded = Vec::new();

        for file_name in file_names {
            let file_name = file_name.as_ref();
            let name = base_name(file_name);

            match self.store.find_asset_by_name(name).await? {
                Some(handle) => {
                    debug!(file_name, asset_id = handle.id, "reusing existing asset");
                    existing.push(handle);
                }
                None => uploaded.push(self.upload(file_name, name).await?),
            }
        }

        existing.extend(uploaded);
        Ok(Resolution::from_handles(existing))
    }

    /// Resolve a single file name to its scalar handle
    pub async fn resolve_one(&self, file_name: &str) -> Result<AssetHandle> {
        match self.resolve(&[file_name]).await? {
            Resolution::One(handle) => Ok(handle),
            Resolution::Many(handles) => Err(ExError::new(ExErrorKind::Internal)
                .with_op("resolve_asset")
                .with_file_name(file_name)
                .with_message(format!("expected one asset, got {}", handles.len()))),
        }
    }

    async fn upload(&self, file_name: &str, name: &str) -> Result<AssetHandle> {
        let start = Instant::now();
        log_op_start!("upload", file_name = file_name);

        let result: Result<AssetHandle> = async {
            let file = self.files.file_data(file_name).await?;
            let resolution = self
                .store
                .upload(file, FileInfo::for_base_name(name))
                .await
                .map_err(|e| e.with_file_name(file_name))?;
            resolution.into_first().ok_or_else(|| {
                ExError::from(SeedError::EmptyUpload {
                    file_name: file_name.to_string(),
                })
            })
        }
        .await;

        match &result {
            Ok(handle) => {
                log_op_end!(
                    "upload",
                    duration_ms = start.elapsed().as_millis() as u64,
                    file_name = file_name,
                    asset_id = handle.id
                );
            }
            Err(err) => {
                log_op_error!(
                    "upload",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    file_name = file_name
                );
            }
        }
        result
    }
}

#![allow(clippy::result_large_err)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{io_error, Result};

/// Write `content` to `target` so that readers see either nothing or the
/// whole file. The parent directory is created on demand.
pub fn atomic_write(target: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_blob_dir", e))?;
    }

    let partial = partial_path(target);
    let written = File::create(&partial)
        .and_then(|mut file| {
            file.write_all(content)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&partial, target));

    written.map_err(|e| {
        let _ = fs::remove_file(&partial);
        io_error("write_blob", e).with_file_name(target.display().to_string())
    })
}

/// Sibling of `target`, unique per process so concurrent writers don't clash
fn partial_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.{}.partial", name, std::process::id()))
}

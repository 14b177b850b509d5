use std::path::{Path, PathBuf};

/// Location of one blob: its digest plus the original file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobKey<'a> {
    pub digest: &'a str,
    pub extension: &'a str,
}

impl<'a> BlobKey<'a> {
    pub fn new(digest: &'a str, extension: &'a str) -> Self {
        Self { digest, extension }
    }

    /// `<digest>.<ext>`, or the bare digest without an extension
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.digest.to_string()
        } else {
            format!("{}.{}", self.digest, self.extension)
        }
    }

    /// Blobs fan out into directories named after the first two hex digits
    pub fn path_under(&self, root: &Path) -> PathBuf {
        let shard = self.digest.get(..2).unwrap_or(self.digest);
        root.join(shard).join(self.file_name())
    }
}

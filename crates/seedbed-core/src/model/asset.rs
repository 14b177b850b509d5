//! Asset references and the resolver's result shape

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A persisted binary asset as returned by the asset store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetHandle {
    pub id: i64,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// An asset field of a fixture: a bare file name until it is resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetRef {
    Name(String),
    Resolved(AssetHandle),
}

/// Result of resolving a list of file names
///
/// Exactly one resulting asset is returned as `One`, anything else as
/// `Many`. A one-file slider therefore serialises as a scalar object; kept
/// as is because stored content may rely on the unwrapped form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resolution {
    One(AssetHandle),
    Many(Vec<AssetHandle>),
}

impl Resolution {
    pub fn from_handles(mut handles: Vec<AssetHandle>) -> Self {
        if handles.len() == 1 {
            Resolution::One(handles.remove(0))
        } else {
            Resolution::Many(handles)
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Resolution::One(_) => 1,
            Resolution::Many(handles) => handles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First handle regardless of shape
    pub fn into_first(self) -> Option<AssetHandle> {
        match self {
            Resolution::One(handle) => Some(handle),
            Resolution::Many(handles) => handles.into_iter().next(),
        }
    }

    pub fn into_vec(self) -> Vec<AssetHandle> {
        match self {
            Resolution::One(handle) => vec![handle],
            Resolution::Many(handles) => handles,
        }
    }
}

/// Local metadata of a seed file, handed to the upload collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    pub path: PathBuf,
    pub original_file_name: String,
    pub size: u64,
    pub mime_type: String,
}

/// Caption information attached to an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    pub caption: String,
    pub alternative_text: String,
}

impl FileInfo {
    pub fn for_base_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            caption: name.to_string(),
            alternative_text: format!("An image uploaded to the CMS called {}", name),
        }
    }
}

/// Dedup key of a file name: everything before the first `.`
pub fn base_name(file_name: &str) -> &str {
    match file_name.find('.') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

/// MIME type guessed from the text after the last `.`; empty when unknown
pub fn mime_type_for(file_name: &str) -> String {
    let ext = file_name.rsplit('.').next().unwrap_or("");
    mime_guess::from_ext(ext)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_default()
}

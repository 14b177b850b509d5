//! Collaborator ports
//!
//! The pipeline talks to the content backend only through these traits.
//! Implementations are injected into the `Seeder`; the SQLite backend in
//! `seedbed-store` is one of them, the test doubles in `tests/common` another.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::Result;
use crate::model::{
    AssetHandle, ContentType, Fields, FileData, FileInfo, PermissionGrant, Publication,
    Resolution, Role,
};

/// Identifier of a created entry
pub type EntryId = i64;

/// Content query and creation service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Look up a role by its type (`public`, `authenticated`)
    async fn find_role(&self, role_type: &str) -> Result<Option<Role>>;

    /// Create one permission row bound to a role
    async fn create_permission(&self, grant: &PermissionGrant) -> Result<()>;

    /// Create an entry of `content_type`
    async fn create_entry(
        &self,
        content_type: ContentType,
        data: Fields,
        publication: Publication,
    ) -> Result<EntryId>;
}

/// Asset lookup and upload service
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Find an asset whose name equals `name` exactly
    async fn find_asset_by_name(&self, name: &str) -> Result<Option<AssetHandle>>;

    /// Upload a local file; backends may answer with one handle or a list
    async fn upload(&self, file: FileData, info: FileInfo) -> Result<Resolution>;
}

/// Read-only access to the local directory of seed files
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn file_data(&self, file_name: &str) -> Result<FileData>;
}

/// Namespace of a key-value entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreScope {
    pub environment: String,
    pub kind: String,
    pub name: String,
}

impl StoreScope {
    /// Scope holding the seeder's own setup state for `environment`
    pub fn setup(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            kind: "type".to_string(),
            name: "setup".to_string(),
        }
    }
}

/// Environment-scoped key-value persistence
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, scope: &StoreScope, key: &str) -> Result<Option<Value>>;

    async fn set(&self, scope: &StoreScope, key: &str, value: Value) -> Result<()>;
}

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use seedbed_core::errors::{ExError, ExErrorKind, Result};
use seedbed_core::model::{
    mime_type_for, AssetHandle, ContentType, Fields, FileData, FileInfo, PermissionGrant,
    Publication, Resolution, Role, RoleId,
};
use seedbed_core::ports::{
    AssetSource, AssetStore, ContentService, EntryId, KeyValueStore, StoreScope,
};
use seedbed_core::seed::Collaborators;

/// An entry as the in-memory backend stored it
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub id: EntryId,
    pub content_type: ContentType,
    pub data: Fields,
    pub publication: Publication,
}

#[derive(Default)]
struct BackendState {
    roles: Vec<Role>,
    permissions: Vec<PermissionGrant>,
    entries: Vec<StoredEntry>,
    assets: Vec<AssetHandle>,
    uploads: Vec<(FileData, FileInfo)>,
    kv: HashMap<(String, String, String, String), Value>,
    next_id: i64,
}

/// In-memory content backend implementing every port but `AssetSource`
///
/// Failure injection:
/// - `fail_entries_containing(marker)`: entries whose JSON contains `marker`
///   are rejected
/// - `fail_grant(action_uid)`: that permission request fails
/// - `fail_uploads_of(name)`: uploading asset `name` fails
/// - `upload_returns_list()`: upload answers with a one-element list
#[derive(Default)]
pub struct InMemoryBackend {
    state: Mutex<BackendState>,
    entry_markers: Mutex<Vec<String>>,
    failing_grants: Mutex<HashSet<String>>,
    failing_uploads: Mutex<HashSet<String>>,
    list_uploads: Mutex<bool>,
    kv_broken: Mutex<bool>,
}

impl InMemoryBackend {
    /// Backend with the `public` and `authenticated` roles in place
    pub fn new() -> Self {
        let backend = Self::default();
        {
            let mut state = backend.state.lock().unwrap();
            state.roles.push(Role {
                id: RoleId(1),
                name: "Authenticated".to_string(),
                role_type: "authenticated".to_string(),
            });
            state.roles.push(Role {
                id: RoleId(2),
                name: "Public".to_string(),
                role_type: "public".to_string(),
            });
        }
        backend
    }

    /// Backend with no roles at all
    pub fn without_roles() -> Self {
        Self::default()
    }

    pub fn fail_entries_containing(&self, marker: &str) {
        self.entry_markers.lock().unwrap().push(marker.to_string());
    }

    pub fn fail_grant(&self, action_uid: &str) {
        self.failing_grants
            .lock()
            .unwrap()
            .insert(action_uid.to_string());
    }

    pub fn fail_uploads_of(&self, name: &str) {
        self.failing_uploads.lock().unwrap().insert(name.to_string());
    }

    pub fn upload_returns_list(&self) {
        *self.list_uploads.lock().unwrap() = true;
    }

    pub fn break_kv(&self) {
        *self.kv_broken.lock().unwrap() = true;
    }

    /// Pre-existing asset, as if uploaded by an earlier run
    pub fn add_asset(&self, name: &str) -> AssetHandle {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let handle = AssetHandle {
            id: 1000 + state.next_id,
            name: name.to_string(),
            size: 1,
            mime_type: String::new(),
            url: None,
        };
        state.assets.push(handle.clone());
        handle
    }

    pub fn entries(&self) -> Vec<StoredEntry> {
        self.state.lock().unwrap().entries.clone()
    }

    pub fn entries_of(&self, content_type: ContentType) -> Vec<StoredEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.content_type == content_type)
            .collect()
    }

    pub fn permissions(&self) -> Vec<PermissionGrant> {
        self.state.lock().unwrap().permissions.clone()
    }

    pub fn assets(&self) -> Vec<AssetHandle> {
        self.state.lock().unwrap().assets.clone()
    }

    pub fn uploads(&self) -> Vec<(FileData, FileInfo)> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub fn upload_count(&self) -> usize {
        self.state.lock().unwrap().uploads.len()
    }
}

#[async_trait]
impl ContentService for InMemoryBackend {
    async fn find_role(&self, role_type: &str) -> Result<Option<Role>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .roles
            .iter()
            .find(|r| r.role_type == role_type)
            .cloned())
    }

    async fn create_permission(&self, grant: &PermissionGrant) -> Result<()> {
        if self.failing_grants.lock().unwrap().contains(&grant.action_uid()) {
            return Err(ExError::new(ExErrorKind::ExternalService)
                .with_op("create_permission")
                .with_message(format!("rejected {}", grant.action_uid())));
        }
        self.state.lock().unwrap().permissions.push(grant.clone());
        Ok(())
    }

    async fn create_entry(
        &self,
        content_type: ContentType,
        data: Fields,
        publication: Publication,
    ) -> Result<EntryId> {
        let text = Value::Object(data.clone()).to_string();
        if self
            .entry_markers
            .lock()
            .unwrap()
            .iter()
            .any(|marker| text.contains(marker.as_str()))
        {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("create_entry")
                .with_message("validation failed"));
        }

        let mut state = self.state.lock().unwrap();
        if content_type.is_single_type()
            && state.entries.iter().any(|e| e.content_type == content_type)
        {
            return Err(ExError::new(ExErrorKind::AlreadyExists)
                .with_op("create_entry")
                .with_message("single type already has an entry"));
        }
        state.next_id += 1;
        let id = state.next_id;
        state.entries.push(StoredEntry {
            id,
            content_type,
            data,
            publication,
        });
        Ok(id)
    }
}

#[async_trait]
impl AssetStore for InMemoryBackend {
    async fn find_asset_by_name(&self, name: &str) -> Result<Option<AssetHandle>> {
        let state = self.state.lock().unwrap();
        Ok(state.assets.iter().find(|a| a.name == name).cloned())
    }

    async fn upload(&self, file: FileData, info: FileInfo) -> Result<Resolution> {
        if self.failing_uploads.lock().unwrap().contains(&info.name) {
            return Err(ExError::new(ExErrorKind::ExternalService)
                .with_op("upload")
                .with_message("storage offline"));
        }

        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let handle = AssetHandle {
            id: state.next_id,
            name: info.name.clone(),
            size: file.size,
            mime_type: file.mime_type.clone(),
            url: Some(format!("/uploads/{}", file.original_file_name)),
        };
        state.assets.push(handle.clone());
        state.uploads.push((file, info));

        if *self.list_uploads.lock().unwrap() {
            Ok(Resolution::Many(vec![handle]))
        } else {
            Ok(Resolution::One(handle))
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryBackend {
    async fn get(&self, scope: &StoreScope, key: &str) -> Result<Option<Value>> {
        if *self.kv_broken.lock().unwrap() {
            return Err(ExError::new(ExErrorKind::Persistence).with_message("store offline"));
        }
        let state = self.state.lock().unwrap();
        Ok(state.kv.get(&kv_key(scope, key)).cloned())
    }

    async fn set(&self, scope: &StoreScope, key: &str, value: Value) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .kv
            .insert(kv_key(scope, key), value);
        Ok(())
    }
}

fn kv_key(scope: &StoreScope, key: &str) -> (String, String, String, String) {
    (
        scope.environment.clone(),
        scope.kind.clone(),
        scope.name.clone(),
        key.to_string(),
    )
}

/// Seed files that "exist" without touching the disk
#[derive(Default)]
pub struct FakeFiles {
    missing: Mutex<HashSet<String>>,
}

impl FakeFiles {
    pub fn mark_missing(&self, file_name: &str) {
        self.missing.lock().unwrap().insert(file_name.to_string());
    }
}

#[async_trait]
impl AssetSource for FakeFiles {
    async fn file_data(&self, file_name: &str) -> Result<FileData> {
        if self.missing.lock().unwrap().contains(file_name) {
            return Err(ExError::new(ExErrorKind::Io)
                .with_op("file_data")
                .with_file_name(file_name)
                .with_message("no such file"));
        }
        Ok(FileData {
            path: format!("data/uploads/{}", file_name).into(),
            original_file_name: file_name.to_string(),
            size: file_name.len() as u64,
            mime_type: mime_type_for(file_name),
        })
    }
}

/// Backend and file source wired together
pub struct Harness {
    pub backend: Arc<InMemoryBackend>,
    pub files: Arc<FakeFiles>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_backend(InMemoryBackend::new())
    }

    pub fn with_backend(backend: InMemoryBackend) -> Self {
        Self {
            backend: Arc::new(backend),
            files: Arc::new(FakeFiles::default()),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            content: self.backend.clone(),
            assets: self.backend.clone(),
            files: self.files.clone(),
            kv: self.backend.clone(),
        }
    }
}

pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// A small blog-plus-smart-home fixture document
pub fn blog_fixture() -> Value {
    json!({
        "categories": [
            {"name": "news", "slug": "news"},
            {"name": "tech", "slug": "tech"}
        ],
        "authors": [
            {"name": "David Doe", "email": "daviddoe@strapi.io", "avatar": "daviddoe@strapi.io.jpg"},
            {"name": "Sarah Baker", "email": "sarahbaker@strapi.io", "avatar": "sarahbaker@strapi.io.jpg"}
        ],
        "articles": [
            {
                "title": "The internet's Own boy",
                "slug": "the-internet-s-own-boy",
                "blocks": [
                    {"__component": "shared.rich-text", "body": "Hello"},
                    {"__component": "shared.media", "file": "coffee-art.jpg"},
                    {"__component": "shared.slider", "files": ["coffee-art.jpg", "coffee-beans.jpg"]}
                ]
            },
            {
                "title": "Beautiful picture",
                "slug": "beautiful-picture"
            }
        ],
        "global": {
            "siteName": "Strapi Blog",
            "defaultSeo": {"metaTitle": "Page", "metaDescription": "A blog"}
        },
        "about": {
            "title": "About the strapi blog",
            "blocks": [
                {"__component": "shared.quote", "title": "Thelonius Monk", "body": "You've got to dig it to dig it, you dig?"},
                {"__component": "shared.media", "file": "coffee-art.jpg"}
            ]
        }
    })
}

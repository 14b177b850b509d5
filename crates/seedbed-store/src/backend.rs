//! SQLite implementation of the seeding ports
//!
//! One connection is shared behind a mutex. Statements are short and the
//! seeder issues them one at a time, so they run inline on the calling task.

#![allow(clippy::result_large_err)]

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

use seedbed_core::model::{
    AssetHandle, ContentType, Fields, FileData, FileInfo, PermissionGrant, Publication,
    Resolution, Role, RoleId,
};
use seedbed_core::ports::{AssetStore, ContentService, EntryId, KeyValueStore, StoreScope};

use crate::cas::BlobStore;
use crate::db;
use crate::errors::{from_rusqlite, io_error, poisoned, Result};
use crate::migrations::{apply_migrations, is_current};

#[derive(Clone)]
pub struct SqliteBackend {
    conn: Arc<Mutex<Connection>>,
    blobs: BlobStore,
}

impl SqliteBackend {
    /// Wrap an already migrated connection
    pub fn new(conn: Connection, blobs: BlobStore) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            blobs,
        }
    }

    /// Open (or create) the database at `database` and bring its schema up to date
    pub fn open(database: &Path, blob_dir: &Path) -> Result<Self> {
        let mut conn = db::open(database)?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self::new(conn, BlobStore::new(blob_dir)))
    }

    /// Open an existing, fully migrated database for inspection only
    ///
    /// Returns `None` when the file is missing or its schema predates the
    /// embedded migrations. Nothing is created or migrated; writes through
    /// the returned backend fail.
    pub fn open_read_only(database: &Path, blob_dir: &Path) -> Result<Option<Self>> {
        let Some(conn) = db::open_read_only(database)? else {
            return Ok(None);
        };
        if !is_current(&conn)? {
            return Ok(None);
        }
        Ok(Some(Self::new(conn, BlobStore::new(blob_dir))))
    }

    /// In-memory database with blobs under `blob_dir` (for testing)
    pub fn open_in_memory(blob_dir: &Path) -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        apply_migrations(&mut conn)?;
        Ok(Self::new(conn, BlobStore::new(blob_dir)))
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.conn.lock().map_err(|_| poisoned())?;
        f(&conn).map_err(from_rusqlite)
    }

    /// Stored payloads of `content_type`, oldest first
    pub fn entries(&self, content_type: ContentType) -> Result<Vec<Fields>> {
        let raw: Vec<String> = self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT data FROM entries WHERE content_type = ?1 ORDER BY id")?;
            let rows = stmt.query_map([content_type.as_str()], |row| row.get(0))?;
            rows.collect()
        })?;

        raw.iter()
            .map(|data| -> Result<Fields> {
                match serde_json::from_str::<Value>(data)? {
                    Value::Object(fields) => Ok(fields),
                    _ => Ok(Fields::new()),
                }
            })
            .collect()
    }

    /// Entry counts per content type, in `ContentType::ALL` order
    pub fn entry_counts(&self) -> Result<Vec<(ContentType, usize)>> {
        ContentType::ALL
            .iter()
            .map(|ct| {
                let count: i64 = self.with_conn(|conn| {
                    conn.query_row(
                        "SELECT COUNT(*) FROM entries WHERE content_type = ?1",
                        [ct.as_str()],
                        |row| row.get(0),
                    )
                })?;
                Ok((*ct, count as usize))
            })
            .collect()
    }

    pub fn file_count(&self) -> Result<usize> {
        let count: i64 =
            self.with_conn(|conn| conn.query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0)))?;
        Ok(count as usize)
    }

    /// Actions granted to the role of type `role_type`
    pub fn granted_actions(&self, role_type: &str) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT p.action FROM permissions p JOIN roles r ON r.id = p.role_id
                 WHERE r.type = ?1 ORDER BY p.id",
            )?;
            let rows = stmt.query_map([role_type], |row| row.get(0))?;
            rows.collect()
        })
    }
}

#[async_trait]
impl ContentService for SqliteBackend {
    async fn find_role(&self, role_type: &str) -> Result<Option<Role>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, type FROM roles WHERE type = ?1",
                [role_type],
                |row| {
                    Ok(Role {
                        id: RoleId(row.get(0)?),
                        name: row.get(1)?,
                        role_type: row.get(2)?,
                    })
                },
            )
            .optional()
        })
    }

    async fn create_permission(&self, grant: &PermissionGrant) -> Result<()> {
        let action = grant.action_uid();
        let now = chrono::Utc::now().to_rfc3339();
        // Granting an already granted action is a no-op
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO permissions (action, role_id, created_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT (action, role_id) DO NOTHING",
                params![action, grant.role_id.0, now],
            )
        })?;
        debug!(action = %action, role_id = %grant.role_id, "permission granted");
        Ok(())
    }

    async fn create_entry(
        &self,
        content_type: ContentType,
        data: Fields,
        publication: Publication,
    ) -> Result<EntryId> {
        let slug = data.get("slug").and_then(Value::as_str).map(str::to_string);
        let payload = Value::Object(data).to_string();
        let now = chrono::Utc::now().to_rfc3339();
        let published_at = match publication {
            Publication::Published => Some(now.clone()),
            Publication::Unversioned => None,
        };

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO entries (content_type, slug, data, published_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![content_type.as_str(), slug, payload, published_at, now],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .map_err(|e| e.with_op("create_entry"))
    }
}

#[async_trait]
impl AssetStore for SqliteBackend {
    async fn find_asset_by_name(&self, name: &str) -> Result<Option<AssetHandle>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, size, mime, url FROM files WHERE name = ?1 ORDER BY id LIMIT 1",
                [name],
                |row| {
                    Ok(AssetHandle {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        size: row.get::<_, i64>(2)? as u64,
                        mime_type: row.get(3)?,
                        url: row.get(4)?,
                    })
                },
            )
            .optional()
        })
    }

    async fn upload(&self, file: FileData, info: FileInfo) -> Result<Resolution> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| io_error("read_upload", e).with_file_name(file.original_file_name.clone()))?;

        let ext = file
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();
        let digest = self.blobs.write(&bytes, &ext)?;
        let url = self.blobs.url_for(&digest, &ext);
        let size = bytes.len() as u64;
        let now = chrono::Utc::now().to_rfc3339();

        let id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO files (name, caption, alternative_text, ext, mime, size, hash, url, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    info.name,
                    info.caption,
                    info.alternative_text,
                    ext,
                    file.mime_type,
                    size as i64,
                    digest,
                    url,
                    now
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        debug!(asset_id = id, name = %info.name, digest = %digest, "file stored");

        Ok(Resolution::One(AssetHandle {
            id,
            name: info.name,
            size,
            mime_type: file.mime_type,
            url: Some(url),
        }))
    }
}

#[async_trait]
impl KeyValueStore for SqliteBackend {
    async fn get(&self, scope: &StoreScope, key: &str) -> Result<Option<Value>> {
        let raw: Option<String> = self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM store_entries
                 WHERE environment = ?1 AND type = ?2 AND name = ?3 AND key = ?4",
                params![scope.environment, scope.kind, scope.name, key],
                |row| row.get(0),
            )
            .optional()
        })?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, scope: &StoreScope, key: &str, value: Value) -> Result<()> {
        let text = value.to_string();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO store_entries (environment, type, name, key, value)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (environment, type, name, key) DO UPDATE SET value = excluded.value",
                params![scope.environment, scope.kind, scope.name, key, text],
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedbed_core::errors::ExErrorKind;
    use seedbed_core::model::Action;
    use serde_json::json;
    use tempfile::TempDir;

    fn backend() -> (SqliteBackend, TempDir) {
        let dir = TempDir::new().unwrap();
        let backend = SqliteBackend::open_in_memory(&dir.path().join("blobs")).unwrap();
        (backend, dir)
    }

    fn fields(value: Value) -> Fields {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_read_only_open_needs_migrated_file() {
        let dir = TempDir::new().unwrap();
        let database = dir.path().join("db").join("content.db");
        let blobs = dir.path().join("blobs");

        assert!(SqliteBackend::open_read_only(&database, &blobs).unwrap().is_none());
        assert!(!database.exists());
        assert!(!dir.path().join("db").exists());

        drop(SqliteBackend::open(&database, &blobs).unwrap());

        let backend = SqliteBackend::open_read_only(&database, &blobs)
            .unwrap()
            .expect("migrated database opens");
        assert_eq!(backend.file_count().unwrap(), 0);
        assert!(!blobs.exists());
    }

    #[test]
    fn test_read_only_open_skips_unmigrated_file() {
        let dir = TempDir::new().unwrap();
        let database = dir.path().join("content.db");
        Connection::open(&database).unwrap();

        let opened = SqliteBackend::open_read_only(&database, &dir.path().join("blobs")).unwrap();

        assert!(opened.is_none());
    }

    #[tokio::test]
    async fn test_public_role_is_preseeded() {
        let (backend, _dir) = backend();
        let role = backend.find_role("public").await.unwrap().unwrap();
        assert_eq!(role.role_type, "public");
        assert!(backend.find_role("editor").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_grant_is_noop() {
        let (backend, _dir) = backend();
        let role = backend.find_role("public").await.unwrap().unwrap();
        let grant = PermissionGrant {
            content_type: ContentType::Faq,
            action: Action::Find,
            role_id: role.id,
        };

        backend.create_permission(&grant).await.unwrap();
        backend.create_permission(&grant).await.unwrap();

        assert_eq!(
            backend.granted_actions("public").unwrap(),
            vec!["api::faq.faq.find".to_string()]
        );
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_already_exists() {
        let (backend, _dir) = backend();
        let data = fields(json!({"name": "news", "slug": "news"}));

        backend
            .create_entry(ContentType::Category, data.clone(), Publication::Unversioned)
            .await
            .unwrap();
        let err = backend
            .create_entry(ContentType::Category, data, Publication::Unversioned)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
        assert_eq!(err.op(), Some("create_entry"));
    }

    #[tokio::test]
    async fn test_single_type_holds_one_entry() {
        let (backend, _dir) = backend();
        backend
            .create_entry(ContentType::Global, Fields::new(), Publication::Published)
            .await
            .unwrap();
        let err = backend
            .create_entry(ContentType::Global, Fields::new(), Publication::Published)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
    }

    #[tokio::test]
    async fn test_entries_without_slug_do_not_collide() {
        let (backend, _dir) = backend();
        for question in ["a?", "b?"] {
            backend
                .create_entry(
                    ContentType::Faq,
                    fields(json!({"question": question})),
                    Publication::Published,
                )
                .await
                .unwrap();
        }
        assert_eq!(backend.entries(ContentType::Faq).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_upload_then_find_by_name() {
        let (backend, dir) = backend();
        let path = dir.path().join("favicon.png");
        std::fs::write(&path, b"png").unwrap();

        let resolution = backend
            .upload(
                FileData {
                    path,
                    original_file_name: "favicon.png".to_string(),
                    size: 3,
                    mime_type: "image/png".to_string(),
                },
                FileInfo::for_base_name("favicon"),
            )
            .await
            .unwrap();
        let Resolution::One(uploaded) = resolution else {
            panic!("single upload should resolve to one asset");
        };

        let found = backend.find_asset_by_name("favicon").await.unwrap().unwrap();
        assert_eq!(found, uploaded);
        assert_eq!(found.mime_type, "image/png");
        assert!(found.url.unwrap().ends_with(".png"));
        assert_eq!(backend.blobs().count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upload_of_missing_file_is_io_error() {
        let (backend, dir) = backend();
        let err = backend
            .upload(
                FileData {
                    path: dir.path().join("gone.jpg"),
                    original_file_name: "gone.jpg".to_string(),
                    size: 0,
                    mime_type: "image/jpeg".to_string(),
                },
                FileInfo::for_base_name("gone"),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Io);
        assert_eq!(err.file_name(), Some("gone.jpg"));
    }

    #[tokio::test]
    async fn test_kv_set_overwrites() {
        let (backend, _dir) = backend();
        let scope = StoreScope::setup("development");

        assert!(backend.get(&scope, "initHasRun").await.unwrap().is_none());
        backend.set(&scope, "initHasRun", json!(false)).await.unwrap();
        backend.set(&scope, "initHasRun", json!(true)).await.unwrap();

        assert_eq!(
            backend.get(&scope, "initHasRun").await.unwrap(),
            Some(json!(true))
        );
        assert!(backend
            .get(&StoreScope::setup("production"), "initHasRun")
            .await
            .unwrap()
            .is_none());
    }
}

// End-to-end seeding against the SQLite backend

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use seedbed_core::model::ContentType;
use seedbed_core::seed::{Collaborators, SeedOutcome, Seeder, UploadsDir};
use seedbed_store::fixtures::load_fixtures;
use seedbed_store::SqliteBackend;

const SEED_FILES: [&str; 6] = [
    "daviddoe@strapi.io.jpg",
    "the-internet-s-own-boy.jpg",
    "coffee-art.jpg",
    "coffee-beans.jpg",
    "favicon.png",
    "default-image.png",
];

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/blog.yaml")
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let uploads = dir.path().join("uploads");
        std::fs::create_dir_all(&uploads).unwrap();
        for name in SEED_FILES {
            std::fs::write(uploads.join(name), format!("bytes of {}", name)).unwrap();
        }
        Self { dir }
    }

    fn backend(&self) -> SqliteBackend {
        SqliteBackend::open(
            &self.dir.path().join("db").join("content.db"),
            &self.dir.path().join("blobs"),
        )
        .expect("open backend")
    }

    fn seeder(&self, backend: &SqliteBackend, environment: &str) -> Seeder {
        let backend = Arc::new(backend.clone());
        let collaborators = Collaborators {
            content: backend.clone(),
            assets: backend.clone(),
            files: Arc::new(UploadsDir::new(self.dir.path().join("uploads"))),
            kv: backend,
        };
        Seeder::new(collaborators, environment)
    }
}

#[tokio::test]
async fn test_seed_into_fresh_database() {
    // Given: A fresh database and the blog fixtures
    let workspace = Workspace::new();
    let backend = workspace.backend();
    let doc = load_fixtures(&fixture_path()).unwrap();

    // When: Seeding
    let outcome = workspace
        .seeder(&backend, "development")
        .run(&doc)
        .await
        .unwrap();

    // Then: Every record is stored
    let report = outcome.report().unwrap();
    assert!(report.is_clean(), "{:?}", report.failures().collect::<Vec<_>>());
    let counts = backend.entry_counts().unwrap();
    let count_of = |ct: ContentType| counts.iter().find(|(c, _)| *c == ct).unwrap().1;
    assert_eq!(count_of(ContentType::Category), 2);
    assert_eq!(count_of(ContentType::Author), 1);
    assert_eq!(count_of(ContentType::Article), 1);
    assert_eq!(count_of(ContentType::Global), 1);
    assert_eq!(count_of(ContentType::About), 1);
    assert_eq!(count_of(ContentType::Faq), 2);
    assert_eq!(count_of(ContentType::Product), 0);

    // And: Each seed file was uploaded once, its bytes kept in the blob store
    assert_eq!(backend.file_count().unwrap(), SEED_FILES.len());
    assert_eq!(backend.blobs().count().unwrap(), SEED_FILES.len());

    // And: The public role can read articles
    let actions = backend.granted_actions("public").unwrap();
    assert_eq!(actions.len(), 21);
    assert!(actions.contains(&"api::article.article.find".to_string()));
}

#[tokio::test]
async fn test_stored_article_references_assets() {
    let workspace = Workspace::new();
    let backend = workspace.backend();
    let doc = load_fixtures(&fixture_path()).unwrap();

    workspace
        .seeder(&backend, "development")
        .run(&doc)
        .await
        .unwrap();

    let article = &backend.entries(ContentType::Article).unwrap()[0];
    assert_eq!(article["cover"]["name"], "the-internet-s-own-boy");
    assert_eq!(article["cover"]["mimeType"], "image/jpeg");
    let blocks = article["blocks"].as_array().unwrap();
    assert_eq!(blocks[1]["file"]["name"], "coffee-art");
    assert_eq!(blocks[2]["files"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_reseeding_is_idempotent_across_restarts() {
    let workspace = Workspace::new();
    let doc = load_fixtures(&fixture_path()).unwrap();

    {
        let backend = workspace.backend();
        workspace
            .seeder(&backend, "development")
            .run(&doc)
            .await
            .unwrap();
    }

    // A new process opening the same database
    let backend = workspace.backend();
    let files_before = backend.file_count().unwrap();
    let outcome = workspace
        .seeder(&backend, "development")
        .run(&doc)
        .await
        .unwrap();

    assert!(matches!(outcome, SeedOutcome::AlreadySeeded));
    assert_eq!(backend.file_count().unwrap(), files_before);
    assert_eq!(backend.entries(ContentType::Category).unwrap().len(), 2);
}

#[tokio::test]
async fn test_duplicate_slug_is_a_per_record_failure() {
    let workspace = Workspace::new();
    let backend = workspace.backend();
    let doc = load_fixtures(&fixture_path()).unwrap();

    workspace
        .seeder(&backend, "development")
        .run(&doc)
        .await
        .unwrap();

    // Another environment sharing the database collides on slugs and singles
    let outcome = workspace
        .seeder(&backend, "staging")
        .run(&doc)
        .await
        .unwrap();

    let report = outcome.report().unwrap();
    assert!(report.failed_count() > 0);
    assert_eq!(report.created_for(ContentType::Category), 0);
    // FAQs carry no slug and are created again
    assert_eq!(report.created_for(ContentType::Faq), 2);
    // Existing uploads are reused rather than uploaded again
    assert_eq!(backend.file_count().unwrap(), SEED_FILES.len());
}

#[tokio::test]
async fn test_missing_seed_file_stops_the_run() {
    let workspace = Workspace::new();
    std::fs::remove_file(workspace.dir.path().join("uploads").join("favicon.png")).unwrap();
    let backend = workspace.backend();
    let doc = load_fixtures(&fixture_path()).unwrap();

    let err = workspace
        .seeder(&backend, "development")
        .run(&doc)
        .await
        .unwrap_err();

    assert_eq!(err.file_name(), Some("favicon.png"));
    assert_eq!(backend.entries(ContentType::Global).unwrap().len(), 0);
    assert_eq!(backend.entries(ContentType::Article).unwrap().len(), 1);
}

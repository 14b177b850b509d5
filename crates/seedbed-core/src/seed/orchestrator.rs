//! Seeding orchestration
//!
//! A run is strictly sequential: guard, permissions, then categories,
//! authors, articles, global, about and the smart-home collections, each
//! record created one at a time in document order.

use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use seedbed_core_types::schema::EVENT_SKIPPED;
use seedbed_core_types::RunId;

use crate::errors::Result;
use crate::model::block::{blocks_to_value, parse_blocks};
use crate::model::{ActionMap, ContentType, Fields, FixtureDocument, FixtureRecord};
use crate::ports::{AssetSource, AssetStore, ContentService, KeyValueStore};
use crate::seed::assets::AssetResolver;
use crate::seed::blocks::transform_blocks;
use crate::seed::entries::create_entry;
use crate::seed::permissions::grant_public_permissions;
use crate::seed::report::{ImportReport, SeedOutcome};
use crate::seed::run_guard::RunGuard;
use crate::{log_op_end, log_op_error, log_op_start};

pub const FAVICON_FILE: &str = "favicon.png";
pub const SHARE_IMAGE_FILE: &str = "default-image.png";

const SMART_HOME_TYPES: [ContentType; 5] = [
    ContentType::Faq,
    ContentType::Feature,
    ContentType::Possibility,
    ContentType::WorkStep,
    ContentType::Product,
];

/// Already-constructed backend collaborators
#[derive(Clone)]
pub struct Collaborators {
    pub content: Arc<dyn ContentService>,
    pub assets: Arc<dyn AssetStore>,
    pub files: Arc<dyn AssetSource>,
    pub kv: Arc<dyn KeyValueStore>,
}

pub struct Seeder {
    content: Arc<dyn ContentService>,
    resolver: AssetResolver,
    guard: RunGuard,
    actions: ActionMap,
    run_id: RunId,
}

impl Seeder {
    pub fn new(collaborators: Collaborators, environment: impl Into<String>) -> Self {
        Self {
            resolver: AssetResolver::new(collaborators.assets, collaborators.files),
            guard: RunGuard::new(collaborators.kv, environment),
            content: collaborators.content,
            actions: ActionMap::public_defaults(),
            run_id: RunId::new(),
        }
    }

    /// Replace the default public permission declaration
    pub fn with_action_map(mut self, actions: ActionMap) -> Self {
        self.actions = actions;
        self
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn guard(&self) -> &RunGuard {
        &self.guard
    }

    /// Seed the environment unless it has been seeded before
    ///
    /// Fatal errors (run state, permissions, assets, malformed fixtures)
    /// abort the run; entry creation failures are collected in the report.
    pub async fn run(&self, fixtures: &FixtureDocument) -> Result<SeedOutcome> {
        let start = Instant::now();
        log_op_start!(
            "seed",
            run_id = %self.run_id,
            records = fixtures.record_count()
        );

        match self.run_inner(fixtures).await {
            Ok(outcome) => {
                let (created, failed) = outcome
                    .report()
                    .map(|r| (r.created_count(), r.failed_count()))
                    .unwrap_or((0, 0));
                log_op_end!(
                    "seed",
                    duration_ms = start.elapsed().as_millis() as u64,
                    run_id = %self.run_id,
                    seeded = outcome.is_seeded(),
                    created = created,
                    failed = failed
                );
                Ok(outcome)
            }
            Err(err) => {
                log_op_error!(
                    "seed",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    run_id = %self.run_id
                );
                Err(err)
            }
        }
    }

    async fn run_inner(&self, fixtures: &FixtureDocument) -> Result<SeedOutcome> {
        if self.guard.has_run_already().await? {
            info!(
                op = "seed",
                event = EVENT_SKIPPED,
                run_id = %self.run_id,
                "Seed data has already been imported. We cannot reimport unless you clear your database first."
            );
            return Ok(SeedOutcome::AlreadySeeded);
        }

        info!(run_id = %self.run_id, "Setting up the template...");
        grant_public_permissions(self.content.as_ref(), &self.actions).await?;

        let mut report = ImportReport::default();
        self.import_plain(fixtures, ContentType::Category, &mut report)
            .await;
        self.import_authors(fixtures, &mut report).await?;
        self.import_articles(fixtures, &mut report).await?;
        self.import_global(fixtures, &mut report).await?;
        self.import_about(fixtures, &mut report).await?;
        for content_type in SMART_HOME_TYPES {
            self.import_plain(fixtures, content_type, &mut report).await;
        }

        info!(
            run_id = %self.run_id,
            created = report.created_count(),
            failed = report.failed_count(),
            "Ready to go"
        );
        Ok(SeedOutcome::Seeded(report))
    }

    /// Records without asset fields
    async fn import_plain(
        &self,
        fixtures: &FixtureDocument,
        content_type: ContentType,
        report: &mut ImportReport,
    ) {
        for record in fixtures.records(content_type) {
            report.push(create_entry(self.content.as_ref(), record).await);
        }
    }

    async fn import_authors(
        &self,
        fixtures: &FixtureDocument,
        report: &mut ImportReport,
    ) -> Result<()> {
        for record in fixtures.records(ContentType::Author) {
            let avatar = self.resolver.resolve(&[record.require_str("avatar")?]).await?;
            let record = record.with_field("avatar", serde_json::to_value(&avatar)?);
            report.push(create_entry(self.content.as_ref(), record).await);
        }
        Ok(())
    }

    async fn import_articles(
        &self,
        fixtures: &FixtureDocument,
        report: &mut ImportReport,
    ) -> Result<()> {
        for record in fixtures.records(ContentType::Article) {
            let cover_file = format!("{}.jpg", record.require_str("slug")?);
            let cover = self.resolver.resolve(&[cover_file]).await?;
            let record = record.with_field("cover", serde_json::to_value(&cover)?);
            let record = self.with_transformed_blocks(record).await?;
            report.push(create_entry(self.content.as_ref(), record).await);
        }
        Ok(())
    }

    async fn import_global(
        &self,
        fixtures: &FixtureDocument,
        report: &mut ImportReport,
    ) -> Result<()> {
        for record in fixtures.records(ContentType::Global) {
            let favicon = self.resolver.resolve(&[FAVICON_FILE]).await?;
            let share_image = self.resolver.resolve(&[SHARE_IMAGE_FILE]).await?;

            let mut seo = match record.field("defaultSeo") {
                Some(Value::Object(seo)) => seo.clone(),
                _ => Fields::new(),
            };
            seo.insert("shareImage".to_string(), serde_json::to_value(&share_image)?);

            let record = record
                .with_field("favicon", serde_json::to_value(&favicon)?)
                .with_field("defaultSeo", Value::Object(seo));
            report.push(create_entry(self.content.as_ref(), record).await);
        }
        Ok(())
    }

    async fn import_about(
        &self,
        fixtures: &FixtureDocument,
        report: &mut ImportReport,
    ) -> Result<()> {
        for record in fixtures.records(ContentType::About) {
            let record = self.with_transformed_blocks(record).await?;
            report.push(create_entry(self.content.as_ref(), record).await);
        }
        Ok(())
    }

    /// Copy of `record` with its `blocks` resolved; records without blocks
    /// (absent or `null`) are returned unchanged
    async fn with_transformed_blocks(&self, record: FixtureRecord) -> Result<FixtureRecord> {
        if matches!(record.field("blocks"), None | Some(Value::Null)) {
            return Ok(record);
        }
        let blocks = parse_blocks(record.field("blocks"))?;
        let blocks = transform_blocks(&self.resolver, &blocks).await?;
        Ok(record.with_field("blocks", blocks_to_value(&blocks)?))
    }
}

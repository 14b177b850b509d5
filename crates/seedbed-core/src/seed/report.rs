//! Per-record outcomes of a seeding run

use crate::errors::ExError;
use crate::model::ContentType;
use crate::ports::EntryId;

/// Result of creating one fixture record
#[derive(Debug, Clone)]
pub struct EntryOutcome {
    pub content_type: ContentType,
    pub result: Result<EntryId, ExError>,
}

impl EntryOutcome {
    pub fn created(content_type: ContentType, id: EntryId) -> Self {
        Self {
            content_type,
            result: Ok(id),
        }
    }

    pub fn failed(content_type: ContentType, err: ExError) -> Self {
        Self {
            content_type,
            result: Err(err),
        }
    }

    pub fn is_created(&self) -> bool {
        self.result.is_ok()
    }
}

/// Ordered outcomes of every record a run attempted
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    outcomes: Vec<EntryOutcome>,
}

impl ImportReport {
    pub fn push(&mut self, outcome: EntryOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[EntryOutcome] {
        &self.outcomes
    }

    pub fn created_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_created()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.created_count()
    }

    /// Entries of `content_type` created successfully
    pub fn created_for(&self, content_type: ContentType) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.content_type == content_type && o.is_created())
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (ContentType, &ExError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.content_type, e)))
    }

    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0
    }
}

/// What a call to `Seeder::run` did
#[derive(Debug, Clone)]
pub enum SeedOutcome {
    /// The environment had been seeded before; nothing was written
    AlreadySeeded,
    Seeded(ImportReport),
}

impl SeedOutcome {
    pub fn is_seeded(&self) -> bool {
        matches!(self, SeedOutcome::Seeded(_))
    }

    pub fn report(&self) -> Option<&ImportReport> {
        match self {
            SeedOutcome::Seeded(report) => Some(report),
            SeedOutcome::AlreadySeeded => None,
        }
    }
}

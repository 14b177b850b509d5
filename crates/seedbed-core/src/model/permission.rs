//! Role permissions granted during seeding

use serde::{Deserialize, Serialize};
use std::fmt;

use super::content_type::{Action, ContentType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(pub i64);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A users-and-permissions role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(rename = "type")]
    pub role_type: String,
}

/// One (content type, action) permission bound to a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermissionGrant {
    pub content_type: ContentType,
    pub action: Action,
    pub role_id: RoleId,
}

impl PermissionGrant {
    /// e.g. `api::article.article.find`
    pub fn action_uid(&self) -> String {
        self.content_type.action_uid(self.action)
    }
}

/// Ordered content type to actions declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionMap {
    entries: Vec<(ContentType, Vec<Action>)>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append actions for a content type; repeated types keep declaration order
    pub fn allow(mut self, content_type: ContentType, actions: &[Action]) -> Self {
        self.entries.push((content_type, actions.to_vec()));
        self
    }

    /// Public read access to every seeded type plus create on plans
    pub fn public_defaults() -> Self {
        let read = [Action::Find, Action::FindOne];
        Self::new()
            .allow(ContentType::Article, &read)
            .allow(ContentType::Category, &read)
            .allow(ContentType::Author, &read)
            .allow(ContentType::Global, &read)
            .allow(ContentType::About, &read)
            .allow(ContentType::Faq, &read)
            .allow(ContentType::Feature, &read)
            .allow(ContentType::Possibility, &read)
            .allow(ContentType::WorkStep, &read)
            .allow(ContentType::Product, &read)
            .allow(ContentType::SmartHomePlan, &[Action::Create])
    }

    pub fn entries(&self) -> &[(ContentType, Vec<Action>)] {
        &self.entries
    }

    /// Number of (content type, action) pairs
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, actions)| actions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand into grants bound to `role_id`, in declaration order
    pub fn grants(&self, role_id: RoleId) -> Vec<PermissionGrant> {
        self.entries
            .iter()
            .flat_map(|(content_type, actions)| {
                actions.iter().map(move |action| PermissionGrant {
                    content_type: *content_type,
                    action: *action,
                    role_id,
                })
            })
            .collect()
    }
}

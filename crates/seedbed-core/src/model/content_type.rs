//! Content types known to the seeder and the actions granted on them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{ExError, ExErrorKind};

/// A content type of the backend's api namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    Article,
    Category,
    Author,
    Global,
    About,
    Faq,
    Feature,
    Possibility,
    WorkStep,
    Product,
    SmartHomePlan,
}

impl ContentType {
    pub const ALL: [ContentType; 11] = [
        ContentType::Article,
        ContentType::Category,
        ContentType::Author,
        ContentType::Global,
        ContentType::About,
        ContentType::Faq,
        ContentType::Feature,
        ContentType::Possibility,
        ContentType::WorkStep,
        ContentType::Product,
        ContentType::SmartHomePlan,
    ];

    /// Singular api name, e.g. `work-step`
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::Category => "category",
            ContentType::Author => "author",
            ContentType::Global => "global",
            ContentType::About => "about",
            ContentType::Faq => "faq",
            ContentType::Feature => "feature",
            ContentType::Possibility => "possibility",
            ContentType::WorkStep => "work-step",
            ContentType::Product => "product",
            ContentType::SmartHomePlan => "smart-home-plan",
        }
    }

    /// Fully qualified uid, e.g. `api::article.article`
    pub fn uid(&self) -> String {
        format!("api::{0}.{0}", self.as_str())
    }

    /// Controller action uid used by permissions, e.g. `api::article.article.find`
    pub fn action_uid(&self, action: Action) -> String {
        format!("{}.{}", self.uid(), action.as_str())
    }

    /// Single types hold at most one entry
    pub fn is_single_type(&self) -> bool {
        matches!(self, ContentType::Global | ContentType::About)
    }

    /// Whether entries of this type have a draft/published lifecycle
    pub fn has_draft_state(&self) -> bool {
        !matches!(
            self,
            ContentType::Category | ContentType::Author | ContentType::SmartHomePlan
        )
    }

    /// Publication state to request when creating an entry of this type
    pub fn publication(&self) -> Publication {
        if self.has_draft_state() {
            Publication::Published
        } else {
            Publication::Unversioned
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ExError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .iter()
            .copied()
            .find(|ct| ct.as_str() == s)
            .ok_or_else(|| {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("parse_content_type")
                    .with_message(format!("unknown content type '{}'", s))
            })
    }
}

/// Controller actions that can be granted to a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "find")]
    Find,
    #[serde(rename = "findOne")]
    FindOne,
    #[serde(rename = "create")]
    Create,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Find => "find",
            Action::FindOne => "findOne",
            Action::Create => "create",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication state requested on entry creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publication {
    /// Created live, not as a draft
    Published,
    /// The content type has no draft state; the backend default applies
    Unversioned,
}

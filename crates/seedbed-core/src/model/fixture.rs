//! Fixture records and the fixture document they are read from

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::content_type::ContentType;
use super::smart_home;
use crate::errors::{Result, SeedError};

/// Field name to value mapping of a record
pub type Fields = serde_json::Map<String, Value>;

/// An immutable input record tagged with its content type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureRecord {
    content_type: ContentType,
    fields: Fields,
}

impl FixtureRecord {
    pub fn new(content_type: ContentType, fields: Fields) -> Self {
        Self {
            content_type,
            fields,
        }
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// A string field the importer cannot do without
    pub fn require_str(&self, name: &str) -> Result<&str> {
        self.fields
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                SeedError::MissingField {
                    content_type: self.content_type.to_string(),
                    field: name.to_string(),
                }
                .into()
            })
    }

    /// Copy of this record with one field replaced
    pub fn with_field(&self, name: &str, value: Value) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(name.to_string(), value);
        Self {
            content_type: self.content_type,
            fields,
        }
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }
}

/// The static seed document
///
/// The smart-home collections fall back to the built-in catalogue when the
/// document does not mention them; an explicit array, even an empty one,
/// replaces the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureDocument {
    #[serde(default)]
    pub categories: Vec<Fields>,
    #[serde(default)]
    pub authors: Vec<Fields>,
    #[serde(default)]
    pub articles: Vec<Fields>,
    #[serde(default)]
    pub global: Option<Fields>,
    #[serde(default)]
    pub about: Option<Fields>,
    #[serde(default = "smart_home::faqs")]
    pub faqs: Vec<Fields>,
    #[serde(default = "smart_home::features")]
    pub features: Vec<Fields>,
    #[serde(default = "smart_home::possibilities")]
    pub possibilities: Vec<Fields>,
    #[serde(default = "smart_home::work_steps")]
    pub work_steps: Vec<Fields>,
    #[serde(default = "smart_home::products")]
    pub products: Vec<Fields>,
}

impl FixtureDocument {
    /// A document with no records at all
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            authors: Vec::new(),
            articles: Vec::new(),
            global: None,
            about: None,
            faqs: Vec::new(),
            features: Vec::new(),
            possibilities: Vec::new(),
            work_steps: Vec::new(),
            products: Vec::new(),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| {
            SeedError::InvalidFixture {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Records of a collection type, in document order
    ///
    /// Single types yield zero or one record.
    pub fn records(&self, content_type: ContentType) -> Vec<FixtureRecord> {
        let raw: Vec<Fields> = match content_type {
            ContentType::Category => self.categories.clone(),
            ContentType::Author => self.authors.clone(),
            ContentType::Article => self.articles.clone(),
            ContentType::Global => self.global.iter().cloned().collect(),
            ContentType::About => self.about.iter().cloned().collect(),
            ContentType::Faq => self.faqs.clone(),
            ContentType::Feature => self.features.clone(),
            ContentType::Possibility => self.possibilities.clone(),
            ContentType::WorkStep => self.work_steps.clone(),
            ContentType::Product => self.products.clone(),
            ContentType::SmartHomePlan => Vec::new(),
        };
        raw.into_iter()
            .map(|fields| FixtureRecord::new(content_type, fields))
            .collect()
    }

    /// Total number of records the document would import
    pub fn record_count(&self) -> usize {
        ContentType::ALL
            .iter()
            .map(|ct| self.records(*ct).len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_smart_home_defaults_apply_when_absent() {
        let doc = FixtureDocument::from_json_str(r#"{"categories": [{"name": "news"}]}"#).unwrap();
        assert_eq!(doc.categories.len(), 1);
        assert_eq!(doc.faqs.len(), 4);
        assert_eq!(doc.features.len(), 4);
        assert_eq!(doc.possibilities.len(), 5);
        assert_eq!(doc.work_steps.len(), 3);
        assert_eq!(doc.products.len(), 4);
        assert!(doc.global.is_none());
    }

    #[test]
    fn test_explicit_empty_array_overrides_catalogue() {
        let doc = FixtureDocument::from_json_str(r#"{"faqs": [], "workSteps": []}"#).unwrap();
        assert!(doc.faqs.is_empty());
        assert!(doc.work_steps.is_empty());
        assert_eq!(doc.products.len(), 4);
    }

    #[test]
    fn test_invalid_document_is_invalid_input() {
        let err = FixtureDocument::from_json_str(r#"{"categories": 3}"#).unwrap_err();
        assert_eq!(err.kind(), crate::errors::ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_with_field_leaves_original_untouched() {
        let mut fields = Fields::new();
        fields.insert("avatar".to_string(), json!("a.jpg"));
        let record = FixtureRecord::new(ContentType::Author, fields);

        let updated = record.with_field("avatar", json!({"id": 1}));

        assert_eq!(record.field("avatar"), Some(&json!("a.jpg")));
        assert_eq!(updated.field("avatar"), Some(&json!({"id": 1})));
    }

    #[test]
    fn test_require_str_reports_missing_field() {
        let record = FixtureRecord::new(ContentType::Article, Fields::new());
        let err = record.require_str("slug").unwrap_err();
        assert_eq!(err.content_type(), Some("article"));
        assert!(err.message().contains("slug"));
    }

    #[test]
    fn test_single_types_yield_at_most_one_record() {
        let mut doc = FixtureDocument::empty();
        assert!(doc.records(ContentType::Global).is_empty());
        doc.global = Some(Fields::new());
        assert_eq!(doc.records(ContentType::Global).len(), 1);
        assert_eq!(doc.record_count(), 1);
    }
}

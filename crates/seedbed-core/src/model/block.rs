//! Polymorphic content blocks embedded in articles and the about page
//!
//! Fixtures discriminate blocks by their `__component` field. Only media and
//! slider blocks reference assets; every other component is carried opaquely.

use serde_json::Value;

use super::asset::{AssetHandle, AssetRef, Resolution};
use super::fixture::Fields;
use crate::errors::{Result, SeedError};

pub const COMPONENT_KEY: &str = "__component";
pub const MEDIA_COMPONENT: &str = "shared.media";
pub const SLIDER_COMPONENT: &str = "shared.slider";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Media,
    Slider,
    Generic,
}

/// Files of a slider block, before or after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliderFiles {
    Names(Vec<String>),
    Resolved(Resolution),
}

/// A content block; `fields` holds every key other than the component tag
/// and the asset field
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Media { file: AssetRef, fields: Fields },
    Slider { files: SliderFiles, fields: Fields },
    Generic { fields: Fields },
}

impl ContentBlock {
    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::Media { .. } => BlockKind::Media,
            ContentBlock::Slider { .. } => BlockKind::Slider,
            ContentBlock::Generic { .. } => BlockKind::Generic,
        }
    }

    /// Parse one fixture block
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| SeedError::MalformedBlock {
            component: "unknown".to_string(),
            reason: "block is not an object".to_string(),
        })?;

        match obj.get(COMPONENT_KEY).and_then(Value::as_str) {
            Some(MEDIA_COMPONENT) => {
                let file = match obj.get("file") {
                    Some(Value::String(name)) => AssetRef::Name(name.clone()),
                    Some(v @ Value::Object(_)) => {
                        AssetRef::Resolved(serde_json::from_value::<AssetHandle>(v.clone())?)
                    }
                    _ => return Err(malformed(MEDIA_COMPONENT, "'file' must be a file name")),
                };
                Ok(ContentBlock::Media {
                    file,
                    fields: without(obj, "file"),
                })
            }
            Some(SLIDER_COMPONENT) => {
                let files = parse_slider_files(obj.get("files"))?;
                Ok(ContentBlock::Slider {
                    files,
                    fields: without(obj, "files"),
                })
            }
            _ => Ok(ContentBlock::Generic {
                fields: obj.clone(),
            }),
        }
    }

    /// Render the block back into its fixture/entry form
    pub fn to_value(&self) -> Result<Value> {
        let value = match self {
            ContentBlock::Media { file, fields } => {
                let mut obj = fields.clone();
                obj.insert(COMPONENT_KEY.to_string(), Value::from(MEDIA_COMPONENT));
                obj.insert("file".to_string(), serde_json::to_value(file)?);
                Value::Object(obj)
            }
            ContentBlock::Slider { files, fields } => {
                let mut obj = fields.clone();
                obj.insert(COMPONENT_KEY.to_string(), Value::from(SLIDER_COMPONENT));
                let files = match files {
                    SliderFiles::Names(names) => serde_json::to_value(names)?,
                    SliderFiles::Resolved(resolution) => serde_json::to_value(resolution)?,
                };
                obj.insert("files".to_string(), files);
                Value::Object(obj)
            }
            ContentBlock::Generic { fields } => Value::Object(fields.clone()),
        };
        Ok(value)
    }
}

/// Parse an optional `blocks` field; absent or null means no blocks
pub fn parse_blocks(value: Option<&Value>) -> Result<Vec<ContentBlock>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(ContentBlock::from_value).collect(),
        Some(_) => Err(SeedError::InvalidFixture {
            reason: "'blocks' must be an array".to_string(),
        }
        .into()),
    }
}

pub fn blocks_to_value(blocks: &[ContentBlock]) -> Result<Value> {
    let items = blocks
        .iter()
        .map(ContentBlock::to_value)
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(items))
}

fn parse_slider_files(value: Option<&Value>) -> Result<SliderFiles> {
    match value {
        Some(Value::Array(items)) if items.iter().all(Value::is_string) => Ok(SliderFiles::Names(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        )),
        Some(v @ (Value::Array(_) | Value::Object(_))) => Ok(SliderFiles::Resolved(
            serde_json::from_value::<Resolution>(v.clone())
                .map_err(|_| malformed(SLIDER_COMPONENT, "'files' must be file names"))?,
        )),
        _ => Err(malformed(SLIDER_COMPONENT, "'files' must be a list of file names")),
    }
}

fn without(obj: &Fields, asset_key: &str) -> Fields {
    obj.iter()
        .filter(|(k, _)| k.as_str() != COMPONENT_KEY && k.as_str() != asset_key)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn malformed(component: &str, reason: &str) -> crate::errors::ExError {
    SeedError::MalformedBlock {
        component: component.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

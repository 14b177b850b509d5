//! Seeding data model
//!
//! Fixture records are immutable inputs; asset references and content
//! blocks describe the parts of a record that change shape during import.

pub mod asset;
pub mod block;
pub mod content_type;
pub mod fixture;
pub mod permission;
pub mod smart_home;

pub use asset::{base_name, mime_type_for, AssetHandle, AssetRef, FileData, FileInfo, Resolution};
pub use block::{BlockKind, ContentBlock, SliderFiles, MEDIA_COMPONENT, SLIDER_COMPONENT};
pub use content_type::{Action, ContentType, Publication};
pub use fixture::{Fields, FixtureDocument, FixtureRecord};
pub use permission::{ActionMap, PermissionGrant, Role, RoleId};

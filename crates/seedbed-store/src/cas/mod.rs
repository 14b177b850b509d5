//! Content-addressed blob storage for uploaded files
//!
//! Provides:
//! - Filesystem store with atomic writes
//! - Collision detection
//! - Sharding by first 2 hex chars of digest

mod atomic;
mod blob_store;
mod sharding;

pub use blob_store::BlobStore;

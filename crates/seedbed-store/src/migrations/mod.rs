//! Schema migrations
//!
//! Embedded SQL applied in order, each at most once, each in its own
//! transaction. Applied migrations are checksummed so an edited file is
//! refused instead of silently diverging.

mod embedded;
mod runner;

pub use embedded::{Migration, MIGRATIONS};
pub use runner::{apply_migrations, is_current};

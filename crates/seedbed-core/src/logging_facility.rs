//! Structured logging
//!
//! `init(profile)` installs the process-wide subscriber once. Operations
//! report their boundaries through `log_op_start!`, `log_op_end!` and
//! `log_op_error!`, which stamp every event with the canonical fields from
//! `core_types::schema`. Tests swap the subscriber for an in-memory
//! [`TestCapture`].
//!
//! ```rust
//! use seedbed_core::logging_facility::{init, Profile};
//!
//! init(Profile::Production);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

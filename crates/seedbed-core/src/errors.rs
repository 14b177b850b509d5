//! Error facility
//!
//! `ExError` is the one error type crossing crate boundaries: a kind with a
//! stable `ERR_*` code, the seeding context the failure happened in, and an
//! optional cause. `SeedError` names the pipeline's own failure modes and
//! converts into it.

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExError>;

macro_rules! error_kinds {
    ($($kind:ident => $code:literal),+ $(,)?) => {
        /// Classification of a failure, stable across releases
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ExErrorKind {
            $($kind),+
        }

        impl ExErrorKind {
            pub const ALL: &'static [ExErrorKind] = &[$(ExErrorKind::$kind),+];

            pub fn code(&self) -> &'static str {
                match self {
                    $(ExErrorKind::$kind => $code),+
                }
            }
        }
    };
}

error_kinds! {
    InvalidInput => "ERR_INVALID_INPUT",
    NotFound => "ERR_NOT_FOUND",
    AlreadyExists => "ERR_ALREADY_EXISTS",
    Io => "ERR_IO",
    Serialization => "ERR_SERIALIZATION",
    Persistence => "ERR_PERSISTENCE",
    ExternalService => "ERR_EXTERNAL_SERVICE",
    Internal => "ERR_INTERNAL",
}

impl fmt::Display for ExErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Where in a seeding run a failure happened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ErrorContext {
    op: Option<String>,
    content_type: Option<String>,
    file_name: Option<String>,
}

/// Structured error carried through the pipeline and its collaborators
///
/// Built with `ExError::new(kind)` and the `with_*` setters; every setter
/// overwrites what was there.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    context: ErrorContext,
    message: String,
    cause: Option<Box<ExError>>,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            context: ErrorContext::default(),
            message: String::new(),
            cause: None,
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.context.op = Some(op.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.context.content_type = Some(content_type.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.context.file_name = Some(file_name.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the lower-level failure this one wraps
    pub fn with_source(mut self, cause: ExError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Operation that failed, e.g. `create_entry` or `upload`
    pub fn op(&self) -> Option<&str> {
        self.context.op.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.context.content_type.as_deref()
    }

    /// Seed file involved, if any
    pub fn file_name(&self) -> Option<&str> {
        self.context.file_name.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.cause.as_deref()
    }
}

/// `ERR_CODE op=... content_type=... file=...: message; caused by: ...`
impl fmt::Display for ExError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())?;
        let ErrorContext {
            op,
            content_type,
            file_name,
        } = &self.context;
        for (key, value) in [("op", op), ("content_type", content_type), ("file", file_name)] {
            if let Some(value) = value {
                write!(f, " {}={}", key, value)?;
            }
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(cause) = &self.cause {
            write!(f, "; caused by: {}", cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization)
            .with_op("json")
            .with_message(err.to_string())
    }
}

/// Failures raised by the seeding pipeline itself
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeedError {
    /// The run-state flag could not be read or written
    #[error("Run state unavailable: {reason}")]
    RunStateUnavailable { reason: String },

    #[error("Role not found: {role_type}")]
    RoleNotFound { role_type: String },

    /// A permission-creation request failed
    #[error("Permission grant failed for {action}: {reason}")]
    PermissionGrantFailed { action: String, reason: String },

    /// Local metadata for a seed file could not be read
    #[error("Cannot read seed file {file_name}: {reason}")]
    FileMetadata { file_name: String, reason: String },

    /// The upload collaborator answered with no asset at all
    #[error("Upload of {file_name} returned no asset")]
    EmptyUpload { file_name: String },

    #[error("Fixture for {content_type} is missing field '{field}'")]
    MissingField { content_type: String, field: String },

    #[error("Malformed {component} block: {reason}")]
    MalformedBlock { component: String, reason: String },

    #[error("Invalid fixture document: {reason}")]
    InvalidFixture { reason: String },
}

impl SeedError {
    pub fn kind(&self) -> ExErrorKind {
        match self {
            SeedError::RunStateUnavailable { .. } => ExErrorKind::Persistence,
            SeedError::RoleNotFound { .. } => ExErrorKind::NotFound,
            SeedError::PermissionGrantFailed { .. } | SeedError::EmptyUpload { .. } => {
                ExErrorKind::ExternalService
            }
            SeedError::FileMetadata { .. } => ExErrorKind::Io,
            SeedError::MissingField { .. }
            | SeedError::MalformedBlock { .. }
            | SeedError::InvalidFixture { .. } => ExErrorKind::InvalidInput,
        }
    }

    /// Pipeline operation that raises this failure
    pub fn op(&self) -> &'static str {
        match self {
            SeedError::RunStateUnavailable { .. } => "run_guard",
            SeedError::RoleNotFound { .. } | SeedError::PermissionGrantFailed { .. } => {
                "grant_permissions"
            }
            SeedError::FileMetadata { .. } => "file_data",
            SeedError::EmptyUpload { .. } => "upload",
            SeedError::MissingField { .. } => "import",
            SeedError::MalformedBlock { .. } => "parse_block",
            SeedError::InvalidFixture { .. } => "load_fixtures",
        }
    }
}

impl From<SeedError> for ExError {
    fn from(err: SeedError) -> Self {
        let mut ex = ExError::new(err.kind())
            .with_op(err.op())
            .with_message(err.to_string());
        match err {
            SeedError::FileMetadata { file_name, .. } | SeedError::EmptyUpload { file_name } => {
                ex = ex.with_file_name(file_name);
            }
            SeedError::MissingField { content_type, .. } => {
                ex = ex.with_content_type(content_type);
            }
            _ => {}
        }
        ex
    }
}

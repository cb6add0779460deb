//! Error types for the deslang CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::service::ServiceError;
use thiserror::Error;

/// Main error type for deslang operations.
///
/// Each variant maps to a distinct process exit code. Service errors are
/// retried inside the review loop and only surface here when a retry cap
/// is configured and exhausted.
#[derive(Error, Debug)]
pub enum DeslangError {
    /// User provided invalid arguments or a required input is missing.
    #[error("{0}")]
    UserError(String),

    /// A source record is malformed (missing column, unreadable row).
    #[error("Dataset format error: {0}")]
    DataFormat(String),

    /// The generation service failed past the configured retry cap.
    #[error("Generation service error: {0}")]
    Service(#[from] ServiceError),

    /// An output artifact or the corpus could not be written.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl DeslangError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeslangError::UserError(_) => exit_codes::USER_ERROR,
            DeslangError::DataFormat(_) => exit_codes::DATA_FORMAT_FAILURE,
            DeslangError::Service(_) => exit_codes::SERVICE_FAILURE,
            DeslangError::Persistence(_) => exit_codes::PERSISTENCE_FAILURE,
        }
    }
}

/// Result type alias for deslang operations.
pub type Result<T> = std::result::Result<T, DeslangError>;

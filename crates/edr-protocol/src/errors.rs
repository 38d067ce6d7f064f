//! EDR API error types.

use thiserror::Error;

use crate::responses::{ExceptionKind, ExceptionResponse};

/// Errors that can occur in EDR API operations.
///
/// All variants are recoverable; the HTTP layer maps each to a status code
/// via [`EdrError::status_code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdrError {
    /// Collection id not in the catalogue.
    #[error("Collection not found: {0}")]
    UnknownCollection(String),

    /// Query type not advertised by the collection.
    #[error("Query type '{query}' is not supported by collection '{collection}'")]
    UnsupportedQuery { collection: String, query: String },

    /// Requested format is unknown or not allowed for the query.
    #[error("Unsupported format '{requested}'. Supported formats: {allowed}")]
    UnsupportedFormat { requested: String, allowed: String },

    /// An observation record failed validation.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A query or collection descriptor violates its invariants.
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),
}

impl EdrError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        self.exception_kind().status()
    }

    /// Short machine-readable kind, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            EdrError::UnknownCollection(_) => "unknown_collection",
            EdrError::UnsupportedQuery { .. } => "unsupported_query",
            EdrError::UnsupportedFormat { .. } => "unsupported_format",
            EdrError::MalformedRecord(_) => "malformed_record",
            EdrError::InvalidDescriptor(_) => "invalid_descriptor",
        }
    }

    fn exception_kind(&self) -> ExceptionKind {
        match self {
            EdrError::UnknownCollection(_) => ExceptionKind::NotFound,
            EdrError::UnsupportedQuery { .. } | EdrError::UnsupportedFormat { .. } => {
                ExceptionKind::InvalidParameter
            }
            EdrError::MalformedRecord(_) | EdrError::InvalidDescriptor(_) => {
                ExceptionKind::ServerError
            }
        }
    }

    /// Convert to an ExceptionResponse.
    pub fn to_exception(&self) -> ExceptionResponse {
        ExceptionResponse::new(self.exception_kind(), self.to_string())
    }
}

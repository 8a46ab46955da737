//! Error types for pageflow
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for pageflow
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Argument Errors
    // ============================================================================
    /// Malformed limit or page-size input, detected before any I/O
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument {
        /// Name of the offending argument
        field: String,
        /// What was wrong with it
        message: String,
    },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    /// Network-level failure from the transport
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the upstream API
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Upstream status code
        status: u16,
        /// Upstream response body, verbatim
        body: String,
    },

    /// A path or continuation could not be resolved to a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Payload Errors
    // ============================================================================
    /// Response body was not the JSON the record type expects
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Page payload carried no recognizable record list
    #[error("Failed to extract records under key '{key}': {message}")]
    RecordExtraction {
        /// Payload key the records were expected under
        key: String,
        /// What was wrong with the payload
        message: String,
    },

    // ============================================================================
    // Path Template Errors
    // ============================================================================
    /// A path template placeholder had no matching parameter
    #[error("Undefined variable in path template: {variable}")]
    UndefinedVariable {
        /// Name of the unresolved placeholder
        variable: String,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Free-form error message
    #[error("{0}")]
    Other(String),

    /// Escape hatch for wrapped external errors
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a record extraction error
    pub fn record_extraction(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RecordExtraction {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Check if this error came out of the transport layer
    ///
    /// Transport errors are delivered through the completion path of a
    /// streaming session; argument and template errors are raised before
    /// any request is made.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::HttpStatus { .. })
    }

    /// Upstream status code, when this is a non-success HTTP response
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for pageflow
pub type Result<T> = std::result::Result<T, Error>;

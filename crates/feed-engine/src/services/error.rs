//! Engine error types
//!
//! Maps the failure taxonomy onto one type: retryable fetch failures (initial
//! load), silent refresh failures, best-effort engagement failures, and
//! surfaced authorization denials.

use feed_common::AppError;
use feed_core::DomainError;
use std::fmt;

/// Engine error type
#[derive(Debug)]
pub enum EngineError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error
    App(AppError),

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Action denied (e.g., deleting another viewer's comment)
    Denied { reason: String },

    /// Validation error
    Validation(String),

    /// Transient failure the caller should retry (initial load path)
    Retryable(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Denied { reason } => write!(f, "Action denied: {reason}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Retryable(msg) => write!(f, "Retryable failure: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl EngineError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a denied error
    pub fn denied(reason: impl Into<String>) -> Self {
        Self::Denied {
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a retryable error
    pub fn retryable(msg: impl Into<String>) -> Self {
        Self::Retryable(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the caller should offer a retry affordance
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Retryable(_) => true,
            Self::Domain(e) => e.is_transient(),
            Self::App(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Whether this is an authorization denial to surface as such
    pub fn is_denied(&self) -> bool {
        match self {
            Self::Denied { .. } => true,
            Self::Domain(e) => e.is_authorization(),
            Self::App(e) => e.is_denied(),
            _ => false,
        }
    }

    /// Get the error code for callers
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Denied { .. } => "DENIED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Retryable(_) => "RETRYABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for EngineError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

//! Territory-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, TerritoryAnalysisId, ValidationError};

/// Errors raised by territory scoring operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TerritoryError {
    /// Analysis was not found.
    NotFound(TerritoryAnalysisId),
    /// Caller does not own the analysis.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// The external scoring provider failed.
    Provider(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl TerritoryError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TerritoryError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        TerritoryError::Provider(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        TerritoryError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TerritoryError::NotFound(_) => ErrorCode::TerritoryAnalysisNotFound,
            TerritoryError::Forbidden => ErrorCode::Forbidden,
            TerritoryError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            TerritoryError::Provider(_) => ErrorCode::ScoringProviderError,
            TerritoryError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            TerritoryError::NotFound(id) => format!("Territory analysis not found: {}", id),
            TerritoryError::Forbidden => "Permission denied".to_string(),
            TerritoryError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            TerritoryError::Provider(msg) => format!("Scoring provider error: {}", msg),
            TerritoryError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for TerritoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for TerritoryError {}

impl From<ValidationError> for TerritoryError {
    fn from(err: ValidationError) -> Self {
        TerritoryError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for TerritoryError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => TerritoryError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            ErrorCode::Forbidden => TerritoryError::Forbidden,
            _ => TerritoryError::Infrastructure(err.message),
        }
    }
}

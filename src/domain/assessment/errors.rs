//! Assessment-specific error types.

use crate::domain::foundation::{AssessmentId, DomainError, ErrorCode, MetricSetId, ValidationError};

/// Errors raised by assessment and metric set operations.
#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentError {
    /// Assessment was not found.
    NotFound(AssessmentId),
    /// Metric set was not found.
    MetricSetNotFound(MetricSetId),
    /// Metric key is not part of the metric set.
    UnknownMetric(String),
    /// Caller does not own the resource.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl AssessmentError {
    pub fn unknown_metric(key: impl Into<String>) -> Self {
        AssessmentError::UnknownMetric(key.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AssessmentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AssessmentError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AssessmentError::NotFound(_) => ErrorCode::AssessmentNotFound,
            AssessmentError::MetricSetNotFound(_) => ErrorCode::MetricSetNotFound,
            AssessmentError::UnknownMetric(_) => ErrorCode::MetricNotFound,
            AssessmentError::Forbidden => ErrorCode::Forbidden,
            AssessmentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AssessmentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AssessmentError::NotFound(id) => format!("Assessment not found: {}", id),
            AssessmentError::MetricSetNotFound(id) => format!("Metric set not found: {}", id),
            AssessmentError::UnknownMetric(key) => format!("Unknown metric: {}", key),
            AssessmentError::Forbidden => "Permission denied".to_string(),
            AssessmentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AssessmentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AssessmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AssessmentError {}

impl From<ValidationError> for AssessmentError {
    fn from(err: ValidationError) -> Self {
        AssessmentError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for AssessmentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => AssessmentError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            ErrorCode::Forbidden => AssessmentError::Forbidden,
            _ => AssessmentError::Infrastructure(err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_code() {
        let err = AssessmentError::NotFound(AssessmentId::new());
        assert_eq!(err.code(), ErrorCode::AssessmentNotFound);
        assert!(err.to_string().starts_with("Assessment not found"));
    }

    #[test]
    fn validation_error_converts_with_field() {
        let err: AssessmentError = ValidationError::empty_field("site_name").into();
        match err {
            AssessmentError::ValidationFailed { field, .. } => assert_eq!(field, "site_name"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn database_error_becomes_infrastructure() {
        let err: AssessmentError =
            DomainError::new(ErrorCode::DatabaseError, "connection refused").into();
        assert_eq!(err, AssessmentError::Infrastructure("connection refused".to_string()));
    }
}

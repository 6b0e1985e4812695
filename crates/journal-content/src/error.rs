//! Error types for content operations
//!
//! This module defines the validation and storage errors that issue
//! lifecycle operations can produce.

use thiserror::Error;
use uuid::Uuid;

/// Issue data failed a structural or business rule.
///
/// Validation errors are recoverable only by the caller correcting
/// its input; they surface at the API boundary as 400-class
/// responses with the specific rule violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A new issue must be identifiable by at least one criterion
    #[error("An issue requires at least one of volume, number, year, or title to be shown")]
    IdentificationRequired,

    /// Volume is shown but no volume is set
    #[error("A volume is required when the volume is shown")]
    VolumeRequired,

    /// Year is shown but no year is set
    #[error("A year is required when the year is shown")]
    YearRequired,

    /// Number is shown but no number is set
    #[error("A number is required when the number is shown")]
    NumberRequired,

    /// Title is shown but no locale carries a title
    #[error("A title is required when the title is shown")]
    TitleRequired,

    /// A localized field carries a value without a locale
    #[error("A locale must be specified for the {0} field")]
    LocaleRequired(&'static str),
}

impl ValidationError {
    /// Get the localized message key for this rule.
    ///
    /// The API layer resolves these against the string catalog.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::IdentificationRequired => "editor.issues.issueIdentificationRequired",
            Self::VolumeRequired => "editor.issues.volumeRequired",
            Self::YearRequired => "editor.issues.yearRequired",
            Self::NumberRequired => "editor.issues.numberRequired",
            Self::TitleRequired => "editor.issues.titleRequired",
            Self::LocaleRequired(_) => "editor.issues.localeRequired",
        }
    }
}

/// Content operation error types.
///
/// These cover all issue lifecycle failures. Cascade failures are
/// terminal for the current operation; the lifecycle manager rolls
/// back any partial work before returning them.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Issue data failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The named issue does not exist (or belongs to another journal)
    #[error("Issue {0} not found")]
    IssueNotFound(Uuid),

    /// The named article does not exist
    #[error("Article {0} not found")]
    ArticleNotFound(Uuid),

    /// Underlying storage failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ContentError {
    /// Check if this error should be logged at error level.
    ///
    /// Validation and not-found errors are expected request failures.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ContentError::Storage(_))
    }
}

/// Result type for content operations.
pub type ContentResult<T> = Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_keys() {
        assert_eq!(
            ValidationError::IdentificationRequired.message_key(),
            "editor.issues.issueIdentificationRequired"
        );
        assert_eq!(
            ValidationError::TitleRequired.message_key(),
            "editor.issues.titleRequired"
        );
    }

    #[test]
    fn test_validation_wraps_into_content_error() {
        let err: ContentError = ValidationError::VolumeRequired.into();
        assert!(matches!(
            err,
            ContentError::Validation(ValidationError::VolumeRequired)
        ));
        assert!(!err.is_server_error());
        assert!(ContentError::Storage("disk full".into()).is_server_error());
    }
}

//! Error types for API operations
//!
//! This module defines the error type handlers return, mapping
//! authorization denials and content failures to transport-level
//! status codes.

use thiserror::Error;

use journal_authz::{AuthorizationDecision, DenialCode};
use journal_content::ContentError;

/// API error types.
///
/// These cover everything a handler can fail with: a policy chain
/// denial, or a content operation error after the chain permitted.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The policy chain denied the request
    #[error("Access denied: {reason}")]
    Denied {
        /// Localized message key from the denying policy
        reason: String,
        /// Denial class
        code: DenialCode,
    },

    /// The content operation failed after authorization
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Build an error from a denying chain decision.
    ///
    /// Callers must check [`AuthorizationDecision::is_permitted`]
    /// first; a permit converts to a generic `Forbidden` here rather
    /// than panicking.
    pub fn from_denial(decision: &AuthorizationDecision) -> Self {
        Self::Denied {
            reason: decision
                .reason()
                .unwrap_or("user.authorization.accessDenied")
                .to_string(),
            code: decision.denial_code().unwrap_or(DenialCode::Forbidden),
        }
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Denied { code, .. } => code.http_status(),
            ApiError::Content(ContentError::Validation(_)) => 400,
            ApiError::Content(ContentError::IssueNotFound(_)) => 404,
            ApiError::Content(ContentError::ArticleNotFound(_)) => 404,
            ApiError::Content(ContentError::Storage(_)) => 500,
        }
    }

    /// Get the localized message key for API responses.
    ///
    /// Denials carry the denying policy's key; validation failures
    /// carry the violated rule's key.
    pub fn message_key(&self) -> &str {
        match self {
            ApiError::Denied { reason, .. } => reason,
            ApiError::Content(ContentError::Validation(err)) => err.message_key(),
            ApiError::Content(ContentError::IssueNotFound(_)) => "editor.issues.issueNotFound",
            ApiError::Content(ContentError::ArticleNotFound(_)) => {
                "editor.issues.articleNotFound"
            }
            ApiError::Content(ContentError::Storage(_)) => "common.error.internal",
        }
    }

    /// Check if this error should be logged at error level.
    ///
    /// Denials and client mistakes are expected request failures.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiError::Content(err) if err.is_server_error())
    }
}

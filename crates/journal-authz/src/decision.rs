//! Authorization decisions
//!
//! A policy evaluation produces exactly one decision: a permit or a
//! denial carrying a reason and a code. Decisions are first-class
//! values, not exceptions; they are always surfaced and never
//! silently retried.

use serde::{Deserialize, Serialize};

/// The class of a denial, mapped to a transport-level status by the
/// calling layer.
///
/// Missing and inaccessible resources deliberately share
/// [`DenialCode::NotFound`]: "this does not exist" and "you may not
/// know this exists" must be indistinguishable to the requester.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DenialCode {
    /// The request is structurally unable to be authorized
    BadRequest,

    /// The user lacks a qualifying role
    Forbidden,

    /// The resource is missing or must appear missing
    NotFound,
}

impl DenialCode {
    /// Get the HTTP status code for this denial class.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
        }
    }
}

/// The outcome of evaluating a policy or a policy chain.
///
/// Only the variant tag is authoritative. A permit may carry an
/// advisory denial code (the publishing gate records one when staff
/// roles bypass it); callers must never infer denial from the
/// presence of a code alone.
///
/// # Examples
///
/// ```
/// use journal_authz::{AuthorizationDecision, DenialCode};
///
/// let deny = AuthorizationDecision::deny("user.authorization.contextRequired", DenialCode::BadRequest);
/// assert!(!deny.is_permitted());
///
/// let bypass = AuthorizationDecision::permit_with_advisory(DenialCode::Forbidden);
/// assert!(bypass.is_permitted());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum AuthorizationDecision {
    /// The policy permits the request
    Permit {
        /// Informational code recorded by a permitting policy
        #[serde(skip_serializing_if = "Option::is_none")]
        advisory_code: Option<DenialCode>,
    },

    /// The policy denies the request
    Deny {
        /// Localized message key for the denial
        reason: String,
        /// Denial class for transport mapping
        code: DenialCode,
    },
}

impl AuthorizationDecision {
    /// Create a plain permit.
    pub fn permit() -> Self {
        Self::Permit {
            advisory_code: None,
        }
    }

    /// Create a permit that records an informational denial code.
    pub fn permit_with_advisory(code: DenialCode) -> Self {
        Self::Permit {
            advisory_code: Some(code),
        }
    }

    /// Create a denial.
    ///
    /// # Arguments
    ///
    /// * `reason` - Localized message key describing the denial
    /// * `code` - Denial class
    pub fn deny(reason: impl Into<String>, code: DenialCode) -> Self {
        Self::Deny {
            reason: reason.into(),
            code,
        }
    }

    /// Check the authoritative tag of this decision.
    pub fn is_permitted(&self) -> bool {
        matches!(self, Self::Permit { .. })
    }

    /// Get the denial code of a denying decision.
    ///
    /// Advisory codes on permits are not returned here; use
    /// [`AuthorizationDecision::advisory_code`] for those.
    pub fn denial_code(&self) -> Option<DenialCode> {
        match self {
            Self::Deny { code, .. } => Some(*code),
            Self::Permit { .. } => None,
        }
    }

    /// Get the advisory code of a permitting decision.
    pub fn advisory_code(&self) -> Option<DenialCode> {
        match self {
            Self::Permit { advisory_code } => *advisory_code,
            Self::Deny { .. } => None,
        }
    }

    /// Get the denial reason key, if denying.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Deny { reason, .. } => Some(reason),
            Self::Permit { .. } => None,
        }
    }
}

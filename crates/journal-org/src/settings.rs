//! Journal settings
//!
//! This module provides settings types for configuring how a journal
//! publishes its content online. The publishing mode drives both the
//! public visibility of the journal and the default access status of
//! newly created issues.

use serde::{Deserialize, Serialize};

/// How a journal makes its content available online.
///
/// # Examples
///
/// ```
/// use journal_org::PublishingMode;
///
/// assert_eq!(PublishingMode::parse("subscription"), Some(PublishingMode::Subscription));
/// assert_eq!(PublishingMode::from_str_or_open("mystery"), PublishingMode::Open);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PublishingMode {
    /// Content is freely available to all readers
    Open,

    /// Content requires a subscription
    Subscription,

    /// The journal does not publish its content online
    None,
}

impl PublishingMode {
    /// Parse a publishing mode from its string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(PublishingMode)` if valid, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "subscription" => Some(Self::Subscription),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Parse a publishing mode, falling back to `Open` for anything
    /// unrecognized.
    ///
    /// Stored configuration may predate the current set of modes;
    /// open access is the fallback.
    pub fn from_str_or_open(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Open)
    }

    /// Get string representation of the publishing mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Subscription => "subscription",
            Self::None => "none",
        }
    }
}

impl Default for PublishingMode {
    fn default() -> Self {
        Self::Open
    }
}

/// Journal-level settings.
///
/// These settings control publishing behavior and reader
/// notifications for a journal.
///
/// # Examples
///
/// ```
/// use journal_org::{JournalSettings, PublishingMode};
///
/// let settings = JournalSettings::default();
/// assert_eq!(settings.publishing_mode, PublishingMode::Open);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalSettings {
    /// How the journal publishes content online
    #[serde(default)]
    pub publishing_mode: PublishingMode,

    /// Notify readers when an issue's open access date passes
    #[serde(default)]
    pub enable_open_access_notification: bool,

    /// Remind subscribers before their subscription expires
    #[serde(default)]
    pub enable_subscription_expiry_reminders: bool,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            publishing_mode: PublishingMode::default(),
            enable_open_access_notification: false,
            enable_subscription_expiry_reminders: false,
        }
    }
}

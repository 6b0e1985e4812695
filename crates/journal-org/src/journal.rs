//! Journal domain model
//!
//! This module provides the core Journal entity. Journals are the
//! top-level tenant entities that own issues, submissions, and role
//! grants; every authorization decision and content operation is
//! scoped to a journal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::locale::LocalizedText;
use crate::settings::{JournalSettings, PublishingMode};

/// A journal is the tenant context for authorization and content.
///
/// Users can hold roles in multiple journals, and issues belong to
/// exactly one journal.
///
/// # Architecture
///
/// ```text
/// Journal
///   ├─ Issues (one of which may be "current")
///   ├─ Submissions
///   ├─ Role grants (via RoleResolver)
///   └─ Settings (publishing mode)
/// ```
///
/// # Examples
///
/// ```
/// use journal_org::Journal;
///
/// let journal = Journal::new("Journal of Examples", "joe");
/// assert_eq!(journal.path, "joe");
/// assert!(journal.is_enabled);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    /// Unique identifier for the journal
    pub id: Uuid,

    /// Human-readable journal name
    pub name: String,

    /// URL-friendly path (unique across the site)
    pub path: String,

    /// Localized journal description
    #[serde(default)]
    pub description: LocalizedText,

    /// Journal-level settings
    pub settings: JournalSettings,

    /// Whether the journal is enabled on the site
    pub is_enabled: bool,

    /// When the journal was created
    pub created_at: DateTime<Utc>,

    /// When the journal was last updated
    pub updated_at: DateTime<Utc>,
}

impl Journal {
    /// Creates a new journal with default settings.
    ///
    /// The journal is created with:
    /// - A newly generated UUID v7 ID
    /// - Open publishing mode
    /// - Enabled status
    /// - Current timestamp for created_at and updated_at
    ///
    /// # Arguments
    ///
    /// * `name` - The journal name
    /// * `path` - URL-friendly path (must be unique)
    ///
    /// # Examples
    ///
    /// ```
    /// use journal_org::{Journal, PublishingMode};
    ///
    /// let journal = Journal::new("Journal of Examples", "joe");
    /// assert_eq!(journal.settings.publishing_mode, PublishingMode::Open);
    /// ```
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            path: path.into(),
            description: LocalizedText::new(),
            settings: JournalSettings::default(),
            is_enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the publishing mode at construction time.
    ///
    /// # Arguments
    ///
    /// * `mode` - The publishing mode for this journal
    pub fn with_publishing_mode(mut self, mode: PublishingMode) -> Self {
        self.settings.publishing_mode = mode;
        self
    }

    /// Check whether this journal publishes its content online.
    pub fn publishes_online(&self) -> bool {
        self.settings.publishing_mode != PublishingMode::None
    }
}

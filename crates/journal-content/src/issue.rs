//! Issue domain model
//!
//! This module provides the Issue entity and the partial-update
//! request used by create and edit operations. An issue belongs to
//! exactly one journal and is identified to readers by whichever of
//! volume, number, year, and title it chooses to show.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use journal_org::LocalizedText;

use crate::access::AccessStatus;

/// A publishable collection of articles within a journal.
///
/// Issues are created unpublished and non-current; the lifecycle
/// manager flips `published` and `current` through its publish and
/// unpublish operations. Within one journal at most one issue is
/// current at a time.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use journal_content::Issue;
///
/// let journal_id = Uuid::now_v7();
/// let issue = Issue::new(journal_id);
/// assert!(!issue.published);
/// assert!(!issue.current);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier for the issue
    pub id: Uuid,

    /// The journal this issue belongs to
    pub journal_id: Uuid,

    /// Volume number (meaningful only when `show_volume` is set)
    pub volume: u32,

    /// Issue number; free-form to allow ranges like "2-3"
    pub number: String,

    /// Publication year (meaningful only when `show_year` is set)
    pub year: u32,

    /// Show the volume in the issue identification
    pub show_volume: bool,

    /// Show the number in the issue identification
    pub show_number: bool,

    /// Show the year in the issue identification
    pub show_year: bool,

    /// Show the title in the issue identification
    pub show_title: bool,

    /// Localized issue title
    #[serde(default)]
    pub title: LocalizedText,

    /// Localized issue description
    #[serde(default)]
    pub description: LocalizedText,

    /// Localized cover image path
    #[serde(default)]
    pub cover_image: LocalizedText,

    /// Whether the issue is published
    pub published: bool,

    /// Whether this is the journal's current issue
    pub current: bool,

    /// Reader access model for this issue
    pub access_status: AccessStatus,

    /// When subscription-only content becomes open, if ever
    pub open_access_date: Option<DateTime<Utc>>,

    /// When the issue was published
    pub date_published: Option<DateTime<Utc>>,

    /// When the issue was created
    pub created_at: DateTime<Utc>,

    /// When the issue was last updated
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Creates a new unpublished, non-current issue.
    ///
    /// All identification flags start false and must be enabled by
    /// the caller before the issue passes validation. Access status
    /// starts open; the lifecycle manager overrides it from the
    /// journal's publishing mode at creation.
    ///
    /// # Arguments
    ///
    /// * `journal_id` - The journal this issue belongs to
    pub fn new(journal_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            journal_id,
            volume: 0,
            number: String::new(),
            year: 0,
            show_volume: false,
            show_number: false,
            show_year: false,
            show_title: false,
            title: LocalizedText::new(),
            description: LocalizedText::new(),
            cover_image: LocalizedText::new(),
            published: false,
            current: false,
            access_status: AccessStatus::Open,
            open_access_date: None,
            date_published: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build the reader-facing identification line for this issue.
    ///
    /// Combines whichever of volume, number, year, and title the
    /// issue chooses to show, e.g. `Vol. 5 No. 2 (2024): Special
    /// Issue`.
    ///
    /// # Arguments
    ///
    /// * `locale` - Preferred locale for the title portion
    pub fn identification(&self, locale: &str) -> String {
        let mut parts: Vec<String> = Vec::new();
        if self.show_volume {
            parts.push(format!("Vol. {}", self.volume));
        }
        if self.show_number {
            parts.push(format!("No. {}", self.number));
        }
        if self.show_year {
            parts.push(format!("({})", self.year));
        }

        let mut identification = parts.join(" ");
        if self.show_title {
            if let Some(title) = self.title.localized(locale) {
                if identification.is_empty() {
                    identification = title.to_string();
                } else {
                    identification = format!("{}: {}", identification, title);
                }
            }
        }
        identification
    }
}

/// A partial update to an issue's mutable attributes.
///
/// Every field is optional: omitted (`None`) fields are preserved,
/// never reset. This makes "unspecified" and "explicitly cleared"
/// unambiguous: clearable fields use a nested `Option`.
///
/// The same request type drives both create and edit; create merges
/// it over freshly initialized defaults, edit over the issue's
/// current values.
///
/// # Examples
///
/// ```
/// use journal_content::IssueUpdateRequest;
///
/// let req = IssueUpdateRequest::default()
///     .with_volume(5)
///     .with_show_volume(true);
/// assert_eq!(req.volume, Some(5));
/// assert!(req.number.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueUpdateRequest {
    /// New volume number
    pub volume: Option<u32>,

    /// New issue number
    pub number: Option<String>,

    /// New publication year
    pub year: Option<u32>,

    /// Show or hide the volume
    pub show_volume: Option<bool>,

    /// Show or hide the number
    pub show_number: Option<bool>,

    /// Show or hide the year
    pub show_year: Option<bool>,

    /// Show or hide the title
    pub show_title: Option<bool>,

    /// New localized title (replaces the whole mapping)
    pub title: Option<LocalizedText>,

    /// New localized description (replaces the whole mapping)
    pub description: Option<LocalizedText>,

    /// New localized cover image path (replaces the whole mapping)
    pub cover_image: Option<LocalizedText>,

    /// New access status (explicit override of the journal default)
    pub access_status: Option<AccessStatus>,

    /// New open access date; `Some(None)` clears it
    pub open_access_date: Option<Option<DateTime<Utc>>>,
}

impl IssueUpdateRequest {
    /// Set the volume.
    pub fn with_volume(mut self, volume: u32) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Set the issue number.
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Set the publication year.
    pub fn with_year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Show or hide the volume.
    pub fn with_show_volume(mut self, show: bool) -> Self {
        self.show_volume = Some(show);
        self
    }

    /// Show or hide the number.
    pub fn with_show_number(mut self, show: bool) -> Self {
        self.show_number = Some(show);
        self
    }

    /// Show or hide the year.
    pub fn with_show_year(mut self, show: bool) -> Self {
        self.show_year = Some(show);
        self
    }

    /// Show or hide the title.
    pub fn with_show_title(mut self, show: bool) -> Self {
        self.show_title = Some(show);
        self
    }

    /// Set the localized title.
    pub fn with_title(mut self, title: LocalizedText) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the localized description.
    pub fn with_description(mut self, description: LocalizedText) -> Self {
        self.description = Some(description);
        self
    }

    /// Set the access status override.
    pub fn with_access_status(mut self, status: AccessStatus) -> Self {
        self.access_status = Some(status);
        self
    }

    /// Set or clear the open access date.
    pub fn with_open_access_date(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.open_access_date = Some(date);
        self
    }

    /// Merge this request over an issue's current values.
    ///
    /// Only fields present in the request change; everything else is
    /// preserved.
    pub fn apply_to(&self, issue: &mut Issue) {
        if let Some(volume) = self.volume {
            issue.volume = volume;
        }
        if let Some(ref number) = self.number {
            issue.number = number.clone();
        }
        if let Some(year) = self.year {
            issue.year = year;
        }
        if let Some(show) = self.show_volume {
            issue.show_volume = show;
        }
        if let Some(show) = self.show_number {
            issue.show_number = show;
        }
        if let Some(show) = self.show_year {
            issue.show_year = show;
        }
        if let Some(show) = self.show_title {
            issue.show_title = show;
        }
        if let Some(ref title) = self.title {
            issue.title = title.clone();
        }
        if let Some(ref description) = self.description {
            issue.description = description.clone();
        }
        if let Some(ref cover_image) = self.cover_image {
            issue.cover_image = cover_image.clone();
        }
        if let Some(access_status) = self.access_status {
            issue.access_status = access_status;
        }
        if let Some(open_access_date) = self.open_access_date {
            issue.open_access_date = open_access_date;
        }
    }
}

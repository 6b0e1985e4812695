//! Locale-keyed text values
//!
//! Reader-facing fields (issue titles, descriptions, cover images)
//! are stored per locale rather than as a single string. This module
//! provides the mapping type those fields share.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A text value keyed by locale (e.g. `"en_US"` → `"Spring Issue"`).
///
/// # Examples
///
/// ```
/// use journal_org::LocalizedText;
///
/// let mut title = LocalizedText::new();
/// title.set("en_US", "Spring Issue");
/// title.set("fr_CA", "Numéro de printemps");
///
/// assert_eq!(title.localized("fr_CA"), Some("Numéro de printemps"));
/// assert_eq!(title.localized("de_DE"), Some("Spring Issue")); // fallback
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    /// Create an empty localized value.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Create a localized value with a single entry.
    ///
    /// # Arguments
    ///
    /// * `locale` - Locale key (e.g. `"en_US"`)
    /// * `value` - Text for that locale
    pub fn with(locale: impl Into<String>, value: impl Into<String>) -> Self {
        let mut text = Self::new();
        text.set(locale, value);
        text
    }

    /// Set the text for a locale, replacing any previous value.
    pub fn set(&mut self, locale: impl Into<String>, value: impl Into<String>) {
        self.0.insert(locale.into(), value.into());
    }

    /// Get the text for a locale.
    ///
    /// Falls back to the first available locale when the requested
    /// one has no entry.
    ///
    /// # Returns
    ///
    /// `None` only when no locale has a value at all
    pub fn localized(&self, locale: &str) -> Option<&str> {
        self.0
            .get(locale)
            .or_else(|| self.0.values().next())
            .map(String::as_str)
    }

    /// Get the text for a locale without falling back.
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }

    /// Check if no locale carries a non-blank value.
    ///
    /// Whitespace-only entries count as blank.
    pub fn is_blank(&self) -> bool {
        self.0.values().all(|v| v.trim().is_empty())
    }

    /// Check if any entry is keyed by a blank locale.
    ///
    /// A value without a locale cannot be displayed; validation
    /// rejects it.
    pub fn has_blank_locale(&self) -> bool {
        self.0.keys().any(|k| k.trim().is_empty())
    }

    /// Iterate over `(locale, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of locales with an entry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no locale has an entry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

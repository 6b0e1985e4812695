//! Issue access status
//!
//! This module maps a journal's publishing configuration to the
//! access status a new issue starts with, and decides whether a
//! reader may reach an issue's galleys.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tokio::sync::RwLock;
use uuid::Uuid;

use journal_org::{Journal, PublishingMode};

use crate::issue::Issue;

/// How readers may access an issue's content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    /// Freely available to all readers
    Open,

    /// Requires an active subscription
    Subscription,
}

impl AccessStatus {
    /// Get string representation of the access status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Subscription => "subscription",
        }
    }
}

/// Determine the access status a new issue defaults to.
///
/// Subscription journals gate new issues behind a subscription, and
/// so do journals that do not publish online at all (their content
/// must not become freely reachable if the mode is later changed).
/// Everything else, including unrecognized configurations, defaults
/// to open access.
///
/// The result only seeds the default at issue creation; an issue's
/// access status is sticky once set, absent an explicit update.
///
/// # Examples
///
/// ```
/// use journal_content::{resolve_access_status, AccessStatus};
/// use journal_org::PublishingMode;
///
/// assert_eq!(resolve_access_status(PublishingMode::Open), AccessStatus::Open);
/// assert_eq!(resolve_access_status(PublishingMode::None), AccessStatus::Subscription);
/// ```
pub fn resolve_access_status(mode: PublishingMode) -> AccessStatus {
    match mode {
        PublishingMode::Subscription | PublishingMode::None => AccessStatus::Subscription,
        PublishingMode::Open => AccessStatus::Open,
    }
}

/// Checks whether a user or their network holds a subscription.
///
/// Subscription bookkeeping lives outside this crate; the lifecycle
/// layer only needs a yes/no answer per journal.
#[async_trait]
pub trait SubscriptionChecker: Send + Sync {
    /// Check if the user holds an active subscription to the journal.
    async fn user_subscribed(&self, user_id: Uuid, journal_id: Uuid) -> bool;

    /// Check if the requesting host is covered by an institutional
    /// subscription to the journal.
    async fn domain_subscribed(&self, remote_host: &str, journal_id: Uuid) -> bool;
}

/// Determine if a reader can access galleys for a specific issue.
///
/// Access is granted when no subscription is required (open journal,
/// open issue, or an open-access date that has passed), or when the
/// user or their domain is subscribed.
///
/// # Arguments
///
/// * `journal` - The journal the issue belongs to
/// * `issue` - The issue whose galleys are requested
/// * `user_id` - The authenticated user, if any
/// * `remote_host` - The requesting host, if known
/// * `subscriptions` - Subscription lookup
pub async fn user_has_access_to_galleys(
    journal: &Journal,
    issue: &Issue,
    user_id: Option<Uuid>,
    remote_host: Option<&str>,
    subscriptions: &dyn SubscriptionChecker,
) -> bool {
    let open_access_reached = issue
        .open_access_date
        .map(|date| date <= Utc::now())
        .unwrap_or(false);

    let subscription_required = journal.settings.publishing_mode == PublishingMode::Subscription
        && issue.access_status == AccessStatus::Subscription
        && !open_access_reached;

    if !subscription_required || issue.access_status == AccessStatus::Open {
        return true;
    }

    if let Some(user_id) = user_id {
        if subscriptions.user_subscribed(user_id, journal.id).await {
            return true;
        }
    }

    if let Some(host) = remote_host {
        if subscriptions.domain_subscribed(host, journal.id).await {
            return true;
        }
    }

    false
}

/// In-memory subscription checker.
///
/// Suitable for single-process deployments and testing.
#[derive(Debug, Default)]
pub struct MemorySubscriptions {
    /// Subscribed (user, journal) pairs
    users: RwLock<HashSet<(Uuid, Uuid)>>,
    /// Subscribed (host suffix, journal) pairs
    domains: RwLock<HashSet<(String, Uuid)>>,
}

impl MemorySubscriptions {
    /// Create an empty checker with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a user subscription to a journal.
    pub async fn subscribe_user(&self, user_id: Uuid, journal_id: Uuid) {
        self.users.write().await.insert((user_id, journal_id));
    }

    /// Record an institutional subscription by host suffix.
    pub async fn subscribe_domain(&self, domain: impl Into<String>, journal_id: Uuid) {
        self.domains.write().await.insert((domain.into(), journal_id));
    }
}

#[async_trait]
impl SubscriptionChecker for MemorySubscriptions {
    async fn user_subscribed(&self, user_id: Uuid, journal_id: Uuid) -> bool {
        self.users.read().await.contains(&(user_id, journal_id))
    }

    async fn domain_subscribed(&self, remote_host: &str, journal_id: Uuid) -> bool {
        let domains = self.domains.read().await;
        domains
            .iter()
            .any(|(domain, journal)| *journal == journal_id && remote_host.ends_with(domain))
    }
}

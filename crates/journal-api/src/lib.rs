//! # Journal API
//!
//! This crate provides the request layer of the journal platform:
//! per-route policy chains, the issue and submission handlers, and
//! the error mapping to transport status codes.
//!
//! ## Overview
//!
//! The journal-api crate handles:
//! - **Chains**: One ordered policy chain per route, built from
//!   shared authorization lookups
//! - **Issue handler**: list/get/create/edit/delete/publish/unpublish,
//!   each gated by its chain
//! - **Submission handler**: stage-scoped metadata and file access
//! - **Errors**: `ApiError` mapping denials and content failures to
//!   400/403/404/500
//!
//! ## Request Flow
//!
//! A handler builds a [`journal_authz::RequestContext`] from the
//! resolved journal, the authenticated user, and the route
//! parameters, evaluates the route's chain, and only acts on a
//! permit. Denials convert to [`ApiError::Denied`] carrying the
//! denying policy's message key and status class.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use journal_api::{AuthzDeps, IssueHandler};
//! use journal_authz::policies::MemoryStageAssignments;
//! use journal_content::{
//!     IssueLifecycleManager, IssueUpdateRequest, MemoryArticles, MemoryIssueRepository,
//!     MemoryPublishedArticles, MemoryTombstones, NoopSearchIndexer,
//! };
//! use journal_org::{Journal, MemoryRoleResolver};
//!
//! # async fn example() {
//! let issues = MemoryIssueRepository::shared();
//! let articles = MemoryArticles::shared();
//! let deps = AuthzDeps::new(
//!     MemoryRoleResolver::shared(),
//!     issues.clone(),
//!     articles.clone(),
//!     MemoryStageAssignments::shared(),
//! );
//! let lifecycle = Arc::new(IssueLifecycleManager::new(
//!     issues,
//!     MemoryPublishedArticles::shared(),
//!     articles,
//!     MemoryTombstones::shared(),
//!     NoopSearchIndexer::shared(),
//! ));
//! let handler = IssueHandler::new(deps, lifecycle);
//!
//! let journal = Journal::new("Journal of Examples", "joe");
//! let result = handler.list(&journal, None).await;
//! assert!(result.is_ok());
//! # }
//! ```
//!
//! ## Integration
//!
//! This crate works with:
//! - `journal-authz`: Chains and policies evaluated per request
//! - `journal-content`: The lifecycle manager handlers act through
//! - `journal-org`: Journals, roles, and role resolution

pub mod chains;
pub mod error;
pub mod issues;
pub mod submissions;

// Re-export main types for convenience
pub use chains::{editorial_roles, issue_chain, submission_chain, submission_roles, AuthzDeps, IssueOp};
pub use error::{ApiError, ApiResult};
pub use issues::{make_issue_data, IssueHandler};
pub use submissions::SubmissionHandler;

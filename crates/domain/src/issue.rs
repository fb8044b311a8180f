// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The canonical issue entity and its mutation rules.
//!
//! ## Invariants
//!
//! - `issue_id` and `submitted_at` are immutable after creation
//! - `updated_at` is refreshed on every mutation
//! - `resolved_at` is stamped on every entry to `Resolved` (re-entering
//!   `Resolved` re-stamps it; there is no un-resolve path)
//! - `comments` is append-only and never reordered

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Category, IssueId, IssueStatus, Priority};

/// A latitude/longitude pair attached to an issue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

/// A minimal projection of a referenced user.
///
/// Issues record weak references to users by id; this is the display
/// projection resolved at read time. The issue does not own the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// The user's display name.
    pub name: String,
    /// The user's email address.
    pub email: String,
}

/// An audit comment appended to an issue during a status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// The comment text.
    pub text: String,
    /// Weak reference to the authoring user, if an acting identity was
    /// available at append time.
    pub author: Option<i64>,
    /// Wall-clock time at append.
    pub created_at: DateTime<Utc>,
}

/// The central issue entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Globally unique human-readable identifier. Immutable.
    pub issue_id: IssueId,
    /// Short summary of the issue. Trimmed, non-empty.
    pub title: String,
    /// Full description. Trimmed, non-empty.
    pub description: String,
    /// Closed-enumeration category.
    pub category: Category,
    /// Lifecycle status.
    pub status: IssueStatus,
    /// Assigned priority.
    pub priority: Priority,
    /// Free-text location. Empty string when not provided.
    pub location: String,
    /// Optional coordinate pair. Present only when both values parsed.
    pub coordinates: Option<Coordinates>,
    /// Ordered opaque image references (URLs or embedded blobs).
    pub images: Vec<String>,
    /// Weak reference to the submitting user, if known.
    pub submitted_by: Option<i64>,
    /// Weak reference to the assigned worker, if any.
    pub assigned_to: Option<i64>,
    /// Set once at creation. Immutable.
    pub submitted_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
    /// Stamped on entry to `Resolved`. Never cleared by normal transitions.
    pub resolved_at: Option<DateTime<Utc>>,
    /// Append-only comment sequence.
    pub comments: Vec<Comment>,
}

/// A validated draft for creating a new issue.
///
/// Construction goes through [`crate::validate_submission`], which trims
/// the text fields and rejects empty required fields.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueDraft {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Trimmed, non-empty description.
    pub description: String,
    /// Validated category.
    pub category: Category,
    /// Priority for the new issue. Submissions default to `Medium`;
    /// ingested reports carry the classifier's result.
    pub priority: Priority,
    /// Free-text location.
    pub location: String,
    /// Normalized coordinates.
    pub coordinates: Option<Coordinates>,
    /// Ordered image references.
    pub images: Vec<String>,
    /// Weak reference to the submitting user, if known.
    pub submitted_by: Option<i64>,
}

/// A partial update applied to an issue by an admin or field worker.
///
/// Only the fields present are applied; omitted fields are untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IssuePatch {
    /// New status, if changing.
    pub status: Option<IssueStatus>,
    /// New priority, if changing.
    pub priority: Option<Priority>,
    /// New assignee, if changing.
    pub assigned_to: Option<i64>,
}

impl Issue {
    /// Creates a new issue from a validated draft.
    ///
    /// Status starts at `Pending`; `submitted_at` and `updated_at` are both
    /// set to `now`.
    #[must_use]
    pub fn new(issue_id: IssueId, draft: IssueDraft, now: DateTime<Utc>) -> Self {
        Self {
            issue_id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            status: IssueStatus::Pending,
            priority: draft.priority,
            location: draft.location,
            coordinates: draft.coordinates,
            images: draft.images,
            submitted_by: draft.submitted_by,
            assigned_to: None,
            submitted_at: now,
            updated_at: now,
            resolved_at: None,
            comments: Vec::new(),
        }
    }

    /// Applies a partial update to this issue.
    ///
    /// Setting status to `Resolved` stamps `resolved_at` with `now`, with
    /// no check against the previous status: re-entering `Resolved`
    /// re-dates the timestamp. `updated_at` is refreshed regardless of
    /// which fields changed.
    pub fn apply_patch(&mut self, patch: &IssuePatch, now: DateTime<Utc>) {
        if let Some(status) = patch.status {
            self.status = status;
            if status == IssueStatus::Resolved {
                self.resolved_at = Some(now);
            }
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(assigned_to) = patch.assigned_to {
            self.assigned_to = Some(assigned_to);
        }
        self.updated_at = now;
    }

    /// Appends an audit comment attributed to `author`.
    ///
    /// Comments are append-only; `created_at` values are non-decreasing
    /// within a single issue.
    pub fn append_comment(&mut self, text: String, author: Option<i64>, now: DateTime<Utc>) {
        self.comments.push(Comment {
            text,
            author,
            created_at: now,
        });
        self.updated_at = now;
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the API layer.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod list_tests;

use chrono::{DateTime, Duration, Utc};

use civic_issues_domain::{Category, Issue, IssueDraft, IssueId, IssueStatus, Priority};
use civic_issues_persistence::SqlitePersistence;

use crate::request_response::SubmitIssueRequest;

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn submit_request(title: &str, description: &str, category: &str) -> SubmitIssueRequest {
    SubmitIssueRequest {
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        location: None,
        coordinates: None,
        images: None,
        submitted_by: None,
    }
}

/// Inserts a resolved issue directly into the store with a known age and
/// resolution duration, bypassing the submission flow so tests can
/// control timestamps.
pub fn insert_resolved_issue(
    persistence: &SqlitePersistence,
    issue_id: &str,
    category: Category,
    age: Duration,
    resolution: Duration,
) -> Issue {
    let submitted: DateTime<Utc> = Utc::now() - age;
    let mut issue: Issue = Issue::new(
        IssueId::new(issue_id.to_string()),
        IssueDraft {
            title: format!("Issue {issue_id}"),
            description: String::from("Test description"),
            category,
            priority: Priority::Medium,
            location: String::new(),
            coordinates: None,
            images: Vec::new(),
            submitted_by: None,
        },
        submitted,
    );
    issue.status = IssueStatus::Resolved;
    issue.resolved_at = Some(submitted + resolution);
    issue.updated_at = submitted + resolution;
    persistence.insert_issue(&issue).expect("insert failed");
    issue
}

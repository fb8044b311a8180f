// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the persistence crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod store_tests;

use chrono::{DateTime, Duration, Utc};

use civic_issues_domain::{Category, Issue, IssueDraft, IssueId, IssueStatus, Priority};

use crate::SqlitePersistence;

pub fn create_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_issue(issue_id: &str, category: Category, now: DateTime<Utc>) -> Issue {
    Issue::new(
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
        now,
    )
}

/// Inserts an issue submitted at `now - age` and, when `resolved_after`
/// is set, resolved that long after submission.
pub fn insert_aged_issue(
    persistence: &SqlitePersistence,
    issue_id: &str,
    category: Category,
    age: Duration,
    resolved_after: Option<Duration>,
) -> Issue {
    let submitted: DateTime<Utc> = Utc::now() - age;
    let mut issue: Issue = create_test_issue(issue_id, category, submitted);
    if let Some(delta) = resolved_after {
        issue.status = IssueStatus::Resolved;
        issue.resolved_at = Some(submitted + delta);
        issue.updated_at = submitted + delta;
    }
    persistence.insert_issue(&issue).expect("insert failed");
    issue
}

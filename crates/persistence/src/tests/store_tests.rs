// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Duration, Utc};

use civic_issues_domain::{Category, Comment, Issue, IssuePatch, IssueStatus, Priority, UserRef};

use super::{create_test_issue, create_test_persistence};
use crate::{IssueFilter, PersistenceError, SqlitePersistence};

#[test]
fn test_insert_and_get_round_trip() {
    let persistence: SqlitePersistence = create_test_persistence();
    let now: DateTime<Utc> = Utc::now();
    let issue: Issue = create_test_issue("CIV-AAAA0001", Category::Road, now);

    persistence.insert_issue(&issue).unwrap();
    let loaded: Issue = persistence.get_issue("CIV-AAAA0001").unwrap();

    assert_eq!(loaded.issue_id.value(), "CIV-AAAA0001");
    assert_eq!(loaded.category, Category::Road);
    assert_eq!(loaded.status, IssueStatus::Pending);
    assert_eq!(loaded.priority, Priority::Medium);
    // Millisecond storage truncates sub-millisecond precision
    assert_eq!(
        loaded.submitted_at.timestamp_millis(),
        now.timestamp_millis()
    );
}

#[test]
fn test_insert_returns_increasing_row_keys() {
    let persistence: SqlitePersistence = create_test_persistence();
    let now: DateTime<Utc> = Utc::now();

    let first: i64 = persistence
        .insert_issue(&create_test_issue("CIV-AAAA0001", Category::Road, now))
        .unwrap();
    let second: i64 = persistence
        .insert_issue(&create_test_issue("CIV-AAAA0002", Category::Road, now))
        .unwrap();

    assert!(first > 0);
    assert!(second > first);
}

#[test]
fn test_duplicate_issue_id_is_rejected() {
    let persistence: SqlitePersistence = create_test_persistence();
    let now: DateTime<Utc> = Utc::now();
    let issue: Issue = create_test_issue("CIV-AAAA0001", Category::Road, now);

    persistence.insert_issue(&issue).unwrap();
    let result = persistence.insert_issue(&issue);

    assert_eq!(
        result,
        Err(PersistenceError::DuplicateIssueId(String::from(
            "CIV-AAAA0001"
        )))
    );
}

#[test]
fn test_issue_id_exists() {
    let persistence: SqlitePersistence = create_test_persistence();
    let issue: Issue = create_test_issue("CIV-AAAA0001", Category::Other, Utc::now());

    assert!(!persistence.issue_id_exists("CIV-AAAA0001").unwrap());
    persistence.insert_issue(&issue).unwrap();
    assert!(persistence.issue_id_exists("CIV-AAAA0001").unwrap());
}

#[test]
fn test_get_missing_issue_is_not_found() {
    let persistence: SqlitePersistence = create_test_persistence();
    let result = persistence.get_issue("CIV-NOPE");

    assert_eq!(
        result,
        Err(PersistenceError::IssueNotFound(String::from("CIV-NOPE")))
    );
}

#[test]
fn test_update_persists_patched_fields() {
    let persistence: SqlitePersistence = create_test_persistence();
    let now: DateTime<Utc> = Utc::now();
    let mut issue: Issue = create_test_issue("CIV-AAAA0001", Category::Road, now);
    persistence.insert_issue(&issue).unwrap();

    issue.apply_patch(
        &IssuePatch {
            status: Some(IssueStatus::Resolved),
            priority: Some(Priority::Urgent),
            ..IssuePatch::default()
        },
        now + Duration::hours(3),
    );
    persistence.update_issue(&issue).unwrap();

    let loaded: Issue = persistence.get_issue("CIV-AAAA0001").unwrap();
    assert_eq!(loaded.status, IssueStatus::Resolved);
    assert_eq!(loaded.priority, Priority::Urgent);
    assert!(loaded.resolved_at.is_some());
    assert!(loaded.resolved_at.unwrap() >= loaded.submitted_at);
}

#[test]
fn test_update_missing_issue_is_not_found() {
    let persistence: SqlitePersistence = create_test_persistence();
    let issue: Issue = create_test_issue("CIV-NOPE", Category::Road, Utc::now());

    let result = persistence.update_issue(&issue);
    assert_eq!(
        result,
        Err(PersistenceError::IssueNotFound(String::from("CIV-NOPE")))
    );
}

#[test]
fn test_comments_round_trip_in_order() {
    let persistence: SqlitePersistence = create_test_persistence();
    let now: DateTime<Utc> = Utc::now();
    let issue: Issue = create_test_issue("CIV-AAAA0001", Category::Road, now);
    persistence.insert_issue(&issue).unwrap();

    let author: i64 = persistence
        .insert_user("Ada Worker", "ada@example.com")
        .unwrap();
    for (offset, text) in ["assigned", "fixed"].iter().enumerate() {
        persistence
            .append_comment(
                "CIV-AAAA0001",
                &Comment {
                    text: (*text).to_string(),
                    author: Some(author),
                    created_at: now + Duration::minutes(i64::try_from(offset).unwrap()),
                },
            )
            .unwrap();
    }

    let loaded: Issue = persistence.get_issue("CIV-AAAA0001").unwrap();
    assert_eq!(loaded.comments.len(), 2);
    assert_eq!(loaded.comments[0].text, "assigned");
    assert_eq!(loaded.comments[1].text, "fixed");
    assert_eq!(loaded.comments[0].author, Some(author));
}

#[test]
fn test_comment_on_missing_issue_is_not_found() {
    let persistence: SqlitePersistence = create_test_persistence();

    let result = persistence.append_comment(
        "CIV-NOPE",
        &Comment {
            text: String::from("hello"),
            author: None,
            created_at: Utc::now(),
        },
    );
    assert_eq!(
        result,
        Err(PersistenceError::IssueNotFound(String::from("CIV-NOPE")))
    );
}

#[test]
fn test_list_orders_newest_first() {
    let persistence: SqlitePersistence = create_test_persistence();
    let now: DateTime<Utc> = Utc::now();

    for (offset, id) in ["CIV-OLD", "CIV-MID", "CIV-NEW"].iter().enumerate() {
        let issue: Issue = create_test_issue(
            id,
            Category::Road,
            now + Duration::minutes(i64::try_from(offset).unwrap()),
        );
        persistence.insert_issue(&issue).unwrap();
    }

    let (issues, total) = persistence
        .list_issues(IssueFilter::default(), 1, 10)
        .unwrap();

    assert_eq!(total, 3);
    assert_eq!(issues[0].issue_id.value(), "CIV-NEW");
    assert_eq!(issues[2].issue_id.value(), "CIV-OLD");
}

#[test]
fn test_list_filters_are_conjunctive() {
    let persistence: SqlitePersistence = create_test_persistence();
    let now: DateTime<Utc> = Utc::now();

    let mut road: Issue = create_test_issue("CIV-ROAD", Category::Road, now);
    road.priority = Priority::High;
    persistence.insert_issue(&road).unwrap();

    let other: Issue = create_test_issue("CIV-OTHER", Category::Other, now);
    persistence.insert_issue(&other).unwrap();

    let (issues, total) = persistence
        .list_issues(
            IssueFilter {
                category: Some(Category::Road),
                priority: Some(Priority::High),
                ..IssueFilter::default()
            },
            1,
            10,
        )
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(issues[0].issue_id.value(), "CIV-ROAD");
}

#[test]
fn test_list_pagination_math() {
    let persistence: SqlitePersistence = create_test_persistence();
    let now: DateTime<Utc> = Utc::now();

    for index in 0..25 {
        let issue: Issue = create_test_issue(
            &format!("CIV-P{index:04}"),
            Category::Road,
            now + Duration::seconds(index),
        );
        persistence.insert_issue(&issue).unwrap();
    }

    let (page_two, total) = persistence
        .list_issues(
            IssueFilter {
                status: Some(IssueStatus::Pending),
                ..IssueFilter::default()
            },
            2,
            10,
        )
        .unwrap();

    assert_eq!(total, 25);
    assert_eq!(page_two.len(), 10);
    // Newest first: page 2 starts at the 11th newest
    assert_eq!(page_two[0].issue_id.value(), "CIV-P0014");

    let (page_three, _) = persistence
        .list_issues(
            IssueFilter {
                status: Some(IssueStatus::Pending),
                ..IssueFilter::default()
            },
            3,
            10,
        )
        .unwrap();
    assert_eq!(page_three.len(), 5);
}

#[test]
fn test_user_ref_projection() {
    let persistence: SqlitePersistence = create_test_persistence();
    let user_id: i64 = persistence
        .insert_user("Grace Admin", "grace@example.com")
        .unwrap();

    let user: Option<UserRef> = persistence.get_user_ref(user_id).unwrap();
    assert_eq!(
        user,
        Some(UserRef {
            name: String::from("Grace Admin"),
            email: String::from("grace@example.com"),
        })
    );

    assert_eq!(persistence.get_user_ref(9999).unwrap(), None);
}

#[test]
fn test_coordinates_and_images_round_trip() {
    let persistence: SqlitePersistence = create_test_persistence();
    let now: DateTime<Utc> = Utc::now();
    let mut issue: Issue = create_test_issue("CIV-GEO", Category::Utilities, now);
    issue.coordinates = Some(civic_issues_domain::Coordinates {
        lat: 12.9716,
        lng: 77.5946,
    });
    issue.images = vec![String::from("a.jpg"), String::from("b.jpg")];
    persistence.insert_issue(&issue).unwrap();

    let loaded: Issue = persistence.get_issue("CIV-GEO").unwrap();
    assert_eq!(loaded.coordinates, issue.coordinates);
    assert_eq!(loaded.images, vec!["a.jpg", "b.jpg"]);
}

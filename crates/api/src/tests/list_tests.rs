// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use civic_issues_persistence::SqlitePersistence;

use super::{create_test_persistence, submit_request};
use crate::error::ApiError;
use crate::handlers::{list_issues, submit_issue};
use crate::request_response::{ListIssuesRequest, ListIssuesResponse};

#[test]
fn test_page_two_of_twenty_five_pending_issues() {
    let persistence: SqlitePersistence = create_test_persistence();
    for index in 0..25 {
        submit_issue(
            &persistence,
            &submit_request(&format!("Issue {index}"), "description", "road"),
        )
        .unwrap();
    }

    let response: ListIssuesResponse = list_issues(
        &persistence,
        &ListIssuesRequest {
            status: Some(String::from("pending")),
            page: Some(2),
            limit: Some(10),
            ..ListIssuesRequest::default()
        },
    )
    .unwrap();

    assert_eq!(response.issues.len(), 10);
    assert_eq!(response.pagination.current_page, 2);
    assert_eq!(response.pagination.total_pages, 3);
    assert_eq!(response.pagination.total_issues, 25);
    assert!(response.pagination.has_next_page);
    assert!(response.pagination.has_prev_page);
}

#[test]
fn test_defaults_are_first_page_of_ten() {
    let persistence: SqlitePersistence = create_test_persistence();
    for index in 0..12 {
        submit_issue(
            &persistence,
            &submit_request(&format!("Issue {index}"), "description", "road"),
        )
        .unwrap();
    }

    let response: ListIssuesResponse =
        list_issues(&persistence, &ListIssuesRequest::default()).unwrap();

    assert_eq!(response.issues.len(), 10);
    assert_eq!(response.pagination.current_page, 1);
    assert_eq!(response.pagination.total_pages, 2);
    assert!(response.pagination.has_next_page);
    assert!(!response.pagination.has_prev_page);
}

#[test]
fn test_empty_store_lists_nothing() {
    let persistence: SqlitePersistence = create_test_persistence();

    let response: ListIssuesResponse =
        list_issues(&persistence, &ListIssuesRequest::default()).unwrap();

    assert!(response.issues.is_empty());
    assert_eq!(response.pagination.total_pages, 0);
    assert_eq!(response.pagination.total_issues, 0);
    assert!(!response.pagination.has_next_page);
    assert!(!response.pagination.has_prev_page);
}

#[test]
fn test_category_filter_narrows_results() {
    let persistence: SqlitePersistence = create_test_persistence();
    submit_issue(&persistence, &submit_request("Pothole", "deep", "road")).unwrap();
    submit_issue(
        &persistence,
        &submit_request("Broken swing", "playground", "public-spaces"),
    )
    .unwrap();

    let response: ListIssuesResponse = list_issues(
        &persistence,
        &ListIssuesRequest {
            category: Some(String::from("public-spaces")),
            ..ListIssuesRequest::default()
        },
    )
    .unwrap();

    assert_eq!(response.issues.len(), 1);
    assert_eq!(response.issues[0].title, "Broken swing");
}

#[test]
fn test_unknown_filter_value_is_rejected() {
    let persistence: SqlitePersistence = create_test_persistence();

    let result = list_issues(
        &persistence,
        &ListIssuesRequest {
            status: Some(String::from("archived")),
            ..ListIssuesRequest::default()
        },
    );
    assert!(matches!(result, Err(ApiError::Validation { .. })));
}

#[test]
fn test_newest_submission_listed_first() {
    let persistence: SqlitePersistence = create_test_persistence();
    submit_issue(&persistence, &submit_request("First", "description", "road")).unwrap();
    submit_issue(
        &persistence,
        &submit_request("Second", "description", "road"),
    )
    .unwrap();

    let response: ListIssuesResponse =
        list_issues(&persistence, &ListIssuesRequest::default()).unwrap();

    assert_eq!(response.issues[0].title, "Second");
    assert_eq!(response.issues[1].title, "First");
}

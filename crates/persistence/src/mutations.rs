// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::{Connection, params};
use tracing::debug;

use civic_issues_domain::{Comment, Issue};

use crate::error::PersistenceError;
use crate::rows::to_millis;

/// Returns true if `err` is a unique-constraint violation on the given
/// column path (e.g. `issues.issue_id`).
fn is_unique_violation(err: &rusqlite::Error, column: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, Some(message)) => {
            failure.code == rusqlite::ErrorCode::ConstraintViolation && message.contains(column)
        }
        _ => false,
    }
}

/// Inserts a new issue.
///
/// # Returns
///
/// The row key of the inserted issue.
///
/// # Errors
///
/// Returns `DuplicateIssueId` when the insert loses the identifier race
/// (the unique constraint is the atomic backstop for the check-then-act
/// generation loop), or a database error otherwise.
pub fn insert_issue(conn: &Connection, issue: &Issue) -> Result<i64, PersistenceError> {
    let images_json: String = serde_json::to_string(&issue.images)?;

    let result = conn.execute(
        "INSERT INTO issues (issue_id, title, description, category, status, priority,
                             location, lat, lng, images_json, submitted_by, assigned_to,
                             submitted_at, updated_at, resolved_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            issue.issue_id.value(),
            issue.title,
            issue.description,
            issue.category.as_str(),
            issue.status.as_str(),
            issue.priority.as_str(),
            issue.location,
            issue.coordinates.map(|c| c.lat),
            issue.coordinates.map(|c| c.lng),
            images_json,
            issue.submitted_by,
            issue.assigned_to,
            to_millis(issue.submitted_at),
            to_millis(issue.updated_at),
            issue.resolved_at.map(to_millis),
        ],
    );

    match result {
        Ok(_) => {
            let issue_pk: i64 = conn.last_insert_rowid();
            debug!(issue_pk, issue_id = %issue.issue_id, "Inserted issue");
            Ok(issue_pk)
        }
        Err(err) if is_unique_violation(&err, "issues.issue_id") => Err(
            PersistenceError::DuplicateIssueId(issue.issue_id.value().to_string()),
        ),
        Err(err) => Err(err.into()),
    }
}

/// Updates the mutable scalar fields of an issue.
///
/// Comments are appended separately; `issue_id` and `submitted_at` are
/// immutable and never written here.
///
/// # Errors
///
/// Returns `IssueNotFound` if no row matches the identifier.
pub fn update_issue(conn: &Connection, issue: &Issue) -> Result<(), PersistenceError> {
    let changed: usize = conn.execute(
        "UPDATE issues
         SET status = ?1, priority = ?2, assigned_to = ?3,
             updated_at = ?4, resolved_at = ?5
         WHERE issue_id = ?6",
        params![
            issue.status.as_str(),
            issue.priority.as_str(),
            issue.assigned_to,
            to_millis(issue.updated_at),
            issue.resolved_at.map(to_millis),
            issue.issue_id.value(),
        ],
    )?;

    if changed == 0 {
        return Err(PersistenceError::IssueNotFound(
            issue.issue_id.value().to_string(),
        ));
    }

    debug!(issue_id = %issue.issue_id, "Updated issue");
    Ok(())
}

/// Appends a comment to an issue's audit trail.
///
/// # Errors
///
/// Returns `IssueNotFound` if no issue matches the identifier.
pub fn append_comment(
    conn: &Connection,
    issue_id: &str,
    comment: &Comment,
) -> Result<(), PersistenceError> {
    let inserted: usize = conn.execute(
        "INSERT INTO comments (issue_pk, text, author, created_at)
         SELECT issue_pk, ?2, ?3, ?4 FROM issues WHERE issue_id = ?1",
        params![
            issue_id,
            comment.text,
            comment.author,
            to_millis(comment.created_at),
        ],
    )?;

    if inserted == 0 {
        return Err(PersistenceError::IssueNotFound(issue_id.to_string()));
    }

    debug!(issue_id, "Appended comment");
    Ok(())
}

/// Inserts a user record backing the weak-reference projections.
///
/// # Returns
///
/// The new user's id.
///
/// # Errors
///
/// Returns `DatabaseError` on failure, including duplicate emails.
pub fn insert_user(conn: &Connection, name: &str, email: &str) -> Result<i64, PersistenceError> {
    conn.execute(
        "INSERT INTO users (name, email) VALUES (?1, ?2)",
        params![name, email],
    )?;
    Ok(conn.last_insert_rowid())
}

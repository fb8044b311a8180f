// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::types::ToSql;
use rusqlite::{Connection, Result as SqliteResult, params, params_from_iter};

use civic_issues_domain::{Category, Comment, Issue, IssueStatus, Priority, UserRef};

use crate::error::PersistenceError;
use crate::rows::{ISSUE_COLUMNS, IssueRow, from_millis};

/// A conjunction of equality predicates for issue listing.
///
/// Absent fields impose no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IssueFilter {
    /// Restrict to this status.
    pub status: Option<IssueStatus>,
    /// Restrict to this category.
    pub category: Option<Category>,
    /// Restrict to this priority.
    pub priority: Option<Priority>,
    /// Restrict to issues assigned to this user.
    pub assigned_to: Option<i64>,
}

impl IssueFilter {
    /// Builds the WHERE clause and its bound parameters.
    fn to_sql(self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut clauses: Vec<&'static str> = Vec::new();
        let mut bound: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(status) = self.status {
            clauses.push("status = ?");
            bound.push(Box::new(status.as_str()));
        }
        if let Some(category) = self.category {
            clauses.push("category = ?");
            bound.push(Box::new(category.as_str()));
        }
        if let Some(priority) = self.priority {
            clauses.push("priority = ?");
            bound.push(Box::new(priority.as_str()));
        }
        if let Some(assigned_to) = self.assigned_to {
            clauses.push("assigned_to = ?");
            bound.push(Box::new(assigned_to));
        }

        let where_sql: String = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };

        (where_sql, bound)
    }
}

/// Checks whether an issue identifier is already taken.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn issue_id_exists(conn: &Connection, issue_id: &str) -> Result<bool, PersistenceError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM issues WHERE issue_id = ?1",
        params![issue_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Loads the comments for an issue row, oldest first.
fn fetch_comments(conn: &Connection, issue_pk: i64) -> Result<Vec<Comment>, PersistenceError> {
    let mut stmt = conn.prepare(
        "SELECT text, author, created_at
         FROM comments
         WHERE issue_pk = ?1
         ORDER BY comment_id ASC",
    )?;

    let rows = stmt.query_map(params![issue_pk], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, Option<i64>>(1)?,
            row.get::<_, i64>(2)?,
        ))
    })?;

    let mut comments: Vec<Comment> = Vec::new();
    for row in rows {
        let (text, author, created_at) = row?;
        comments.push(Comment {
            text,
            author,
            created_at: from_millis(created_at)?,
        });
    }
    Ok(comments)
}

/// Retrieves an issue by its identifier, comments included.
///
/// # Errors
///
/// Returns `IssueNotFound` if no issue matches.
pub fn get_issue(conn: &Connection, issue_id: &str) -> Result<Issue, PersistenceError> {
    let row_result: SqliteResult<IssueRow> = conn.query_row(
        &format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE issue_id = ?1"),
        params![issue_id],
        |row| IssueRow::from_row(row),
    );

    match row_result {
        Ok(row) => {
            let issue_pk: i64 = row.issue_pk;
            let mut issue: Issue = row.into_issue()?;
            issue.comments = fetch_comments(conn, issue_pk)?;
            Ok(issue)
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            Err(PersistenceError::IssueNotFound(issue_id.to_string()))
        }
        Err(e) => Err(PersistenceError::DatabaseError(e.to_string())),
    }
}

/// Lists issues matching a filter, newest first, with pagination.
///
/// Ordering by `submitted_at` descending is load-bearing: dashboards show
/// the most recent issues first. `page` is 1-indexed.
///
/// # Returns
///
/// The page of issues (comments included) and the total match count.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_issues(
    conn: &Connection,
    filter: IssueFilter,
    page: u32,
    limit: u32,
) -> Result<(Vec<Issue>, u64), PersistenceError> {
    let (where_sql, bound) = filter.to_sql();

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM issues{where_sql}"),
        params_from_iter(bound.iter().map(|value| &**value)),
        |row| row.get(0),
    )?;

    let skip: i64 = i64::from(page.saturating_sub(1)) * i64::from(limit);
    let mut stmt = conn.prepare(&format!(
        "SELECT {ISSUE_COLUMNS} FROM issues{where_sql}
         ORDER BY submitted_at DESC, issue_pk DESC
         LIMIT {limit} OFFSET {skip}"
    ))?;

    let rows = stmt.query_map(
        params_from_iter(bound.iter().map(|value| &**value)),
        |row| IssueRow::from_row(row),
    )?;

    let mut issues: Vec<Issue> = Vec::new();
    for row in rows {
        let row: IssueRow = row?;
        let issue_pk: i64 = row.issue_pk;
        let mut issue: Issue = row.into_issue()?;
        issue.comments = fetch_comments(conn, issue_pk)?;
        issues.push(issue);
    }

    Ok((issues, u64::try_from(total).unwrap_or(0)))
}

/// Resolves a user id to its minimal display projection.
///
/// Missing users resolve to `None` rather than an error: issue references
/// are weak and a dangling reference only degrades the display.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_user_ref(conn: &Connection, user_id: i64) -> Result<Option<UserRef>, PersistenceError> {
    let row_result: SqliteResult<UserRef> = conn.query_row(
        "SELECT name, email FROM users WHERE user_id = ?1",
        params![user_id],
        |row| {
            Ok(UserRef {
                name: row.get(0)?,
                email: row.get(1)?,
            })
        },
    );

    match row_result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(PersistenceError::DatabaseError(e.to_string())),
    }
}

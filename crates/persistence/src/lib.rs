// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Civic Issues platform.
//!
//! This crate provides `SQLite` persistence for issues, their comment
//! trails, and the minimal user records backing weak-reference display
//! projections. `SQLite` is the only backend: in-memory databases serve
//! development and tests, file-backed databases serve deployment.
//!
//! The store exposes exactly the operations the API layer composes:
//! insert, filtered find, count, and the aggregate queries behind the
//! dashboards. No query spans a transaction with another; per-query
//! consistency is all the aggregators rely on.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::Path;
use tracing::info;

use civic_issues_domain::{Category, Comment, Issue, IssueStatus, UserRef};

mod error;
mod mutations;
mod queries;
mod rows;
mod schema;
mod stats;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use queries::IssueFilter;

/// `SQLite`-backed persistence for the issue store.
pub struct SqlitePersistence {
    /// The underlying database connection.
    conn: Connection,
}

impl SqlitePersistence {
    /// Creates a new in-memory persistence instance.
    ///
    /// Each instance owns a private in-memory database, giving tests
    /// deterministic isolation.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be opened or the schema
    /// cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open_in_memory()
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        schema::initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Creates a new file-backed persistence instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be opened or the schema
    /// cannot be initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open(path.as_ref())
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        schema::initialize_schema(&conn)?;
        info!(path = %path.as_ref().display(), "Opened issue database");
        Ok(Self { conn })
    }

    /// Inserts a new issue, returning its row key.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIssueId` if the identifier is already taken.
    pub fn insert_issue(&self, issue: &Issue) -> Result<i64, PersistenceError> {
        mutations::insert_issue(&self.conn, issue)
    }

    /// Checks whether an issue identifier is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn issue_id_exists(&self, issue_id: &str) -> Result<bool, PersistenceError> {
        queries::issue_id_exists(&self.conn, issue_id)
    }

    /// Retrieves an issue by identifier, comments included.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if no issue matches.
    pub fn get_issue(&self, issue_id: &str) -> Result<Issue, PersistenceError> {
        queries::get_issue(&self.conn, issue_id)
    }

    /// Writes back the mutable fields of an issue.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if no row matches.
    pub fn update_issue(&self, issue: &Issue) -> Result<(), PersistenceError> {
        mutations::update_issue(&self.conn, issue)
    }

    /// Appends a comment to an issue.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if no issue matches.
    pub fn append_comment(
        &self,
        issue_id: &str,
        comment: &Comment,
    ) -> Result<(), PersistenceError> {
        mutations::append_comment(&self.conn, issue_id, comment)
    }

    /// Lists issues matching a filter, newest first.
    ///
    /// # Returns
    ///
    /// The requested page and the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_issues(
        &self,
        filter: IssueFilter,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Issue>, u64), PersistenceError> {
        queries::list_issues(&self.conn, filter, page, limit)
    }

    /// Inserts a user record, returning its id.
    ///
    /// # Errors
    ///
    /// Returns an error on failure, including duplicate emails.
    pub fn insert_user(&self, name: &str, email: &str) -> Result<i64, PersistenceError> {
        mutations::insert_user(&self.conn, name, email)
    }

    /// Resolves a user id to its `{name, email}` projection.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_ref(&self, user_id: i64) -> Result<Option<UserRef>, PersistenceError> {
        queries::get_user_ref(&self.conn, user_id)
    }

    /// Counts issues currently in the given status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_by_status(&self, status: IssueStatus) -> Result<u64, PersistenceError> {
        stats::count_by_status(&self.conn, status)
    }

    /// Counts resolved issues with `resolved_at` at or after `since`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_resolved_since(&self, since: DateTime<Utc>) -> Result<u64, PersistenceError> {
        stats::count_resolved_since(&self.conn, since)
    }

    /// Mean resolution time in hours, `None` when nothing is resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn avg_resolution_hours(&self) -> Result<Option<f64>, PersistenceError> {
        stats::avg_resolution_hours(&self.conn)
    }

    /// Counts issues currently in the given category.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_by_category(&self, category: Category) -> Result<u64, PersistenceError> {
        stats::count_by_category(&self.conn, category)
    }

    /// Counts issues submitted in `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_submitted_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, PersistenceError> {
        stats::count_submitted_between(&self.conn, start, end)
    }

    /// Counts resolved issues with `resolved_at` in `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_resolved_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, PersistenceError> {
        stats::count_resolved_between(&self.conn, start, end)
    }

    /// Mean resolution time in days for one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn avg_resolution_days_for_category(
        &self,
        category: Category,
    ) -> Result<Option<f64>, PersistenceError> {
        stats::avg_resolution_days_for_category(&self.conn, category)
    }

    /// Counts all issues in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_issues(&self) -> Result<u64, PersistenceError> {
        stats::count_issues(&self.conn)
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Aggregate queries backing the dashboard statistics.
//!
//! Each function issues one independent query; callers compose them into
//! a response without any cross-query transaction. Under concurrent
//! writes the counts in one response may reflect slightly different
//! instants, which the dashboards tolerate.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};

use civic_issues_domain::{Category, IssueStatus};

use crate::error::PersistenceError;
use crate::rows::to_millis;

/// Milliseconds per hour, for resolution-time averages.
const MILLIS_PER_HOUR: f64 = 1000.0 * 60.0 * 60.0;

/// Milliseconds per day, for per-category resolution averages.
const MILLIS_PER_DAY: f64 = MILLIS_PER_HOUR * 24.0;

fn count_query(
    conn: &Connection,
    sql: &str,
    bound: impl rusqlite::Params,
) -> Result<u64, PersistenceError> {
    let count: i64 = conn.query_row(sql, bound, |row| row.get(0))?;
    Ok(u64::try_from(count).unwrap_or(0))
}

/// Counts issues currently in the given status.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_by_status(conn: &Connection, status: IssueStatus) -> Result<u64, PersistenceError> {
    count_query(
        conn,
        "SELECT COUNT(*) FROM issues WHERE status = ?1",
        params![status.as_str()],
    )
}

/// Counts resolved issues whose `resolved_at` is at or after `since`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_resolved_since(
    conn: &Connection,
    since: DateTime<Utc>,
) -> Result<u64, PersistenceError> {
    count_query(
        conn,
        "SELECT COUNT(*) FROM issues WHERE status = 'resolved' AND resolved_at >= ?1",
        params![to_millis(since)],
    )
}

/// Mean hours between submission and resolution over all issues with
/// both timestamps set.
///
/// # Returns
///
/// `None` when no resolved issues exist (avoids a meaningless average).
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn avg_resolution_hours(conn: &Connection) -> Result<Option<f64>, PersistenceError> {
    let avg: Option<f64> = conn.query_row(
        "SELECT AVG((resolved_at - submitted_at) / ?1)
         FROM issues
         WHERE status = 'resolved' AND resolved_at IS NOT NULL",
        params![MILLIS_PER_HOUR],
        |row| row.get(0),
    )?;
    Ok(avg)
}

/// Counts issues currently in the given category.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_by_category(conn: &Connection, category: Category) -> Result<u64, PersistenceError> {
    count_query(
        conn,
        "SELECT COUNT(*) FROM issues WHERE category = ?1",
        params![category.as_str()],
    )
}

/// Counts issues submitted in the half-open window `[start, end)`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_submitted_between(
    conn: &Connection,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<u64, PersistenceError> {
    count_query(
        conn,
        "SELECT COUNT(*) FROM issues WHERE submitted_at >= ?1 AND submitted_at < ?2",
        params![to_millis(start), to_millis(end)],
    )
}

/// Counts resolved issues whose `resolved_at` falls in `[start, end)`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_resolved_between(
    conn: &Connection,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<u64, PersistenceError> {
    count_query(
        conn,
        "SELECT COUNT(*) FROM issues
         WHERE status = 'resolved' AND resolved_at >= ?1 AND resolved_at < ?2",
        params![to_millis(start), to_millis(end)],
    )
}

/// Mean days between submission and resolution for one category.
///
/// # Returns
///
/// `None` when the category has no resolved issues; the analytics layer
/// renders that as `0` (deliberately different from the quick-stats
/// hours average, which stays `null`).
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn avg_resolution_days_for_category(
    conn: &Connection,
    category: Category,
) -> Result<Option<f64>, PersistenceError> {
    let avg: Option<f64> = conn.query_row(
        "SELECT AVG((resolved_at - submitted_at) / ?1)
         FROM issues
         WHERE status = 'resolved' AND resolved_at IS NOT NULL AND category = ?2",
        params![MILLIS_PER_DAY, category.as_str()],
        |row| row.get(0),
    )?;
    Ok(avg)
}

/// Counts all issues in the store.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_issues(conn: &Connection) -> Result<u64, PersistenceError> {
    count_query(conn, "SELECT COUNT(*) FROM issues", params![])
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::Connection;
use tracing::info;

use crate::error::PersistenceError;

/// Initializes the database schema.
///
/// Timestamps are stored as unix-epoch milliseconds so range filters and
/// resolution-time averages run directly in SQL. The `issue_id` unique
/// constraint is the backstop for the bounded identifier retry loop.
///
/// # Arguments
///
/// * `conn` - The database connection to initialize
///
/// # Errors
///
/// Returns an error if schema creation fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), PersistenceError> {
    info!("Initializing database schema");

    // Enable foreign key enforcement
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE COLLATE NOCASE
        );

        CREATE TABLE IF NOT EXISTS issues (
            issue_pk INTEGER PRIMARY KEY AUTOINCREMENT,
            issue_id TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL CHECK(category IN (
                'road', 'infrastructure', 'public-spaces',
                'public-safety', 'utilities', 'other'
            )),
            status TEXT NOT NULL DEFAULT 'pending' CHECK(status IN (
                'pending', 'in-progress', 'resolved', 'rejected'
            )),
            priority TEXT NOT NULL DEFAULT 'medium' CHECK(priority IN (
                'low', 'medium', 'high', 'urgent'
            )),
            location TEXT NOT NULL DEFAULT '',
            lat REAL,
            lng REAL,
            images_json TEXT NOT NULL DEFAULT '[]',
            submitted_by INTEGER,
            assigned_to INTEGER,
            submitted_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL,
            resolved_at INTEGER,
            FOREIGN KEY(submitted_by) REFERENCES users(user_id),
            FOREIGN KEY(assigned_to) REFERENCES users(user_id)
        );

        CREATE INDEX IF NOT EXISTS idx_issues_status
            ON issues(status);

        CREATE INDEX IF NOT EXISTS idx_issues_category
            ON issues(category);

        CREATE INDEX IF NOT EXISTS idx_issues_submitted_at
            ON issues(submitted_at DESC);

        CREATE INDEX IF NOT EXISTS idx_issues_resolved_at
            ON issues(resolved_at);

        CREATE TABLE IF NOT EXISTS comments (
            comment_id INTEGER PRIMARY KEY AUTOINCREMENT,
            issue_pk INTEGER NOT NULL,
            text TEXT NOT NULL,
            author INTEGER,
            created_at INTEGER NOT NULL,
            FOREIGN KEY(issue_pk) REFERENCES issues(issue_pk),
            FOREIGN KEY(author) REFERENCES users(user_id)
        );

        CREATE INDEX IF NOT EXISTS idx_comments_issue
            ON comments(issue_pk, comment_id);
        ",
    )?;

    Ok(())
}

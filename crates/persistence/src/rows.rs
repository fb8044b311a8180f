// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row-to-domain conversion for issue rows.

use chrono::{DateTime, Utc};
use rusqlite::Row;

use civic_issues_domain::{Category, Coordinates, Issue, IssueId, IssueStatus, Priority};

use crate::error::PersistenceError;

/// Column list shared by every issue SELECT, in `IssueRow` order.
pub const ISSUE_COLUMNS: &str = "issue_pk, issue_id, title, description, category, status, \
     priority, location, lat, lng, images_json, submitted_by, assigned_to, \
     submitted_at, updated_at, resolved_at";

/// Raw issue row as read from `SQLite`, before enum and timestamp
/// decoding.
#[derive(Debug, Clone)]
pub struct IssueRow {
    pub issue_pk: i64,
    pub issue_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub priority: String,
    pub location: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub images_json: String,
    pub submitted_by: Option<i64>,
    pub assigned_to: Option<i64>,
    pub submitted_at: i64,
    pub updated_at: i64,
    pub resolved_at: Option<i64>,
}

impl IssueRow {
    /// Reads a row whose SELECT used [`ISSUE_COLUMNS`].
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            issue_pk: row.get(0)?,
            issue_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            category: row.get(4)?,
            status: row.get(5)?,
            priority: row.get(6)?,
            location: row.get(7)?,
            lat: row.get(8)?,
            lng: row.get(9)?,
            images_json: row.get(10)?,
            submitted_by: row.get(11)?,
            assigned_to: row.get(12)?,
            submitted_at: row.get(13)?,
            updated_at: row.get(14)?,
            resolved_at: row.get(15)?,
        })
    }

    /// Decodes this row into the domain entity.
    ///
    /// Comments are loaded separately and start empty here.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRow` if a stored enum value or timestamp is not
    /// decodable; the CHECK constraints make this unreachable for rows
    /// written by this crate.
    pub fn into_issue(self) -> Result<Issue, PersistenceError> {
        let category: Category = self
            .category
            .parse()
            .map_err(|_| PersistenceError::CorruptRow(format!("category '{}'", self.category)))?;
        let status: IssueStatus = self
            .status
            .parse()
            .map_err(|_| PersistenceError::CorruptRow(format!("status '{}'", self.status)))?;
        let priority: Priority = self
            .priority
            .parse()
            .map_err(|_| PersistenceError::CorruptRow(format!("priority '{}'", self.priority)))?;
        let images: Vec<String> = serde_json::from_str(&self.images_json)?;

        let coordinates: Option<Coordinates> = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        };

        Ok(Issue {
            issue_id: IssueId::new(self.issue_id),
            title: self.title,
            description: self.description,
            category,
            status,
            priority,
            location: self.location,
            coordinates,
            images,
            submitted_by: self.submitted_by,
            assigned_to: self.assigned_to,
            submitted_at: from_millis(self.submitted_at)?,
            updated_at: from_millis(self.updated_at)?,
            resolved_at: self.resolved_at.map(from_millis).transpose()?,
            comments: Vec::new(),
        })
    }
}

/// Converts a timestamp to its stored millisecond representation.
#[must_use]
pub fn to_millis(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_millis()
}

/// Decodes a stored millisecond timestamp.
///
/// # Errors
///
/// Returns `CorruptRow` if the value is outside the representable range.
pub fn from_millis(millis: i64) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| PersistenceError::CorruptRow(format!("timestamp out of range: {millis}")))
}

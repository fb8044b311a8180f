// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Wire fields are camelCase to match the dashboard contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use civic_issues_domain::{Category, Coordinates, IssueStatus, Priority, UserRef};
use civic_issues_ingest::JsonReport;

/// A raw coordinate pair as submitted by a caller.
///
/// Both members must be present for the pair to be accepted; a partial
/// pair is stored as absent coordinates, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoordinatesInput {
    /// Latitude, if provided.
    pub lat: Option<f64>,
    /// Longitude, if provided.
    pub lng: Option<f64>,
}

/// API request to submit a new issue from a structured form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitIssueRequest {
    /// The issue title.
    pub title: String,
    /// The issue description.
    pub description: String,
    /// The category, one of the six fixed values.
    pub category: String,
    /// Free-text location.
    #[serde(default)]
    pub location: Option<String>,
    /// Raw coordinate pair.
    #[serde(default)]
    pub coordinates: Option<CoordinatesInput>,
    /// Image references.
    #[serde(default)]
    pub images: Option<Vec<String>>,
    /// The submitting user's id, when authenticated.
    #[serde(default)]
    pub submitted_by: Option<i64>,
}

/// API response for a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitIssueResponse {
    /// The generated issue identifier.
    pub issue_id: String,
    /// The stored title.
    pub title: String,
    /// The initial status, always `pending`.
    pub status: IssueStatus,
    /// When the issue was recorded.
    pub submitted_at: DateTime<Utc>,
}

/// API request to ingest an external report.
///
/// Exactly one of `text_report` and `json_report` should be present;
/// when both are, the text report wins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReportRequest {
    /// Line-delimited free-text report.
    #[serde(default)]
    pub text_report: Option<String>,
    /// Structured JSON report.
    #[serde(default)]
    pub json_report: Option<JsonReport>,
    /// Free-text location.
    #[serde(default)]
    pub location: Option<String>,
    /// Raw coordinate pair.
    #[serde(default)]
    pub coordinates: Option<CoordinatesInput>,
    /// Image references.
    #[serde(default)]
    pub images: Option<Vec<String>>,
    /// The submitting user's id, when known.
    #[serde(default)]
    pub submitted_by: Option<i64>,
}

/// API response for a successful ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReportResponse {
    /// The generated issue identifier.
    pub issue_id: String,
}

/// API request to list issues with optional filters.
///
/// Filter fields are free text here and validated against the fixed
/// enumerations before querying.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIssuesRequest {
    /// Status filter.
    #[serde(default)]
    pub status: Option<String>,
    /// Category filter.
    #[serde(default)]
    pub category: Option<String>,
    /// Priority filter.
    #[serde(default)]
    pub priority: Option<String>,
    /// Assignee filter.
    #[serde(default)]
    pub assigned_to: Option<i64>,
    /// 1-indexed page number; defaults to 1.
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size; defaults to 10.
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Pagination envelope for list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// The requested page.
    pub current_page: u32,
    /// `ceil(total / limit)`.
    pub total_pages: u64,
    /// Total matches across all pages.
    pub total_issues: u64,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_prev_page: bool,
}

/// A comment with its author resolved to a minimal projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInfo {
    /// The comment text.
    pub text: String,
    /// The author's `{name, email}` projection, when resolvable.
    pub author: Option<UserRef>,
    /// When the comment was appended.
    pub created_at: DateTime<Utc>,
}

/// A full issue view with cross-references resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueInfo {
    /// The issue identifier.
    pub issue_id: String,
    /// The issue title.
    pub title: String,
    /// The issue description.
    pub description: String,
    /// The category.
    pub category: Category,
    /// The current status.
    pub status: IssueStatus,
    /// The current priority.
    pub priority: Priority,
    /// Free-text location.
    pub location: String,
    /// Normalized coordinates, if any.
    pub coordinates: Option<Coordinates>,
    /// Image references.
    pub images: Vec<String>,
    /// The submitter's `{name, email}` projection, when resolvable.
    pub submitted_by: Option<UserRef>,
    /// The assignee's `{name, email}` projection, when resolvable.
    pub assigned_to: Option<UserRef>,
    /// When the issue was recorded.
    pub submitted_at: DateTime<Utc>,
    /// When the issue last changed.
    pub updated_at: DateTime<Utc>,
    /// When the issue was last marked resolved.
    pub resolved_at: Option<DateTime<Utc>>,
    /// The comment sequence, oldest first.
    pub comments: Vec<CommentInfo>,
}

/// API response for a list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIssuesResponse {
    /// The requested page, newest first.
    pub issues: Vec<IssueInfo>,
    /// The pagination envelope.
    pub pagination: Pagination,
}

/// API request to partially update an issue.
///
/// Only the fields present are applied; omitted fields are untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueRequest {
    /// New status, if changing.
    #[serde(default)]
    pub status: Option<String>,
    /// New priority, if changing.
    #[serde(default)]
    pub priority: Option<String>,
    /// New assignee, if changing.
    #[serde(default)]
    pub assigned_to: Option<i64>,
    /// A comment to append, attributed to the acting user.
    #[serde(default)]
    pub comment: Option<String>,
}

/// API request to create a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// The user's display name.
    pub name: String,
    /// The user's email, unique case-insensitively.
    pub email: String,
}

/// API response for a successful user creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    /// The new user's id.
    pub user_id: i64,
}

/// Dashboard quick-stats snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStatsResponse {
    /// Issues currently pending.
    pub pending: u64,
    /// Issues currently in progress.
    pub in_progress: u64,
    /// Issues resolved since the start of the current local day.
    pub resolved_today: u64,
    /// Mean hours from submission to resolution; `null` when nothing
    /// has been resolved.
    pub avg_resolution_hours: Option<f64>,
}

/// One entry of the category distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category.
    pub category: Category,
    /// Issues currently in that category.
    pub count: u64,
}

/// One entry of the seven-month trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTrendEntry {
    /// Short month label, e.g. `Jan`.
    pub month: String,
    /// Issues submitted in that calendar month.
    pub reported: u64,
    /// Issues resolved in that calendar month.
    pub resolved: u64,
}

/// One entry of the per-category resolution-time breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResolution {
    /// The category.
    pub category: Category,
    /// Mean days from submission to resolution, rounded to one decimal
    /// place; `0` when the category has no resolved issues.
    pub avg_days: f64,
}

/// Aggregate totals for the analytics view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsTotals {
    /// All issues in the store.
    pub total_issues: u64,
    /// Issues currently resolved.
    pub resolved_total: u64,
    /// `round(100 * resolvedTotal / totalIssues)`; `0` when empty.
    pub resolution_rate: u64,
}

/// Dashboard analytics response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    /// Six entries, one per category, zero-filled, in enumeration order.
    pub category_distribution: Vec<CategoryCount>,
    /// Seven entries, oldest month first.
    pub monthly_trend: Vec<MonthlyTrendEntry>,
    /// Six entries, one per category, zero-filled, in enumeration order.
    pub resolution_by_category: Vec<CategoryResolution>,
    /// Aggregate totals.
    pub totals: AnalyticsTotals,
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the civic-issues reporting platform.
//!
//! Handlers in this crate are transport-agnostic: they take a
//! persistence handle and typed requests, and return typed responses or
//! an [`ApiError`]. The HTTP server wraps them; tests call them
//! directly.

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

mod error;
mod handlers;
mod issue_id;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use handlers::{
    analytics, create_user, get_issue, ingest_report, list_issues, quick_stats, submit_issue,
    update_issue,
};
pub use issue_id::{ISSUE_ID_PREFIX, SUFFIX_LENGTH, generate_issue_id};
pub use request_response::{
    AnalyticsResponse, AnalyticsTotals, CategoryCount, CategoryResolution, CommentInfo,
    CoordinatesInput, CreateUserRequest, CreateUserResponse, IngestReportRequest,
    IngestReportResponse, IssueInfo, ListIssuesRequest, ListIssuesResponse, MonthlyTrendEntry,
    Pagination, QuickStatsResponse, SubmitIssueRequest, SubmitIssueResponse, UpdateIssueRequest,
};

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for issue submission, ingestion, lifecycle
//! updates, and dashboard aggregates.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use civic_issues_domain::{
    Category, Issue, IssueDraft, IssueId, IssuePatch, IssueStatus, MonthWindow, Priority,
    normalize_coordinates, recent_month_windows, start_of_local_day, validate_submission,
};
use civic_issues_ingest::{ReportDraft, parse_json_report, parse_text_report};
use civic_issues_persistence::{IssueFilter, PersistenceError, SqlitePersistence};

use crate::error::ApiError;
use crate::issue_id::generate_issue_id;
use crate::request_response::{
    AnalyticsResponse, AnalyticsTotals, CategoryCount, CategoryResolution, CommentInfo,
    CreateUserRequest, CreateUserResponse, IngestReportRequest, IngestReportResponse, IssueInfo,
    ListIssuesRequest, ListIssuesResponse, MonthlyTrendEntry, Pagination, QuickStatsResponse,
    SubmitIssueRequest, SubmitIssueResponse, UpdateIssueRequest,
};

/// Retry budget for the identifier generation loop.
const ID_GENERATION_ATTEMPTS: u32 = 10;

/// Default page size for list queries.
const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Number of calendar months covered by the trend series.
const TREND_MONTHS: u32 = 7;

/// Persists a new issue under a freshly generated identifier.
///
/// Candidates are checked against the store before insertion; the UNIQUE
/// constraint on the id column backstops the remaining check-then-insert
/// race, and a constraint hit counts as a collision and burns an attempt.
fn persist_new_issue(
    persistence: &SqlitePersistence,
    draft: IssueDraft,
) -> Result<Issue, ApiError> {
    for _ in 0..ID_GENERATION_ATTEMPTS {
        let now: DateTime<Utc> = Utc::now();
        let candidate: String = generate_issue_id(now);
        if persistence.issue_id_exists(&candidate)? {
            warn!(issue_id = %candidate, "Generated issue id already exists, retrying");
            continue;
        }

        let issue: Issue = Issue::new(IssueId::new(candidate), draft.clone(), now);
        match persistence.insert_issue(&issue) {
            Ok(_) => {
                info!(issue_id = %issue.issue_id, category = %issue.category, "Issue created");
                return Ok(issue);
            }
            Err(PersistenceError::DuplicateIssueId(issue_id)) => {
                warn!(issue_id = %issue_id, "Issue id collided on insert, retrying");
            }
            Err(other) => return Err(other.into()),
        }
    }

    Err(ApiError::IdGenerationExhausted {
        attempts: ID_GENERATION_ATTEMPTS,
    })
}

/// Builds a full draft from validated core fields and the optional
/// attachment fields shared by both submission shapes.
fn build_draft(
    core: ReportDraft,
    location: Option<&String>,
    coordinates: Option<(Option<f64>, Option<f64>)>,
    images: Option<&Vec<String>>,
    submitted_by: Option<i64>,
) -> IssueDraft {
    let (lat, lng) = coordinates.unwrap_or((None, None));
    IssueDraft {
        title: core.title,
        description: core.description,
        category: core.category,
        priority: core.priority,
        location: location.cloned().unwrap_or_default(),
        coordinates: normalize_coordinates(lat, lng),
        images: images.cloned().unwrap_or_default(),
        submitted_by,
    }
}

/// Submits a new issue from a structured form.
///
/// # Errors
///
/// Returns `Validation` for missing or malformed required fields,
/// `IdGenerationExhausted` when no unique identifier could be found,
/// and `Internal` for persistence failures.
pub fn submit_issue(
    persistence: &SqlitePersistence,
    request: &SubmitIssueRequest,
) -> Result<SubmitIssueResponse, ApiError> {
    let (title, description, category) =
        validate_submission(&request.title, &request.description, &request.category)?;

    let draft: IssueDraft = build_draft(
        ReportDraft {
            title,
            description,
            category,
            priority: Priority::default(),
        },
        request.location.as_ref(),
        request.coordinates.map(|pair| (pair.lat, pair.lng)),
        request.images.as_ref(),
        request.submitted_by,
    );

    let issue: Issue = persist_new_issue(persistence, draft)?;
    Ok(SubmitIssueResponse {
        issue_id: issue.issue_id.value().to_string(),
        title: issue.title,
        status: issue.status,
        submitted_at: issue.submitted_at,
    })
}

/// Ingests an external report, classifying it into a draft first.
///
/// The text shape wins when both shapes are present.
///
/// # Errors
///
/// Returns `MalformedReport` when neither shape is present or the parsed
/// draft fails required-field validation.
pub fn ingest_report(
    persistence: &SqlitePersistence,
    request: &IngestReportRequest,
) -> Result<IngestReportResponse, ApiError> {
    let parsed: ReportDraft = if let Some(text) = &request.text_report {
        parse_text_report(text)
    } else if let Some(json) = &request.json_report {
        parse_json_report(json)
    } else {
        return Err(ApiError::MalformedReport {
            message: String::from("report has neither a text nor a JSON shape"),
        });
    };

    let (title, description, _) =
        validate_submission(&parsed.title, &parsed.description, parsed.category.as_str()).map_err(
            |err| ApiError::MalformedReport {
                message: err.to_string(),
            },
        )?;

    let draft: IssueDraft = build_draft(
        ReportDraft {
            title,
            description,
            category: parsed.category,
            priority: parsed.priority,
        },
        request.location.as_ref(),
        request.coordinates.map(|pair| (pair.lat, pair.lng)),
        request.images.as_ref(),
        request.submitted_by,
    );

    let issue: Issue = persist_new_issue(persistence, draft)?;
    Ok(IngestReportResponse {
        issue_id: issue.issue_id.value().to_string(),
    })
}

/// Resolves an issue's weak user references into a full view.
fn issue_to_info(persistence: &SqlitePersistence, issue: Issue) -> Result<IssueInfo, ApiError> {
    let submitted_by = match issue.submitted_by {
        Some(user_id) => persistence.get_user_ref(user_id)?,
        None => None,
    };
    let assigned_to = match issue.assigned_to {
        Some(user_id) => persistence.get_user_ref(user_id)?,
        None => None,
    };

    let mut comments: Vec<CommentInfo> = Vec::with_capacity(issue.comments.len());
    for comment in issue.comments {
        let author = match comment.author {
            Some(user_id) => persistence.get_user_ref(user_id)?,
            None => None,
        };
        comments.push(CommentInfo {
            text: comment.text,
            author,
            created_at: comment.created_at,
        });
    }

    Ok(IssueInfo {
        issue_id: issue.issue_id.value().to_string(),
        title: issue.title,
        description: issue.description,
        category: issue.category,
        status: issue.status,
        priority: issue.priority,
        location: issue.location,
        coordinates: issue.coordinates,
        images: issue.images,
        submitted_by,
        assigned_to,
        submitted_at: issue.submitted_at,
        updated_at: issue.updated_at,
        resolved_at: issue.resolved_at,
        comments,
    })
}

/// Parses the free-text filter fields of a list request.
fn parse_filter(request: &ListIssuesRequest) -> Result<IssueFilter, ApiError> {
    let status: Option<IssueStatus> = request
        .status
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(ApiError::from)?;
    let category: Option<Category> = request
        .category
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(ApiError::from)?;
    let priority: Option<Priority> = request
        .priority
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(ApiError::from)?;

    Ok(IssueFilter {
        status,
        category,
        priority,
        assigned_to: request.assigned_to,
    })
}

/// Lists issues newest first with conjunctive filters and pagination.
///
/// # Errors
///
/// Returns `Validation` for filter values outside the fixed
/// enumerations and `Internal` for persistence failures.
pub fn list_issues(
    persistence: &SqlitePersistence,
    request: &ListIssuesRequest,
) -> Result<ListIssuesResponse, ApiError> {
    let filter: IssueFilter = parse_filter(request)?;
    let page: u32 = request.page.unwrap_or(1).max(1);
    let limit: u32 = request.limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1);

    let (issues, total) = persistence.list_issues(filter, page, limit)?;

    let mut infos: Vec<IssueInfo> = Vec::with_capacity(issues.len());
    for issue in issues {
        infos.push(issue_to_info(persistence, issue)?);
    }

    let total_pages: u64 = total.div_ceil(u64::from(limit));
    Ok(ListIssuesResponse {
        issues: infos,
        pagination: Pagination {
            current_page: page,
            total_pages,
            total_issues: total,
            has_next_page: u64::from(page) < total_pages,
            has_prev_page: page > 1,
        },
    })
}

/// Retrieves a single issue with cross-references resolved.
///
/// # Errors
///
/// Returns `NotFound` if the identifier does not resolve.
pub fn get_issue(persistence: &SqlitePersistence, issue_id: &str) -> Result<IssueInfo, ApiError> {
    let issue: Issue = persistence.get_issue(issue_id)?;
    issue_to_info(persistence, issue)
}

/// Applies a partial update to an issue.
///
/// Setting status to `resolved` stamps `resolvedAt` with the current
/// time, even when the issue is already resolved. A comment is appended
/// only when both the comment text and an acting identity are present;
/// an absent identity skips the append silently.
///
/// # Errors
///
/// Returns `NotFound` if the identifier does not resolve and
/// `Validation` for status or priority values outside the fixed
/// enumerations.
pub fn update_issue(
    persistence: &SqlitePersistence,
    issue_id: &str,
    request: &UpdateIssueRequest,
    acting_user: Option<i64>,
) -> Result<IssueInfo, ApiError> {
    let patch = IssuePatch {
        status: request
            .status
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(ApiError::from)?,
        priority: request
            .priority
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(ApiError::from)?,
        assigned_to: request.assigned_to,
    };

    let now: DateTime<Utc> = Utc::now();
    let mut issue: Issue = persistence.get_issue(issue_id)?;
    issue.apply_patch(&patch, now);
    persistence.update_issue(&issue)?;

    if let Some(comment) = &request.comment
        && let Some(author) = acting_user
    {
        issue.append_comment(comment.clone(), Some(author), now);
        if let Some(appended) = issue.comments.last() {
            persistence.append_comment(issue_id, appended)?;
        }
    }

    info!(issue_id = %issue.issue_id, status = %issue.status, "Issue updated");
    issue_to_info(persistence, issue)
}

/// Creates a user record.
///
/// # Errors
///
/// Returns `Validation` when name or email is empty and `Internal` for
/// persistence failures, including duplicate emails.
pub fn create_user(
    persistence: &SqlitePersistence,
    request: &CreateUserRequest,
) -> Result<CreateUserResponse, ApiError> {
    let name: &str = request.name.trim();
    let email: &str = request.email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(ApiError::Validation {
            message: String::from("name and email are required"),
        });
    }

    let user_id: i64 = persistence.insert_user(name, email)?;
    Ok(CreateUserResponse { user_id })
}

/// Computes the dashboard quick-stats snapshot.
///
/// # Errors
///
/// Returns `Internal` if any underlying count fails; no partial result
/// is returned.
pub fn quick_stats(persistence: &SqlitePersistence) -> Result<QuickStatsResponse, ApiError> {
    let now: DateTime<Utc> = Utc::now();
    Ok(QuickStatsResponse {
        pending: persistence.count_by_status(IssueStatus::Pending)?,
        in_progress: persistence.count_by_status(IssueStatus::InProgress)?,
        resolved_today: persistence.count_resolved_since(start_of_local_day(now))?,
        avg_resolution_hours: persistence.avg_resolution_hours()?,
    })
}

/// Rounds to one decimal place.
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Computes the dashboard analytics aggregate.
///
/// Category series are zero-filled over all six categories in
/// enumeration order; the trend covers the current calendar month and
/// the six before it, oldest first, on local-time month boundaries.
///
/// # Errors
///
/// Returns `Internal` if any underlying aggregate fails; no partial
/// result is returned.
pub fn analytics(persistence: &SqlitePersistence) -> Result<AnalyticsResponse, ApiError> {
    let now: DateTime<Utc> = Utc::now();

    let mut category_distribution: Vec<CategoryCount> = Vec::with_capacity(Category::ALL.len());
    let mut resolution_by_category: Vec<CategoryResolution> =
        Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        category_distribution.push(CategoryCount {
            category,
            count: persistence.count_by_category(category)?,
        });
        let avg_days: f64 = persistence
            .avg_resolution_days_for_category(category)?
            .map_or(0.0, round_tenths);
        resolution_by_category.push(CategoryResolution { category, avg_days });
    }

    let windows: Vec<MonthWindow> = recent_month_windows(now, TREND_MONTHS);
    let mut monthly_trend: Vec<MonthlyTrendEntry> = Vec::with_capacity(windows.len());
    for window in windows {
        monthly_trend.push(MonthlyTrendEntry {
            month: window.label,
            reported: persistence.count_submitted_between(window.start, window.end)?,
            resolved: persistence.count_resolved_between(window.start, window.end)?,
        });
    }

    let total_issues: u64 = persistence.count_issues()?;
    let resolved_total: u64 = persistence.count_by_status(IssueStatus::Resolved)?;
    // Half-up integer rounding of 100 * resolved / total
    let resolution_rate: u64 = if total_issues == 0 {
        0
    } else {
        (200 * resolved_total + total_issues) / (2 * total_issues)
    };

    Ok(AnalyticsResponse {
        category_distribution,
        monthly_trend,
        resolution_by_category,
        totals: AnalyticsTotals {
            total_issues,
            resolved_total,
            resolution_rate,
        },
    })
}

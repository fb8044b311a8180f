// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use civic_issues_api::{
    AnalyticsResponse, ApiError, CreateUserRequest, CreateUserResponse, IngestReportRequest,
    IngestReportResponse, IssueInfo, ListIssuesRequest, ListIssuesResponse, QuickStatsResponse,
    SubmitIssueRequest, SubmitIssueResponse, UpdateIssueRequest, analytics, create_user, get_issue,
    ingest_report, list_issues, quick_stats, submit_issue, update_issue,
};
use civic_issues_persistence::SqlitePersistence;

/// Civic Issues Server - HTTP server for the civic-issue reporting platform
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for issues, users, and comments.
    persistence: Arc<Mutex<SqlitePersistence>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::Validation { .. } | ApiError::MalformedReport { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::IdGenerationExhausted { .. } | ApiError::Internal { .. } => {
                error!(error = %err, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Reads the acting user id from the `x-user-id` header, if present.
///
/// The header is a stand-in for the authentication layer; an absent or
/// unparseable value means no acting identity is available.
fn acting_user(headers: &HeaderMap) -> Option<i64> {
    headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<i64>().ok())
}

/// Handler for POST `/issues`.
async fn handle_submit_issue(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SubmitIssueRequest>,
) -> Result<(StatusCode, Json<SubmitIssueResponse>), HttpError> {
    info!(category = %req.category, "Handling submit_issue request");

    let persistence = app_state.persistence.lock().await;
    let response: SubmitIssueResponse = submit_issue(&persistence, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/issues/ingest`.
async fn handle_ingest_report(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<IngestReportRequest>,
) -> Result<(StatusCode, Json<IngestReportResponse>), HttpError> {
    info!(
        has_text = req.text_report.is_some(),
        has_json = req.json_report.is_some(),
        "Handling ingest_report request"
    );

    let persistence = app_state.persistence.lock().await;
    let response: IngestReportResponse = ingest_report(&persistence, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/issues`.
async fn handle_list_issues(
    AxumState(app_state): AxumState<AppState>,
    Query(req): Query<ListIssuesRequest>,
) -> Result<Json<ListIssuesResponse>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let response: ListIssuesResponse = list_issues(&persistence, &req)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/issues/{issue_id}`.
async fn handle_get_issue(
    AxumState(app_state): AxumState<AppState>,
    Path(issue_id): Path<String>,
) -> Result<Json<IssueInfo>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let response: IssueInfo = get_issue(&persistence, &issue_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/issues/{issue_id}/status`.
async fn handle_update_issue(
    AxumState(app_state): AxumState<AppState>,
    Path(issue_id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<UpdateIssueRequest>,
) -> Result<Json<IssueInfo>, HttpError> {
    info!(issue_id = %issue_id, "Handling update_issue request");

    let actor: Option<i64> = acting_user(&headers);
    let persistence = app_state.persistence.lock().await;
    let response: IssueInfo = update_issue(&persistence, &issue_id, &req, actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/users`.
async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), HttpError> {
    info!(email = %req.email, "Handling create_user request");

    let persistence = app_state.persistence.lock().await;
    let response: CreateUserResponse = create_user(&persistence, &req)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/stats/quick`.
async fn handle_quick_stats(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<QuickStatsResponse>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let response: QuickStatsResponse = quick_stats(&persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/stats/analytics`.
async fn handle_analytics(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<AnalyticsResponse>, HttpError> {
    let persistence = app_state.persistence.lock().await;
    let response: AnalyticsResponse = analytics(&persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/issues", post(handle_submit_issue))
        .route("/issues", get(handle_list_issues))
        .route("/issues/ingest", post(handle_ingest_report))
        .route("/issues/{issue_id}", get(handle_get_issue))
        .route("/issues/{issue_id}/status", put(handle_update_issue))
        .route("/users", post(handle_create_user))
        .route("/stats/quick", get(handle_quick_stats))
        .route("/stats/analytics", get(handle_analytics))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Civic Issues Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

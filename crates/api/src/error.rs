// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use civic_issues_domain::DomainError;
use civic_issues_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent
/// the API contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request is missing or carries malformed required input.
    #[error("Validation failed: {message}")]
    Validation {
        /// Why the input was rejected.
        message: String,
    },

    /// An ingestion payload could not be turned into a usable draft.
    #[error("Malformed report: {message}")]
    MalformedReport {
        /// Why the report was rejected.
        message: String,
    },

    /// The referenced issue does not exist.
    #[error("Issue '{issue_id}' not found")]
    NotFound {
        /// The identifier that failed to resolve.
        issue_id: String,
    },

    /// Identifier generation failed after the bounded retry budget.
    #[error("Failed to generate a unique issue id after {attempts} attempts")]
    IdGenerationExhausted {
        /// How many candidates were tried.
        attempts: u32,
    },

    /// Catch-all for persistence-layer failures.
    #[error("Internal error: {message}")]
    Internal {
        /// What failed.
        message: String,
    },
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Validation {
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::IssueNotFound(issue_id) => Self::NotFound { issue_id },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The fixed category an issue belongs to.
///
/// The enumeration is closed: any value outside it is rejected at the
/// boundary. `ALL` defines the canonical ordering used by dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Roads, potholes, traffic infrastructure.
    Road,
    /// Bridges, buildings, general infrastructure.
    Infrastructure,
    /// Parks, playgrounds, shared public spaces.
    PublicSpaces,
    /// Crime, hazards, public safety concerns.
    PublicSafety,
    /// Water, electricity, sewage, other utilities.
    Utilities,
    /// Anything that does not fit the other categories.
    #[default]
    Other,
}

impl Category {
    /// All categories in canonical dashboard order.
    pub const ALL: [Self; 6] = [
        Self::Road,
        Self::Infrastructure,
        Self::PublicSpaces,
        Self::PublicSafety,
        Self::Utilities,
        Self::Other,
    ];

    /// Converts this category to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Road => "road",
            Self::Infrastructure => "infrastructure",
            Self::PublicSpaces => "public-spaces",
            Self::PublicSafety => "public-safety",
            Self::Utilities => "utilities",
            Self::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "road" => Ok(Self::Road),
            "infrastructure" => Ok(Self::Infrastructure),
            "public-spaces" => Ok(Self::PublicSpaces),
            "public-safety" => Ok(Self::PublicSafety),
            "utilities" => Ok(Self::Utilities),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The lifecycle status of an issue.
///
/// The status graph is deliberately unconstrained: any status is reachable
/// from any other via an update. The only state-dependent side effect is
/// the `resolved_at` stamp on entry to `Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IssueStatus {
    /// Submitted, awaiting triage.
    #[default]
    Pending,
    /// Assigned and being worked on.
    InProgress,
    /// Fixed. Entering this status stamps `resolved_at`.
    Resolved,
    /// Closed without resolution. Terminal in practice, but not enforced.
    Rejected,
}

impl IssueStatus {
    /// Converts this status to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for IssueStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The priority assigned to an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    /// Minor, can wait.
    Low,
    /// Default priority for submissions.
    #[default]
    Medium,
    /// Needs attention soon.
    High,
    /// Dangerous or severe, immediate attention.
    Urgent,
}

impl Priority {
    /// Converts this priority to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(DomainError::InvalidPriority(s.to_string())),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A human-readable issue identifier, e.g. `CIV-MDQ3K1A2BX9F`.
///
/// Identifiers are immutable after creation and unique across the store
/// for its lifetime. Uniqueness is enforced at insert time, not by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueId(String);

impl IssueId {
    /// Wraps an identifier string.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Category is not a member of the closed enumeration.
    InvalidCategory(String),
    /// Status is not a member of the closed enumeration.
    InvalidStatus(String),
    /// Priority is not a member of the closed enumeration.
    InvalidPriority(String),
    /// Title is empty after trimming.
    EmptyTitle,
    /// Description is empty after trimming.
    EmptyDescription,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCategory(value) => write!(f, "Invalid category: '{value}'"),
            Self::InvalidStatus(value) => write!(f, "Invalid status: '{value}'"),
            Self::InvalidPriority(value) => write!(f, "Invalid priority: '{value}'"),
            Self::EmptyTitle => write!(f, "Title must not be empty"),
            Self::EmptyDescription => write!(f, "Description must not be empty"),
        }
    }
}

impl std::error::Error for DomainError {}

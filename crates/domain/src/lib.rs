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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod issue;
mod time_windows;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use issue::{Comment, Coordinates, Issue, IssueDraft, IssuePatch, UserRef};
pub use time_windows::{MonthWindow, recent_month_windows, start_of_local_day};
pub use types::{Category, IssueId, IssueStatus, Priority};
pub use validation::{normalize_coordinates, validate_submission};

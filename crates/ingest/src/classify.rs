// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Heuristic mapping of free-form report text to the closed enumerations.
//!
//! Both mappers are total over all inputs and never fail. Each is an
//! ordered list of `(needles, result)` rules evaluated first-match-wins
//! against the lowercased input. Order matters: the predicates are not
//! mutually exclusive on arbitrary input.

use civic_issues_domain::{Category, Priority};

/// Ordered category rules. The first rule whose needle list matches wins.
const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["road", "traffic"], Category::Road),
    (&["safety", "crime", "security"], Category::PublicSafety),
    (&["park", "public space", "playground"], Category::PublicSpaces),
    (&["water", "electric", "utility", "sew"], Category::Utilities),
    (&["infra", "bridge", "building"], Category::Infrastructure),
];

/// Ordered severity rules mapping to priorities.
const SEVERITY_RULES: &[(&[&str], Priority)] = &[
    (
        &["urgent", "danger", "critical", "severe", "high"],
        Priority::Urgent,
    ),
    (&["moderate", "medium"], Priority::Medium),
    (&["low", "minor"], Priority::Low),
];

/// Returns the first rule result whose needle list matches `input`.
fn first_match<T: Copy>(input: &str, rules: &[(&[&str], T)], fallback: T) -> T {
    for (needles, result) in rules {
        if needles.iter().any(|needle| input.contains(needle)) {
            return *result;
        }
    }
    fallback
}

/// Maps free-form category text to a [`Category`].
///
/// Absent or empty input maps to `Other`. Matching is case-insensitive
/// substring containment, first rule wins.
#[must_use]
pub fn map_category(input: Option<&str>) -> Category {
    match input {
        None => Category::Other,
        Some(text) => {
            let text: String = text.to_lowercase();
            if text.is_empty() {
                return Category::Other;
            }
            first_match(&text, CATEGORY_RULES, Category::Other)
        }
    }
}

/// Maps free-form severity text to a [`Priority`].
///
/// Absent, empty, and unrecognized input all map to `Medium`.
#[must_use]
pub fn map_severity_to_priority(input: Option<&str>) -> Priority {
    match input {
        None => Priority::Medium,
        Some(text) => {
            let text: String = text.to_lowercase();
            if text.is_empty() {
                return Priority::Medium;
            }
            first_match(&text, SEVERITY_RULES, Priority::Medium)
        }
    }
}

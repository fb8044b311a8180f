// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Boundary validation for issue submissions.

use crate::error::DomainError;
use crate::issue::Coordinates;
use crate::types::Category;

/// Validates the required fields of a submission.
///
/// Trims `title` and `description` and parses `category` against the
/// closed enumeration.
///
/// # Arguments
///
/// * `title` - The raw title
/// * `description` - The raw description
/// * `category` - The raw category string
///
/// # Returns
///
/// The trimmed `(title, description, category)` triple.
///
/// # Errors
///
/// Returns an error if either text field is empty after trimming or the
/// category is not a member of the enumeration.
pub fn validate_submission(
    title: &str,
    description: &str,
    category: &str,
) -> Result<(String, String, Category), DomainError> {
    let title: &str = title.trim();
    if title.is_empty() {
        return Err(DomainError::EmptyTitle);
    }

    let description: &str = description.trim();
    if description.is_empty() {
        return Err(DomainError::EmptyDescription);
    }

    let category: Category = category.parse()?;

    Ok((title.to_string(), description.to_string(), category))
}

/// Normalizes an optional coordinate pair.
///
/// A pair is accepted only when both latitude and longitude are present
/// and finite; otherwise the coordinates are treated as absent.
#[must_use]
pub fn normalize_coordinates(lat: Option<f64>, lng: Option<f64>) -> Option<Coordinates> {
    match (lat, lng) {
        (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
            Some(Coordinates { lat, lng })
        }
        _ => None,
    }
}

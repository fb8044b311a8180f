// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Category, Coordinates, DomainError, normalize_coordinates, validate_submission};

#[test]
fn test_valid_submission_is_trimmed() {
    let (title, description, category) =
        validate_submission("  Pothole  ", " Deep pothole ", "road").unwrap();

    assert_eq!(title, "Pothole");
    assert_eq!(description, "Deep pothole");
    assert_eq!(category, Category::Road);
}

#[test]
fn test_empty_title_is_rejected() {
    let result = validate_submission("", "x", "road");
    assert_eq!(result, Err(DomainError::EmptyTitle));
}

#[test]
fn test_whitespace_title_is_rejected() {
    let result = validate_submission("   ", "x", "road");
    assert_eq!(result, Err(DomainError::EmptyTitle));
}

#[test]
fn test_empty_description_is_rejected() {
    let result = validate_submission("Pothole", "  ", "road");
    assert_eq!(result, Err(DomainError::EmptyDescription));
}

#[test]
fn test_unknown_category_is_rejected() {
    let result = validate_submission("Pothole", "x", "holes");
    assert_eq!(
        result,
        Err(DomainError::InvalidCategory(String::from("holes")))
    );
}

#[test]
fn test_coordinates_require_both_values() {
    assert_eq!(normalize_coordinates(Some(12.5), None), None);
    assert_eq!(normalize_coordinates(None, Some(77.2)), None);
    assert_eq!(normalize_coordinates(None, None), None);
    assert_eq!(
        normalize_coordinates(Some(12.5), Some(77.2)),
        Some(Coordinates {
            lat: 12.5,
            lng: 77.2
        })
    );
}

#[test]
fn test_non_finite_coordinates_are_dropped() {
    assert_eq!(normalize_coordinates(Some(f64::NAN), Some(77.2)), None);
    assert_eq!(normalize_coordinates(Some(12.5), Some(f64::INFINITY)), None);
}

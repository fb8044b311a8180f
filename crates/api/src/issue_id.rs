// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collision-resistant, human-readable issue identifier generation.
//!
//! Identifiers look like `CIV-MB3K1XQ27F4Z`: a fixed prefix, the current
//! time in milliseconds rendered in base36, and four random base36
//! characters. The timestamp portion keeps concurrent candidates apart in
//! time; the random suffix keeps candidates generated within the same
//! millisecond apart from each other.

use chrono::{DateTime, Utc};
use rand::RngExt;

/// Fixed identifier prefix.
pub const ISSUE_ID_PREFIX: &str = "CIV-";

/// Random suffix length in characters.
pub const SUFFIX_LENGTH: usize = 4;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Renders a value in uppercase base36.
fn encode_base36(mut value: u64) -> String {
    if value == 0 {
        return String::from("0");
    }
    let mut digits: Vec<u8> = Vec::new();
    while value > 0 {
        let index: usize = usize::try_from(value % 36).unwrap_or(0);
        digits.push(BASE36[index]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// Generates one candidate issue identifier for the given instant.
///
/// The result matches `CIV-[A-Z0-9]+`. Uniqueness is not guaranteed here;
/// the submission flow checks the candidate against the store and retries
/// on collision.
#[must_use]
pub fn generate_issue_id(now: DateTime<Utc>) -> String {
    let millis: u64 = u64::try_from(now.timestamp_millis()).unwrap_or_default();

    let mut rng = rand::rng();
    let mut suffix: String = String::with_capacity(SUFFIX_LENGTH);
    for _ in 0..SUFFIX_LENGTH {
        let index: usize = rng.random_range(0..BASE36.len());
        suffix.push(char::from(BASE36[index]));
    }

    format!("{ISSUE_ID_PREFIX}{}{suffix}", encode_base36(millis))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::collections::HashSet;

    fn is_base36_upper(c: char) -> bool {
        c.is_ascii_digit() || c.is_ascii_uppercase()
    }

    #[test]
    fn test_encode_base36_known_values() {
        assert_eq!(encode_base36(0), "0");
        assert_eq!(encode_base36(35), "Z");
        assert_eq!(encode_base36(36), "10");
        assert_eq!(encode_base36(1_295), "ZZ");
    }

    #[test]
    fn test_generated_id_format() {
        let id: String = generate_issue_id(Utc::now());
        let body: &str = id.strip_prefix("CIV-").unwrap();
        assert!(!body.is_empty());
        assert!(body.chars().all(is_base36_upper));
        assert!(body.len() > SUFFIX_LENGTH);
    }

    #[test]
    fn test_collision_rate_stays_within_retry_budget() {
        let now = Utc::now();
        let mut seen: HashSet<String> = HashSet::new();
        let mut collisions: u32 = 0;
        for _ in 0..1_000 {
            // Same instant for every candidate: only the random suffix
            // separates them, the worst case for collisions.
            if !seen.insert(generate_issue_id(now)) {
                collisions += 1;
            }
        }
        assert!(collisions < 10, "{collisions} collisions in 1000 draws");
    }
}

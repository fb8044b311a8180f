// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parsers for the two external report shapes.
//!
//! The text shape is a line-delimited report with labeled lines such as
//! `- CATEGORY: Road`. Labels are matched case-insensitively after an
//! optional leading `- ` marker. Once a `DESCRIPTION:` line is seen the
//! parser switches to read-until-end mode: every subsequent non-empty
//! line joins the description, even if it looks like a labeled line.
//!
//! The JSON shape carries the same fields directly and bypasses line
//! parsing.

use serde::{Deserialize, Serialize};

use crate::classify::{map_category, map_severity_to_priority};
use civic_issues_domain::{Category, Priority};

/// Fallback title when a report names no issue type.
const FALLBACK_TITLE: &str = "Civic Issue";

/// A normalized issue draft produced from an external report.
///
/// `title` and `description` are not guaranteed non-empty here; the
/// ingestion flow validates them before accepting the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    /// Report title, from the issue-type fields or the fallback.
    pub title: String,
    /// Report body; falls back to the title when absent.
    pub description: String,
    /// Category mapped by the heuristic classifier.
    pub category: Category,
    /// Priority mapped from the reported severity.
    pub priority: Priority,
}

/// The structured JSON report shape.
///
/// All fields are optional; `category_name` and `priority` are accepted
/// as fallback aliases for `category` and `severity`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JsonReport {
    /// Issue type derived from image analysis. Highest title precedence.
    pub issue_type_image: Option<String>,
    /// Issue type derived from text analysis.
    pub issue_type_text: Option<String>,
    /// Plain title, used when no issue type is present.
    pub title: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Free-form category text.
    pub category: Option<String>,
    /// Fallback alias for `category`.
    pub category_name: Option<String>,
    /// Free-form severity text.
    pub severity: Option<String>,
    /// Fallback alias for `severity`.
    pub priority: Option<String>,
}

/// Extracts the value of a labeled line, if the line carries `label`.
///
/// The leading `- ` marker is optional and the label match is
/// case-insensitive. The value is the text between the label's colon and
/// the next colon, if any, trimmed.
fn label_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let body: &str = line.strip_prefix("- ").unwrap_or(line);
    let prefix: &str = body.get(..label.len())?;
    if !prefix.eq_ignore_ascii_case(label) {
        return None;
    }
    let rest: &str = body.get(label.len()..)?;
    Some(rest.split(':').next().unwrap_or("").trim())
}

/// Parses the line-delimited text report shape.
///
/// Blank lines are skipped everywhere. Missing fields fall back: the
/// title to `Civic Issue`, the description to the title, category and
/// priority through the heuristic mappers.
#[must_use]
pub fn parse_text_report(text: &str) -> ReportDraft {
    let mut category: Option<String> = None;
    let mut issue_type_text: Option<String> = None;
    let mut issue_type_image: Option<String> = None;
    let mut severity: Option<String> = None;
    let mut description: String = String::new();
    let mut in_description: bool = false;

    for raw in text.lines() {
        let line: &str = raw.trim();
        if line.is_empty() {
            continue;
        }
        if in_description {
            if !description.is_empty() {
                description.push(' ');
            }
            description.push_str(line);
            continue;
        }
        if label_value(line, "DESCRIPTION:").is_some() {
            // Content on the DESCRIPTION line itself is discarded; the
            // description is the joined lines that follow.
            in_description = true;
            continue;
        }
        if let Some(value) = label_value(line, "CATEGORY:") {
            category = Some(value.to_string());
        }
        if let Some(value) = label_value(line, "ISSUE TYPE (FROM TEXT):") {
            issue_type_text = Some(value.to_string());
        }
        if let Some(value) = label_value(line, "ISSUE TYPE (FROM IMAGE):") {
            issue_type_image = Some(value.to_string());
        }
        if let Some(value) = label_value(line, "SEVERITY:") {
            severity = Some(value.to_string());
        }
    }

    let title: String = issue_type_image
        .filter(|value| !value.is_empty())
        .or(issue_type_text.filter(|value| !value.is_empty()))
        .unwrap_or_else(|| String::from(FALLBACK_TITLE))
        .trim()
        .to_string();

    let description: String = if description.is_empty() {
        title.clone()
    } else {
        description
    };

    ReportDraft {
        title,
        description,
        category: map_category(category.as_deref()),
        priority: map_severity_to_priority(severity.as_deref()),
    }
}

/// Parses the structured JSON report shape.
///
/// Applies the same title precedence as the text parser
/// (`issue_type_image` > `issue_type_text` > `title` > fallback) directly
/// against the object fields. Empty strings are treated as absent.
#[must_use]
pub fn parse_json_report(report: &JsonReport) -> ReportDraft {
    let non_empty = |value: &Option<String>| -> Option<String> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let title: String =
        non_empty(&report.issue_type_image).map_or_else(
            || {
                non_empty(&report.issue_type_text).map_or_else(
                    || non_empty(&report.title).unwrap_or_else(|| String::from(FALLBACK_TITLE)),
                    |text| text,
                )
            },
            |image| image,
        );

    let description: String = non_empty(&report.description).unwrap_or_else(|| title.clone());

    let category_text: Option<String> =
        non_empty(&report.category).or_else(|| non_empty(&report.category_name));
    let severity_text: Option<String> =
        non_empty(&report.severity).or_else(|| non_empty(&report.priority));

    ReportDraft {
        title,
        description,
        category: map_category(category_text.as_deref()),
        priority: map_severity_to_priority(severity_text.as_deref()),
    }
}

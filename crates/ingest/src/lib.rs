// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ingestion of external civic reports.
//!
//! Reports arrive in two shapes: a line-delimited text format produced by
//! an upstream classifier, and a structured JSON object. Both are
//! normalized into a [`ReportDraft`] via the heuristic category and
//! severity mappers. The mappers are deterministic ordered rule lists,
//! not a trained model; the upstream ML classifier is consumed as an
//! opaque producer of free text.

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

mod classify;
mod report;

#[cfg(test)]
mod tests;

pub use classify::{map_category, map_severity_to_priority};
pub use report::{JsonReport, ReportDraft, parse_json_report, parse_text_report};

//! Rendering batch results for the terminal or for machines.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use archivum::worker::{JobResult, Outcome};
use archivum::{BatchReport, Violation};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    pub checked_at: DateTime<Utc>,
    pub summary: Summary,
    pub files: Vec<FileReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub valid: usize,
    pub invalid: usize,
    pub unreadable: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport<'a> {
    pub source: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    #[serde(skip_serializing_if = "no_violations")]
    pub violations: &'a [Violation],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

impl<'a> FileReport<'a> {
    fn from_result(result: &'a JobResult) -> Self {
        let source = result.source_path.display().to_string();
        match &result.outcome {
            Outcome::Valid(records) => Self {
                source,
                status: "valid",
                records: Some(records.len()),
                violations: &[],
                error: None,
            },
            Outcome::Invalid(err) => Self {
                source,
                status: "invalid",
                records: None,
                violations: err.violations(),
                error: None,
            },
            Outcome::Unreadable(reason) => Self {
                source,
                status: "unreadable",
                records: None,
                violations: &[],
                error: Some(reason),
            },
        }
    }
}

fn no_violations(violations: &&[Violation]) -> bool {
    violations.is_empty()
}

pub fn to_json(report: &BatchReport, checked_at: DateTime<Utc>) -> serde_json::Result<String> {
    let json = JsonReport {
        checked_at,
        summary: summary(report),
        files: report.results.iter().map(FileReport::from_result).collect(),
    };
    serde_json::to_string_pretty(&json)
}

pub fn to_text(report: &BatchReport) -> String {
    let mut output = String::new();

    // Writing to a String cannot fail
    for result in &report.results {
        let source = result.source_path.display();
        match &result.outcome {
            Outcome::Valid(records) => {
                let _ = writeln!(output, "ok       {} ({} record(s))", source, records.len());
            }
            Outcome::Invalid(err) => {
                let _ = writeln!(output, "invalid  {}", source);
                for violation in err.violations() {
                    let _ = writeln!(output, "    - {}", violation);
                }
            }
            Outcome::Unreadable(reason) => {
                let _ = writeln!(output, "error    {}: {}", source, reason);
            }
        }
    }

    let s = summary(report);
    let _ = writeln!(
        output,
        "\n{} valid, {} invalid, {} unreadable",
        s.valid, s.invalid, s.unreadable
    );
    output
}

fn summary(report: &BatchReport) -> Summary {
    Summary {
        valid: report.valid_count(),
        invalid: report.invalid_count(),
        unreadable: report.unreadable_count(),
    }
}

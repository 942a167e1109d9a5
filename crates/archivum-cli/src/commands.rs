//! Subcommand bodies. Each returns `true` when the process should exit 0.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::Utc;
use tracing::debug;

use archivum::worker::{validate_jobs, ValidationJob, STDIN_LABEL};
use archivum::{DirectoryScanner, ProcessingStatus, RecordValidator, ValidationOptions};

use crate::cli::ReportFormat;
use crate::report;

pub fn validate(
    paths: &[PathBuf],
    options: ValidationOptions,
    worker_count: usize,
    format: ReportFormat,
    mut stdin: impl Read,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    if worker_count == 0 {
        bail!("--workers must be at least 1");
    }
    let stdin_count = paths.iter().filter(|p| is_stdin(p)).count();
    if stdin_count > 1 {
        bail!("standard input ('{}') can only be given once", STDIN_LABEL);
    }
    debug!(?options, worker_count, "Validation settings");

    let mut jobs = Vec::new();
    for path in paths {
        if is_stdin(path) {
            let mut content = String::new();
            stdin
                .read_to_string(&mut content)
                .context("failed to read standard input")?;
            jobs.push(ValidationJob::inline(STDIN_LABEL, content));
        } else {
            let scanned = DirectoryScanner::new(path)
                .scan()
                .with_context(|| format!("failed to scan {}", path.display()))?;
            jobs.extend(scanned);
        }
    }

    let validator = RecordValidator::with_options(options);
    let report = validate_jobs(jobs, validator, worker_count);

    match format {
        ReportFormat::Text => write!(out, "{}", report::to_text(&report))?,
        ReportFormat::Json => {
            let json = report::to_json(&report, Utc::now())
                .context("failed to render report")?;
            writeln!(out, "{}", json)?
        }
    }

    Ok(report.is_success())
}

pub fn transition(from: &str, to: &str, out: &mut impl Write) -> anyhow::Result<bool> {
    let from: ProcessingStatus = from.parse()?;
    let to: ProcessingStatus = to.parse()?;

    if from.can_transition_to(to) {
        writeln!(out, "{} -> {}: permitted", from, to)?;
        return Ok(true);
    }

    let allowed: Vec<&str> = from
        .allowed_transitions()
        .iter()
        .map(|s| s.as_str())
        .collect();
    writeln!(
        out,
        "{} -> {}: not permitted (allowed: {})",
        from,
        to,
        allowed.join(", ")
    )?;
    Ok(false)
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new(STDIN_LABEL)
}

use std::path::PathBuf;

use log::warn;
use serde_json::Value;

use crate::record::ArchiveRecord;
use crate::validation::{RecordValidator, ValidationError};

/// Label used for input read from standard input.
pub const STDIN_LABEL: &str = "-";

/// One document to validate.
#[derive(Debug, Clone)]
pub struct ValidationJob {
    pub id: String,
    pub source_path: PathBuf,
    /// Content already in memory; when `None` the file at `source_path` is read.
    pub content: Option<String>,
}

impl ValidationJob {
    /// Creates a job that reads `source_path` when run.
    pub fn new(source_path: PathBuf) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source_path,
            content: None,
        }
    }

    /// Creates a job for content that did not come from a file, such as stdin.
    pub fn inline(label: impl Into<PathBuf>, content: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source_path: label.into(),
            content: Some(content),
        }
    }

    pub fn run(&self, validator: &RecordValidator) -> JobResult {
        let outcome = match self.read() {
            Ok(text) => validate_document(&text, validator),
            Err(reason) => {
                warn!("{}", reason);
                Outcome::Unreadable(reason)
            }
        };

        JobResult {
            job_id: self.id.clone(),
            source_path: self.source_path.clone(),
            outcome,
        }
    }

    fn read(&self) -> Result<String, String> {
        match &self.content {
            Some(content) => Ok(content.clone()),
            None => std::fs::read_to_string(&self.source_path)
                .map_err(|e| format!("Failed to read '{}': {}", self.source_path.display(), e)),
        }
    }
}

/// Result of validating one document.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every record in the document is valid.
    Valid(Vec<ArchiveRecord>),
    /// At least one record failed; paths inside arrays start with `[index]`.
    Invalid(ValidationError),
    /// The document could not be read or is not JSON.
    Unreadable(String),
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid(_))
    }
}

#[derive(Debug, Clone)]
pub struct JobResult {
    pub job_id: String,
    pub source_path: PathBuf,
    pub outcome: Outcome,
}

/// Validates a JSON document holding one record or an array of records.
pub fn validate_document(text: &str, validator: &RecordValidator) -> Outcome {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return Outcome::Unreadable(format!("Invalid JSON: {}", e)),
    };

    match value {
        Value::Array(items) => {
            let mut records = Vec::with_capacity(items.len());
            let mut failures = Vec::new();

            for (i, item) in items.iter().enumerate() {
                match validator.validate(item) {
                    Ok(record) => records.push(record),
                    Err(err) => failures.push((format!("[{}]", i), err)),
                }
            }

            match ValidationError::nested(failures) {
                Some(err) => Outcome::Invalid(err),
                None => Outcome::Valid(records),
            }
        }
        single => match validator.validate(&single) {
            Ok(record) => Outcome::Valid(vec![record]),
            Err(err) => Outcome::Invalid(err),
        },
    }
}

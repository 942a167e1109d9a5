//! Validation failure types.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::record::ProcessingStatus;

/// Path used for violations of the input as a whole.
pub const ROOT_PATH: &str = "$root";

/// JSON value kinds, as named in violation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Boolean,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        };
        f.write_str(name)
    }
}

/// The rule a field broke.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Constraint {
    /// The field is missing.
    Required,
    /// The field holds the wrong kind of JSON value.
    ExpectedType { expected: JsonType },
    /// The string is not a hyphenated UUID.
    InvalidUuid,
    /// The string is shorter than `min` characters.
    TooShort { min: usize },
    /// The string is not one of the allowed values.
    NotOneOf { allowed: &'static [&'static str] },
    /// The number lies outside `[min, max]`.
    OutOfRange { min: f64, max: f64 },
    /// The key is not part of the record shape.
    UnknownField,
    /// Enrichment presence contradicts the processing status.
    StatusCoherence { status: ProcessingStatus },
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Required => write!(f, "is required"),
            Constraint::ExpectedType { expected } => write!(f, "expected {}", expected),
            Constraint::InvalidUuid => write!(f, "not a UUID"),
            Constraint::TooShort { min } => write!(f, "below minimum length {}", min),
            Constraint::NotOneOf { allowed } => {
                write!(f, "not one of allowed values ({})", allowed.join(", "))
            }
            Constraint::OutOfRange { min, max } => {
                write!(f, "out of numeric range [{}, {}]", min, max)
            }
            Constraint::UnknownField => write!(f, "unknown field"),
            Constraint::StatusCoherence { status } => match status {
                ProcessingStatus::Completed => {
                    write!(f, "required when processingStatus is '{}'", status)
                }
                _ => write!(f, "not allowed when processingStatus is '{}'", status),
            },
        }
    }
}

/// One failed field check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    path: String,
    constraint: Constraint,
    /// The rejected value; absent when the field itself was missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
}

impl Violation {
    pub fn new(path: impl Into<String>, constraint: Constraint, value: Option<Value>) -> Self {
        Self {
            path: path.into(),
            constraint,
            value,
        }
    }

    pub fn required(path: impl Into<String>) -> Self {
        Self::new(path, Constraint::Required, None)
    }

    pub fn expected_type(path: impl Into<String>, expected: JsonType, value: &Value) -> Self {
        Self::new(
            path,
            Constraint::ExpectedType { expected },
            Some(value.clone()),
        )
    }

    pub fn out_of_range(path: impl Into<String>, min: f64, max: f64, value: Value) -> Self {
        Self::new(path, Constraint::OutOfRange { min, max }, Some(value))
    }

    /// Dotted field path, with `[n]` for sequence elements.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Re-roots the path below `prefix`, e.g. `title` under `[3]` becomes `[3].title`.
    pub fn nest_under(&mut self, prefix: &str) {
        self.path = if self.path == ROOT_PATH {
            prefix.to_string()
        } else if self.path.starts_with('[') {
            format!("{}{}", prefix, self.path)
        } else {
            format!("{}.{}", prefix, self.path)
        };
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' {}", self.path, self.constraint)?;
        if let Some(value) = &self.value {
            write!(f, " (got {})", value)?;
        }
        Ok(())
    }
}

/// Every violation found in one input. Never empty.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{}", summarize(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

fn summarize(violations: &[Violation]) -> String {
    let listed = violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    format!("{} violation(s): {}", violations.len(), listed)
}

impl ValidationError {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(Violation::path)
    }

    pub fn has_path(&self, path: &str) -> bool {
        self.paths().any(|p| p == path)
    }

    /// Violations reported for `path`.
    pub fn at(&self, path: &str) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.path == path).collect()
    }

    /// Merges several errors, nesting each under its own prefix.
    pub fn nested<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = (String, ValidationError)>,
    {
        let violations: Vec<Violation> = errors
            .into_iter()
            .flat_map(|(prefix, err)| {
                err.violations.into_iter().map(move |mut v| {
                    v.nest_under(&prefix);
                    v
                })
            })
            .collect();

        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }
}

//! Field-by-field validation of untyped archive record input.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::error::{Constraint, JsonType, ValidationError, Violation, ROOT_PATH};
use crate::record::{ArchiveRecord, EnrichmentData, ProcessingStatus, SENTIMENT_RANGE};

/// Top-level keys of the record shape, in declaration order.
pub const RECORD_FIELDS: &[&str] = &[
    "id",
    "title",
    "processingStatus",
    "enrichmentData",
    "uploadedBy",
    "organizationId",
    "isPublic",
];

/// Keys of the `enrichmentData` object.
pub const ENRICHMENT_FIELDS: &[&str] = &["historicalContext", "keyEntities", "sentimentScore"];

const ENRICHMENT: &str = "enrichmentData";
const TITLE_MIN_LEN: usize = 1;
// Canonical hyphenated form: 8-4-4-4-12
const HYPHENATED_UUID_LEN: usize = 36;

/// What to do with keys that are not part of the record shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFields {
    /// Drop them from the typed output.
    #[default]
    Ignore,
    /// Report each one as a violation.
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    pub unknown_fields: UnknownFields,
    /// Require enrichment on completed records and forbid it before enrichment starts.
    pub status_coherence: bool,
}

/// Validator for archive record input.
///
/// Holds only its options, so one instance can be shared freely across
/// threads. Validation never mutates the input and every top-level field is
/// checked even after an earlier one failed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordValidator {
    options: ValidationOptions,
}

/// Validates `input` with default options.
pub fn validate(input: &Value) -> Result<ArchiveRecord, ValidationError> {
    RecordValidator::new().validate(input)
}

impl RecordValidator {
    pub const fn new() -> Self {
        Self {
            options: ValidationOptions {
                unknown_fields: UnknownFields::Ignore,
                status_coherence: false,
            },
        }
    }

    pub const fn with_options(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// Checks `input` against the record shape.
    ///
    /// Returns the typed record with defaults applied, or every violation found.
    pub fn validate(&self, input: &Value) -> Result<ArchiveRecord, ValidationError> {
        let Some(obj) = input.as_object() else {
            return Err(ValidationError::new(vec![Violation::expected_type(
                ROOT_PATH,
                JsonType::Object,
                input,
            )]));
        };

        let mut checker = FieldChecker::new(obj);

        let id = checker.uuid("id");
        let title = checker.title();
        let processing_status = checker.processing_status();
        let enrichment_data = checker.enrichment();
        let uploaded_by = checker.uuid("uploadedBy");
        let organization_id = checker.uuid("organizationId");
        let is_public = checker.is_public();

        if self.options.unknown_fields == UnknownFields::Reject {
            checker.reject_unknown(obj, "", RECORD_FIELDS);
            if let Some(Value::Object(enrichment)) = obj.get(ENRICHMENT) {
                checker.reject_unknown(enrichment, ENRICHMENT, ENRICHMENT_FIELDS);
            }
        }

        if self.options.status_coherence {
            if let (Some(status), Some(enrichment)) = (processing_status, &enrichment_data) {
                checker.status_coherence(status, enrichment.is_some());
            }
        }

        match (
            id,
            title,
            processing_status,
            enrichment_data,
            uploaded_by,
            organization_id,
            is_public,
        ) {
            (
                Some(id),
                Some(title),
                Some(processing_status),
                Some(enrichment_data),
                Some(uploaded_by),
                Some(organization_id),
                Some(is_public),
            ) if checker.is_clean() => Ok(ArchiveRecord {
                id,
                title,
                processing_status,
                enrichment_data,
                uploaded_by,
                organization_id,
                is_public,
            }),
            _ => {
                let err = checker.into_error();
                debug!("Archive record rejected with {} violation(s)", err.len());
                Err(err)
            }
        }
    }
}

/// Collects violations for one input object.
///
/// Each check returns `None` when the field failed, after recording why.
struct FieldChecker<'a> {
    obj: &'a Map<String, Value>,
    violations: Vec<Violation>,
}

impl<'a> FieldChecker<'a> {
    fn new(obj: &'a Map<String, Value>) -> Self {
        Self {
            obj,
            violations: Vec::new(),
        }
    }

    fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    fn into_error(self) -> ValidationError {
        ValidationError::new(self.violations)
    }

    fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Required string field of `obj` at `path`.
    fn string_in<'v>(
        &mut self,
        obj: &'v Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Option<&'v str> {
        match obj.get(key) {
            None => {
                self.push(Violation::required(path));
                None
            }
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                self.push(Violation::expected_type(path, JsonType::String, other));
                None
            }
        }
    }

    fn uuid(&mut self, field: &str) -> Option<Uuid> {
        let raw = self.string_in(self.obj, field, field)?;

        match Uuid::parse_str(raw) {
            Ok(uuid) if raw.len() == HYPHENATED_UUID_LEN => Some(uuid),
            _ => {
                self.push(Violation::new(
                    field,
                    Constraint::InvalidUuid,
                    Some(Value::String(raw.to_string())),
                ));
                None
            }
        }
    }

    fn title(&mut self) -> Option<String> {
        let raw = self.string_in(self.obj, "title", "title")?;

        if raw.chars().count() < TITLE_MIN_LEN {
            self.push(Violation::new(
                "title",
                Constraint::TooShort { min: TITLE_MIN_LEN },
                Some(Value::String(raw.to_string())),
            ));
            return None;
        }
        Some(raw.to_string())
    }

    fn processing_status(&mut self) -> Option<ProcessingStatus> {
        let raw = self.string_in(self.obj, "processingStatus", "processingStatus")?;

        match raw.parse::<ProcessingStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                self.push(Violation::new(
                    "processingStatus",
                    Constraint::NotOneOf {
                        allowed: ProcessingStatus::NAMES,
                    },
                    Some(Value::String(raw.to_string())),
                ));
                None
            }
        }
    }

    /// `Some(None)` for absent or null enrichment, `None` when it failed.
    fn enrichment(&mut self) -> Option<Option<EnrichmentData>> {
        let enrichment = match self.obj.get(ENRICHMENT) {
            None | Some(Value::Null) => return Some(None),
            Some(Value::Object(map)) => map,
            Some(other) => {
                self.push(Violation::expected_type(
                    ENRICHMENT,
                    JsonType::Object,
                    other,
                ));
                return None;
            }
        };

        // Inner fields are checked together so every missing part is reported.
        let historical_context = self.historical_context(enrichment);
        let key_entities = self.key_entities(enrichment);
        let sentiment_score = self.sentiment_score(enrichment);

        match (historical_context, key_entities, sentiment_score) {
            (Some(historical_context), Some(key_entities), Some(sentiment_score)) => {
                Some(Some(EnrichmentData {
                    historical_context,
                    key_entities,
                    sentiment_score,
                }))
            }
            _ => None,
        }
    }

    /// Optional, but must be a string when given.
    fn historical_context(&mut self, enrichment: &Map<String, Value>) -> Option<Option<String>> {
        const PATH: &str = "enrichmentData.historicalContext";

        match enrichment.get("historicalContext") {
            None => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(other) => {
                self.push(Violation::expected_type(PATH, JsonType::String, other));
                None
            }
        }
    }

    fn key_entities(&mut self, enrichment: &Map<String, Value>) -> Option<Vec<String>> {
        const PATH: &str = "enrichmentData.keyEntities";

        let items = match enrichment.get("keyEntities") {
            None => {
                self.push(Violation::required(PATH));
                return None;
            }
            Some(Value::Array(items)) => items,
            Some(other) => {
                self.push(Violation::expected_type(PATH, JsonType::Array, other));
                return None;
            }
        };

        let mut entities = Vec::with_capacity(items.len());
        let mut clean = true;
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => entities.push(s.clone()),
                other => {
                    clean = false;
                    self.push(Violation::expected_type(
                        format!("{}[{}]", PATH, i),
                        JsonType::String,
                        other,
                    ));
                }
            }
        }

        clean.then_some(entities)
    }

    fn sentiment_score(&mut self, enrichment: &Map<String, Value>) -> Option<f64> {
        const PATH: &str = "enrichmentData.sentimentScore";
        let (min, max) = SENTIMENT_RANGE;

        let value = match enrichment.get("sentimentScore") {
            None => {
                self.push(Violation::required(PATH));
                return None;
            }
            Some(value) => value,
        };

        let Some(score) = value.as_f64() else {
            self.push(Violation::expected_type(PATH, JsonType::Number, value));
            return None;
        };

        // Out-of-range scores are rejected, never clamped.
        if !(min..=max).contains(&score) {
            self.push(Violation::out_of_range(PATH, min, max, value.clone()));
            return None;
        }
        Some(score)
    }

    /// Absent means `false`; an explicit `null` is not a boolean.
    fn is_public(&mut self) -> Option<bool> {
        match self.obj.get("isPublic") {
            None => Some(false),
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => {
                self.push(Violation::expected_type(
                    "isPublic",
                    JsonType::Boolean,
                    other,
                ));
                None
            }
        }
    }

    fn reject_unknown(&mut self, obj: &Map<String, Value>, prefix: &str, known: &[&str]) {
        for (key, value) in obj {
            if !known.contains(&key.as_str()) {
                self.push(Violation::new(
                    make_path(prefix, key),
                    Constraint::UnknownField,
                    Some(value.clone()),
                ));
            }
        }
    }

    fn status_coherence(&mut self, status: ProcessingStatus, enriched: bool) {
        let coherent = match status {
            ProcessingStatus::Completed => enriched,
            ProcessingStatus::Pending | ProcessingStatus::OcrProcessing => !enriched,
            ProcessingStatus::AiEnriching | ProcessingStatus::Failed => true,
        };

        if !coherent {
            let value = self.obj.get(ENRICHMENT).cloned().unwrap_or(Value::Null);
            self.push(Violation::new(
                ENRICHMENT,
                Constraint::StatusCoherence { status },
                Some(value),
            ));
        }
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

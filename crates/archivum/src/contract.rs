//! The archive record shape published as a JSON Schema document.
//!
//! Collaborators that do not link this crate (upload front ends, enrichment
//! workers in other languages) can check their output against this schema.
//! The record validator remains the authority; the schema is kept in step
//! with it by the agreement tests.

use std::sync::LazyLock;

use serde_json::Value;

const RECORD_SCHEMA_JSON: &str = include_str!("../../../schema/archive-record-v1.json");

static RECORD_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    serde_json::from_str(RECORD_SCHEMA_JSON)
        .expect("embedded record schema is valid JSON")
});

static COMPILED: LazyLock<jsonschema::Validator> = LazyLock::new(|| {
    jsonschema::validator_for(&RECORD_SCHEMA)
        .expect("embedded record schema compiles")
});

/// The schema document as shipped.
pub fn schema_json() -> &'static str {
    RECORD_SCHEMA_JSON
}

pub fn schema() -> &'static Value {
    &RECORD_SCHEMA
}

/// Returns true if `instance` satisfies the published schema.
pub fn conforms(instance: &Value) -> bool {
    COMPILED.is_valid(instance)
}

/// Schema errors for `instance`, one message per failed keyword.
pub fn check(instance: &Value) -> Vec<String> {
    COMPILED
        .iter_errors(instance)
        .map(|e| e.to_string())
        .collect()
}

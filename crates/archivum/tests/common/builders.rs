//! Builder patterns for creating record input programmatically.

#![allow(dead_code)]

use serde_json::{json, Map, Value};

pub const RECORD_ID: &str = "a3f1c2d4-5b6e-4f70-8a9b-0c1d2e3f4a5b";
pub const UPLOADER_ID: &str = "6fa459ea-ee8a-3ca4-894e-db77e160355e";
pub const ORGANIZATION_ID: &str = "886313e1-3b8a-5372-9b90-0c9aee199e5d";

/// Builder for archive record input.
///
/// Starts from the "Letter from 1945" record: pending, no enrichment,
/// `isPublic` omitted.
#[derive(Clone)]
pub struct RecordBuilder {
    fields: Map<String, Value>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        let mut fields = Map::new();
        fields.insert("id".into(), json!(RECORD_ID));
        fields.insert("title".into(), json!("Letter from 1945"));
        fields.insert("processingStatus".into(), json!("pending"));
        fields.insert("enrichmentData".into(), Value::Null);
        fields.insert("uploadedBy".into(), json!(UPLOADER_ID));
        fields.insert("organizationId".into(), json!(ORGANIZATION_ID));
        Self { fields }
    }

    pub fn id(self, id: &str) -> Self {
        self.set("id", json!(id))
    }

    pub fn title(self, title: &str) -> Self {
        self.set("title", json!(title))
    }

    pub fn status(self, status: &str) -> Self {
        self.set("processingStatus", json!(status))
    }

    pub fn public(self, is_public: bool) -> Self {
        self.set("isPublic", json!(is_public))
    }

    pub fn enrichment(self, enrichment: EnrichmentBuilder) -> Self {
        self.set("enrichmentData", enrichment.build())
    }

    /// Sets any field to any value, including wrongly typed ones.
    pub fn set(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the `enrichmentData` object.
#[derive(Clone)]
pub struct EnrichmentBuilder {
    fields: Map<String, Value>,
}

impl EnrichmentBuilder {
    pub fn new(sentiment_score: f64) -> Self {
        let mut fields = Map::new();
        fields.insert("keyEntities".into(), json!([]));
        fields.insert("sentimentScore".into(), json!(sentiment_score));
        Self { fields }
    }

    pub fn entities(mut self, entities: &[&str]) -> Self {
        self.fields.insert("keyEntities".into(), json!(entities));
        self
    }

    pub fn context(mut self, context: &str) -> Self {
        self.fields
            .insert("historicalContext".into(), json!(context));
        self
    }

    pub fn set(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

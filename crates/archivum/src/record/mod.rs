//! The archive record entity.
//!
//! An [`ArchiveRecord`] can only be obtained through the record validator, so
//! every value of this type satisfies the record contract. Consumers
//! (storage, API serializers) may rely on that without re-checking.

pub mod lifecycle;
pub mod status;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::validation::{RecordValidator, ValidationError};

pub use lifecycle::{transition, TransitionError};
pub use status::{ProcessingStatus, UnknownStatus};

/// Inclusive bounds of [`EnrichmentData::sentiment_score`].
pub const SENTIMENT_RANGE: (f64, f64) = (-1.0, 1.0);

/// A validated archive record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveRecord {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) processing_status: ProcessingStatus,
    /// `None` is the "no enrichment yet" state, serialized as `null`.
    pub(crate) enrichment_data: Option<EnrichmentData>,
    pub(crate) uploaded_by: Uuid,
    pub(crate) organization_id: Uuid,
    pub(crate) is_public: bool,
}

/// AI-derived annotations attached to a record after processing.
///
/// Both `key_entities` and `sentiment_score` are always present; a record
/// without enrichment carries no `EnrichmentData` at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) historical_context: Option<String>,
    pub(crate) key_entities: Vec<String>,
    pub(crate) sentiment_score: f64,
}

impl ArchiveRecord {
    /// Validates an untyped value with the default validator.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        RecordValidator::default().validate(value)
    }

    /// Parses and validates a JSON document with the default validator.
    pub fn from_json_str(json: &str) -> crate::error::Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value)?)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn processing_status(&self) -> ProcessingStatus {
        self.processing_status
    }

    pub fn enrichment_data(&self) -> Option<&EnrichmentData> {
        self.enrichment_data.as_ref()
    }

    pub fn is_enriched(&self) -> bool {
        self.enrichment_data.is_some()
    }

    pub fn uploaded_by(&self) -> Uuid {
        self.uploaded_by
    }

    pub fn organization_id(&self) -> Uuid {
        self.organization_id
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    /// Moves the record to `next` according to the lifecycle table.
    pub fn transition_to(&self, next: ProcessingStatus) -> Result<Self, TransitionError> {
        transition(self, next)
    }

    /// Converts the record back into its wire representation.
    pub fn to_value(&self) -> Value {
        // Serializing plain strings, bools, UUIDs and finite floats cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl EnrichmentData {
    pub fn historical_context(&self) -> Option<&str> {
        self.historical_context.as_deref()
    }

    pub fn key_entities(&self) -> &[String] {
        &self.key_entities
    }

    pub fn sentiment_score(&self) -> f64 {
        self.sentiment_score
    }
}

impl TryFrom<Value> for ArchiveRecord {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl TryFrom<&Value> for ArchiveRecord {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Deserialization always goes through the validator, so a record read from
/// any serde format is as trustworthy as one built with [`ArchiveRecord::from_value`].
impl<'de> Deserialize<'de> for ArchiveRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(D::Error::custom)
    }
}

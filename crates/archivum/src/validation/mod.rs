//! Record validation.
//!
//! Turns an untyped [`serde_json::Value`] into an [`ArchiveRecord`](crate::ArchiveRecord)
//! or a [`ValidationError`] listing every violated constraint with its field path.

mod error;
mod validator;

pub use error::{Constraint, JsonType, ValidationError, Violation, ROOT_PATH};
pub use validator::{
    validate, RecordValidator, UnknownFields, ValidationOptions, ENRICHMENT_FIELDS, RECORD_FIELDS,
};

pub mod config;
pub mod contract;
pub mod error;
pub mod record;
pub mod validation;
pub mod worker;

pub use config::{load_config, load_config_from_str, resolve_config, Config};
pub use error::{ArchivumError, ConfigError, Result, WorkerError};
pub use record::{ArchiveRecord, EnrichmentData, ProcessingStatus, TransitionError};
pub use validation::{
    validate, Constraint, JsonType, RecordValidator, UnknownFields, ValidationError,
    ValidationOptions, Violation,
};
pub use worker::{validate_paths, BatchReport, DirectoryScanner, ValidationPool};

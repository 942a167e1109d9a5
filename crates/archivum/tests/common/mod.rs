//! Shared test utilities for archivum integration tests.
//!
//! Builders produce untyped JSON input the way an upload handler or an
//! enrichment worker would hand it to the validator.

pub mod builders;

pub use builders::*;

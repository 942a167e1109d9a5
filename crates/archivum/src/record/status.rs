//! Processing status of an archive record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle stage label attached to a record.
///
/// The value set is closed: any other string is rejected by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Pending,
    OcrProcessing,
    AiEnriching,
    Completed,
    Failed,
}

impl ProcessingStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [ProcessingStatus; 5] = [
        ProcessingStatus::Pending,
        ProcessingStatus::OcrProcessing,
        ProcessingStatus::AiEnriching,
        ProcessingStatus::Completed,
        ProcessingStatus::Failed,
    ];

    /// Wire names of every status, in the same order as [`ProcessingStatus::ALL`].
    pub const NAMES: &'static [&'static str] = &[
        "pending",
        "ocr_processing",
        "ai_enriching",
        "completed",
        "failed",
    ];

    /// Returns the wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingStatus::Pending => "pending",
            ProcessingStatus::OcrProcessing => "ocr_processing",
            ProcessingStatus::AiEnriching => "ai_enriching",
            ProcessingStatus::Completed => "completed",
            ProcessingStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown processing status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ProcessingStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProcessingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_wire_format() {
        for (status, name) in ProcessingStatus::ALL.iter().zip(ProcessingStatus::NAMES) {
            assert_eq!(status.as_str(), *name);
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", name));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "ocr_processing".parse::<ProcessingStatus>().unwrap(),
            ProcessingStatus::OcrProcessing
        );
        assert!("archived".parse::<ProcessingStatus>().is_err());
        // Wire names are case-sensitive
        assert!("Pending".parse::<ProcessingStatus>().is_err());
    }
}

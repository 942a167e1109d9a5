//! Transition table for [`ProcessingStatus`].
//!
//! The record validator only checks that a status belongs to the value set.
//! Ordering between statuses is the enrichment pipeline's concern and is
//! expressed here as an explicit table the pipeline can consult.

use log::debug;
use thiserror::Error;

use super::{ArchiveRecord, ProcessingStatus};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Transition from '{from}' to '{to}' is not permitted")]
    NotPermitted {
        from: ProcessingStatus,
        to: ProcessingStatus,
    },
}

impl ProcessingStatus {
    /// Statuses a record may move to from `self`.
    pub fn allowed_transitions(self) -> &'static [ProcessingStatus] {
        use ProcessingStatus::*;

        match self {
            Pending => &[OcrProcessing, Failed],
            OcrProcessing => &[AiEnriching, Failed],
            AiEnriching => &[Completed, Failed],
            // Re-enrichment of a finished record
            Completed => &[AiEnriching],
            // Retry
            Failed => &[Pending],
        }
    }

    pub fn can_transition_to(self, next: ProcessingStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Returns true for statuses the pipeline leaves a record in once it stops working on it.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProcessingStatus::Completed | ProcessingStatus::Failed)
    }
}

/// Returns a copy of `record` moved to `next`, if the table permits it.
pub fn transition(
    record: &ArchiveRecord,
    next: ProcessingStatus,
) -> Result<ArchiveRecord, TransitionError> {
    let from = record.processing_status();
    if !from.can_transition_to(next) {
        return Err(TransitionError::NotPermitted { from, to: next });
    }

    debug!("Record {} moved from {} to {}", record.id(), from, next);

    let mut moved = record.clone();
    moved.processing_status = next;
    Ok(moved)
}

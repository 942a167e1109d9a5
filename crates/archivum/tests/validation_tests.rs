//! Table-driven tests for the archive record contract.
//!
//! Covers required fields, status values, enrichment bounds, defaults and
//! stability of validated output.

mod common;

use archivum::{validate, ArchiveRecord, Constraint, ProcessingStatus, RecordValidator};
use common::{EnrichmentBuilder, RecordBuilder, RECORD_ID};
use serde_json::{json, Value};

/// Represents a single rejection test case.
struct RejectionTestCase {
    /// Test case name for identification.
    name: &'static str,
    /// Input to validate.
    input: fn() -> Value,
    /// Path that must appear in the violation set.
    expected_path: &'static str,
}

const REJECTION_TESTS: &[RejectionTestCase] = &[
    RejectionTestCase {
        name: "missing_id",
        input: || RecordBuilder::new().without("id").build(),
        expected_path: "id",
    },
    RejectionTestCase {
        name: "missing_title",
        input: || RecordBuilder::new().without("title").build(),
        expected_path: "title",
    },
    RejectionTestCase {
        name: "missing_uploaded_by",
        input: || RecordBuilder::new().without("uploadedBy").build(),
        expected_path: "uploadedBy",
    },
    RejectionTestCase {
        name: "missing_organization_id",
        input: || RecordBuilder::new().without("organizationId").build(),
        expected_path: "organizationId",
    },
    RejectionTestCase {
        name: "missing_status",
        input: || RecordBuilder::new().without("processingStatus").build(),
        expected_path: "processingStatus",
    },
    RejectionTestCase {
        name: "empty_title",
        input: || RecordBuilder::new().title("").build(),
        expected_path: "title",
    },
    RejectionTestCase {
        name: "placeholder_uploader",
        input: || RecordBuilder::new().set("uploadedBy", json!("uuid-2")).build(),
        expected_path: "uploadedBy",
    },
    RejectionTestCase {
        name: "status_archived",
        input: || RecordBuilder::new().status("archived").build(),
        expected_path: "processingStatus",
    },
    RejectionTestCase {
        name: "status_uppercase",
        input: || RecordBuilder::new().status("COMPLETED").build(),
        expected_path: "processingStatus",
    },
    RejectionTestCase {
        name: "status_number",
        input: || RecordBuilder::new().set("processingStatus", json!(3)).build(),
        expected_path: "processingStatus",
    },
    RejectionTestCase {
        name: "sentiment_above_range",
        input: || {
            RecordBuilder::new()
                .enrichment(EnrichmentBuilder::new(1.5))
                .build()
        },
        expected_path: "enrichmentData.sentimentScore",
    },
    RejectionTestCase {
        name: "sentiment_below_range",
        input: || {
            RecordBuilder::new()
                .enrichment(EnrichmentBuilder::new(-2.0))
                .build()
        },
        expected_path: "enrichmentData.sentimentScore",
    },
    RejectionTestCase {
        name: "enrichment_without_sentiment",
        input: || {
            RecordBuilder::new()
                .enrichment(EnrichmentBuilder::new(0.0).without("sentimentScore"))
                .build()
        },
        expected_path: "enrichmentData.sentimentScore",
    },
    RejectionTestCase {
        name: "enrichment_without_entities",
        input: || {
            RecordBuilder::new()
                .enrichment(EnrichmentBuilder::new(0.0).without("keyEntities"))
                .build()
        },
        expected_path: "enrichmentData.keyEntities",
    },
    RejectionTestCase {
        name: "is_public_string",
        input: || RecordBuilder::new().set("isPublic", json!("false")).build(),
        expected_path: "isPublic",
    },
];

#[test]
fn test_rejections() {
    for case in REJECTION_TESTS {
        let input = (case.input)();
        let err = validate(&input)
            .expect_err(&format!("Test '{}': input should be rejected", case.name));
        assert!(
            err.has_path(case.expected_path),
            "Test '{}': expected violation at '{}', got: {}",
            case.name,
            case.expected_path,
            err
        );
    }
}

#[test]
fn test_letter_from_1945_is_accepted() {
    let record = validate(&RecordBuilder::new().build()).unwrap();

    assert_eq!(record.id().to_string(), RECORD_ID);
    assert_eq!(record.title(), "Letter from 1945");
    assert_eq!(record.processing_status(), ProcessingStatus::Pending);
    assert!(record.enrichment_data().is_none());
    assert!(!record.is_public());
}

#[test]
fn test_letter_from_1945_archived_has_single_violation() {
    let err = validate(&RecordBuilder::new().status("archived").build()).unwrap_err();

    assert_eq!(err.len(), 1);
    let violation = &err.violations()[0];
    assert_eq!(violation.path(), "processingStatus");
    assert_eq!(violation.value(), Some(&json!("archived")));
    assert_eq!(
        violation.constraint(),
        &Constraint::NotOneOf {
            allowed: ProcessingStatus::NAMES
        }
    );
}

#[test]
fn test_every_status_is_accepted() {
    for name in ProcessingStatus::NAMES {
        let record = validate(&RecordBuilder::new().status(name).build()).unwrap();
        assert_eq!(record.processing_status().as_str(), *name);
    }
}

#[test]
fn test_status_order_is_not_enforced() {
    // A pending record with enrichment and a completed one without are both
    // accepted; ordering belongs to the lifecycle table.
    let pending_enriched = RecordBuilder::new()
        .enrichment(EnrichmentBuilder::new(0.3).entities(&["Churchill"]))
        .build();
    assert!(validate(&pending_enriched).is_ok());

    let completed_bare = RecordBuilder::new().status("completed").build();
    assert!(validate(&completed_bare).is_ok());
    let pending = ProcessingStatus::Pending;
    assert!(!pending.can_transition_to(ProcessingStatus::Completed));
}

#[test]
fn test_all_violations_are_collected() {
    let input = RecordBuilder::new()
        .without("id")
        .title("")
        .status("archived")
        .set("uploadedBy", json!("not-a-uuid"))
        .set("isPublic", json!(1))
        .enrichment(
            EnrichmentBuilder::new(3.0)
                .set("keyEntities", json!(["ok", false]))
                .set("historicalContext", json!(42)),
        )
        .build();

    let err = validate(&input).unwrap_err();
    let paths: Vec<&str> = err.paths().collect();
    assert_eq!(
        paths,
        [
            "id",
            "title",
            "processingStatus",
            "enrichmentData.historicalContext",
            "enrichmentData.keyEntities[1]",
            "enrichmentData.sentimentScore",
            "uploadedBy",
            "isPublic",
        ]
    );
}

#[test]
fn test_enrichment_null_and_absent_are_accepted() {
    let null = RecordBuilder::new().set("enrichmentData", Value::Null).build();
    assert!(validate(&null).unwrap().enrichment_data().is_none());

    let absent = RecordBuilder::new().without("enrichmentData").build();
    assert!(validate(&absent).unwrap().enrichment_data().is_none());
}

#[test]
fn test_full_enrichment_is_typed() {
    let input = RecordBuilder::new()
        .status("completed")
        .public(true)
        .enrichment(
            EnrichmentBuilder::new(-0.75)
                .entities(&["Yalta", "Roosevelt", "Stalin"])
                .context("Conference correspondence"),
        )
        .build();

    let record = validate(&input).unwrap();
    assert!(record.is_public());
    let enrichment = record.enrichment_data().unwrap();
    assert_eq!(enrichment.sentiment_score(), -0.75);
    assert_eq!(enrichment.key_entities().len(), 3);
    assert_eq!(
        enrichment.historical_context(),
        Some("Conference correspondence")
    );
}

#[test]
fn test_validation_is_idempotent() {
    let inputs = [
        RecordBuilder::new().build(),
        RecordBuilder::new().public(true).build(),
        RecordBuilder::new()
            .status("completed")
            .enrichment(
                EnrichmentBuilder::new(0.125)
                    .entities(&["Dresden"])
                    .context("Post-war reconstruction"),
            )
            .build(),
        RecordBuilder::new()
            .id("A3F1C2D4-5B6E-4F70-8A9B-0C1D2E3F4A5B")
            .set("extra", json!("dropped"))
            .build(),
    ];

    for input in inputs {
        let first = validate(&input).unwrap();
        let second = validate(&first.to_value()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_value(), second.to_value());
    }
}

#[test]
fn test_json_text_round_trip() {
    let input = RecordBuilder::new()
        .enrichment(EnrichmentBuilder::new(0.5).entities(&["Vienna"]))
        .build();
    let record = ArchiveRecord::from_json_str(&input.to_string()).unwrap();

    let text = serde_json::to_string(&record).unwrap();
    let again: ArchiveRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(record, again);
}

#[test]
fn test_validator_shared_across_threads() {
    let validator = RecordValidator::new();
    let inputs: Vec<Value> = (0..16)
        .map(|i| RecordBuilder::new().title(&format!("Page {}", i)).build())
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| scope.spawn(move || validator.validate(input)))
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
    });
}

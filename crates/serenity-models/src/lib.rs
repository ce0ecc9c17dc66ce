//! Shared data models for the SerenityAI resource importer.
//!
//! This crate provides Serde-serializable types for:
//! - Resource records read from the import source file
//! - Per-record import outcomes
//! - Import run summaries

pub mod outcome;
pub mod record;

// Re-export common types
pub use outcome::{ImportSummary, RecordOutcome, RecordReport};
pub use record::{ResourceRecord, DEFAULT_TITLE_FIELD, UNKNOWN_TITLE};

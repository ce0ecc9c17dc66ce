//! Educational resource import pipeline.
//!
//! Credential resolution, then batch import of a JSON array file into one
//! Firestore collection, then a summary report.

pub mod config;
pub mod error;
pub mod importer;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod source;


pub use config::ImportConfig;
pub use error::{ImportError, ImportResult};
pub use importer::Importer;
pub use logging::ImportLogger;
pub use pipeline::run;
pub use report::{report, write_report};
pub use source::load_records;

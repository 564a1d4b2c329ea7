//! shotlog-ingest library interface
//!
//! Launch-monitor CSV ingestion: vendor schema registry, field
//! normalization, row mapping, persistence, live store streams, and
//! per-club aggregation.

pub mod aggregate;
pub mod csv_file;
pub mod db;
pub mod error;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod store;
pub mod vendors;

pub use crate::error::IngestError;
pub use crate::models::{ImportRequest, SessionSummary, ShotRecord, Vendor};

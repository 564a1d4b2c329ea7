//! Data models for the ingestion pipeline

mod shot;

pub use shot::{ImportRequest, SessionSummary, ShotRecord, Vendor};

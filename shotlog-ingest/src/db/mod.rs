//! Database access for shotlog-ingest

pub mod shots;

pub use shotlog_common::db::init_database;

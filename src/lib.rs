//! Consolidates periodic asset-inventory exports (CSV and XLSX) from multiple
//! source systems into one canonical dataset per source type.
//!
//! The core is a generic record pipeline: delimited-text parsing with quoted
//! fields, positional-to-named mapping through a [`schema::RecordSchema`],
//! first-occurrence dedup on a declared key field, and an ordered merge for
//! paired regional sources. Everything around it (archival, run log,
//! notifications) hangs off the [`pipeline::PipelineContext`].

pub mod archive;
pub mod batch;
pub mod config;
pub mod constants;
pub mod dedup;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod merge;
pub mod notify;
pub mod pipeline;
pub mod reader;
pub mod run_log;
pub mod schema;
pub mod sink;
pub mod sources;
pub mod splitter;

pub use error::{ConsolidatorError, Result};

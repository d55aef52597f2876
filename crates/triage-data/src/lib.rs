//! Data ingestion and analysis layer for the Cowrie triage pipeline.
//!
//! Responsible for discovering and parsing Cowrie JSON log files,
//! extracting per-session command sequences, scoring them against the
//! baseline, and building the all-pairs session distance matrix.

pub mod detector;
pub mod extractor;
pub mod matrix;
pub mod reader;

pub use triage_core as core;

//! Reporting layer for the Cowrie triage pipeline.
//!
//! Runs hierarchical clustering over the session distance matrix,
//! renders the dendrogram image, and writes the CSV report files.

pub mod cluster;
pub mod dendrogram;
pub mod report;

pub use triage_core as core;

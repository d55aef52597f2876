//! Core types for the Cowrie triage pipeline.
//!
//! Shared building blocks used by every stage: the data model, the error
//! taxonomy, the Levenshtein distance primitives, and the CLI settings.

pub mod distance;
pub mod error;
pub mod models;
pub mod settings;

pub use error::{Result, TriageError};

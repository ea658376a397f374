//! Store module
//!
//! This module provides the data the tools work against:
//! - WorkingSet: request-scoped typed slots for inter-step communication
//! - ReferenceData: read-only lookup tables shared by every request

mod reference_data;
mod working_set;

pub use reference_data::{KbEntry, KnowledgeBase, ReferenceData, DEFAULT_CITY, SUPPORTED_CITIES};
pub use working_set::{EntityReadings, WorkingSet};

use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid reference data: {0}")]
    Invalid(String),
}

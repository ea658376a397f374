//! Intent type definitions
//!
//! Intent represents the user's free-text query for a single request.

use serde::{Deserialize, Serialize};

/// User intent - the first-class input of the system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    /// Unique identifier for this request, used to correlate log lines
    pub id: String,
    /// The raw query text as typed by the user
    pub content: String,
}

impl Intent {
    /// Create a new intent with a fresh request id
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
        }
    }

    /// Normalized text the parsers work on
    pub fn normalized(&self) -> String {
        self.content.to_lowercase()
    }
}

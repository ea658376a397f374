//! Plan type definitions
//!
//! Plan is the ordered list of steps compiled from one intent.

use serde::Serialize;

use super::Step;

/// Ordered, possibly empty sequence of steps. Order is execution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Plan {
    /// Steps in execution order
    pub steps: Vec<Step>,
}

impl Plan {
    /// Create a new plan
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// An empty plan is a valid, representable outcome of compilation
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Tool names in execution order, for logging
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.tool().as_str()).collect()
    }
}

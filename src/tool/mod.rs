//! Tool abstraction module
//!
//! This module defines the seam between plans and tool bodies:
//! - ToolRegistry: ordered tool bindings and argument validation
//! - ToolContext: what a handler may read and write while it runs
//! - ToolError: classified handler faults

mod registry;

pub use registry::{ParserFn, RegistryError, ToolBinding, ToolRegistry};

use thiserror::Error;

use crate::store::{ReferenceData, WorkingSet};

/// Execution context handed to every tool handler
pub struct ToolContext<'a> {
    /// Request-scoped slots shared with the other steps of the plan
    pub working_set: &'a mut WorkingSet,
    /// Read-only lookup tables
    pub reference: &'a ReferenceData,
}

impl<'a> ToolContext<'a> {
    pub fn new(working_set: &'a mut WorkingSet, reference: &'a ReferenceData) -> Self {
        Self {
            working_set,
            reference,
        }
    }
}

/// Arithmetic failures raised by the expression evaluator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("malformed expression '{expr}': {reason}")]
    Malformed { expr: String, reason: String },
}

/// Handler faults. Every variant aborts the plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    #[error("domain validation failed: {0}")]
    Domain(String),

    #[error("unexpected tool failure: {0}")]
    Unexpected(String),
}

impl ToolError {
    /// Short fault class for log lines
    pub fn class(&self) -> &'static str {
        match self {
            ToolError::InvalidArgument(_) => "argument",
            ToolError::Arithmetic(_) => "arithmetic",
            ToolError::Domain(_) => "domain",
            ToolError::Unexpected(_) => "unexpected",
        }
    }
}

//! ToolRegistry - ordered tool bindings
//!
//! The registry is built once at startup and shared read-only. It owns the
//! registration order of the parsers and turns raw candidate steps into
//! validated [`Step`]s.

use serde_json::Value;
use thiserror::Error;

use crate::planner::parsers::{self, ParseError};
use crate::types::{RawStep, Step, ToolArgs, ToolId};

/// Query parser: text in, zero or more candidate steps out
pub type ParserFn = fn(&str) -> Result<Vec<RawStep>, ParseError>;

/// Registry errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("tool already registered: {0}")]
    AlreadyRegistered(ToolId),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid args for {tool}: {reason}")]
    InvalidArgs { tool: ToolId, reason: String },
}

/// A registered tool and the parser that proposes steps for it
#[derive(Clone)]
pub struct ToolBinding {
    pub id: ToolId,
    pub parser: ParserFn,
}

impl std::fmt::Debug for ToolBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolBinding").field("id", &self.id).finish()
    }
}

/// Ordered set of tool bindings
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    bindings: Vec<ToolBinding>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool, in the canonical parser order
    pub fn with_default_tools() -> Self {
        let bindings = ToolId::ALL
            .into_iter()
            .map(|id| ToolBinding {
                id,
                parser: parsers::parser_for(id),
            })
            .collect();
        Self { bindings }
    }

    /// Register a tool. Duplicate ids are rejected.
    pub fn register(&mut self, id: ToolId, parser: ParserFn) -> Result<(), RegistryError> {
        if self.contains(id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }
        self.bindings.push(ToolBinding { id, parser });
        Ok(())
    }

    /// Bindings in registration order
    pub fn bindings(&self) -> &[ToolBinding] {
        &self.bindings
    }

    pub fn contains(&self, id: ToolId) -> bool {
        self.bindings.iter().any(|b| b.id == id)
    }

    /// Validate raw arguments for the named tool
    pub fn validate(&self, tool: &str, raw_args: Value) -> Result<Step, RegistryError> {
        let id = ToolId::from_name(tool)
            .filter(|id| self.contains(*id))
            .ok_or_else(|| RegistryError::UnknownTool(tool.to_string()))?;

        let args = ToolArgs::from_raw(id, raw_args)
            .map_err(|reason| RegistryError::InvalidArgs { tool: id, reason })?;
        Ok(Step::new(args))
    }

    /// Validate a parser candidate
    pub fn validate_raw(&self, raw: RawStep) -> Result<Step, RegistryError> {
        self.validate(&raw.tool, raw.args)
    }

    /// Run an already validated step through validation again
    pub fn revalidate(&self, step: &Step) -> Result<Step, RegistryError> {
        self.validate_raw(step.args().to_raw())
    }
}

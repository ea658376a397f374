//! Agent facade: compile a query, execute the plan, return the answer.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::config::{load_config, AgentConfig, ConfigError};
use crate::executor::{ExecutionResult, Executor};
use crate::planner::{Planner, RulePlanner};
use crate::store::{ReferenceData, StoreError};
use crate::tool::ToolRegistry;
use crate::types::{Answer, Intent, Plan};

/// Agent construction errors
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("reference data error: {0}")]
    Store(#[from] StoreError),
}

/// Planner and executor sharing one tool registry.
///
/// Immutable after construction; concurrent calls each run with their own
/// working set.
#[derive(Debug, Clone)]
pub struct Agent {
    planner: RulePlanner,
    executor: Executor,
}

impl Agent {
    /// Build an agent from reference data, with every built-in tool
    pub fn with_reference(reference: ReferenceData) -> Self {
        let registry = Arc::new(ToolRegistry::with_default_tools());
        Self {
            planner: RulePlanner::new(registry.clone()),
            executor: Executor::new(registry, Arc::new(reference)),
        }
    }

    /// Built-in tables and the bundled knowledge base
    pub fn with_defaults() -> Self {
        Self::with_reference(ReferenceData::builtin())
    }

    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        let reference = ReferenceData::from_config(&config.data)?;
        Ok(Self::with_reference(reference))
    }

    pub fn from_config_file(path: &Path) -> Result<Self, AgentError> {
        let config = load_config(path)?;
        Self::new(&config)
    }

    /// Compile a query into a plan without running it
    pub fn compile(&self, query: &str) -> Plan {
        self.planner.plan(&Intent::new(query))
    }

    /// Compile and execute, keeping the three-way outcome
    pub fn run(&self, query: &str) -> ExecutionResult {
        let intent = Intent::new(query);
        let span = tracing::info_span!("request", intent_id = %intent.id);
        let _guard = span.enter();

        let started = Instant::now();
        let plan = self.planner.plan(&intent);
        let result = self.executor.execute(&plan);
        tracing::info!(
            completed = result.is_completed(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "query answered"
        );
        result
    }

    /// Compile and execute; empty plans and failures are absent
    pub fn answer(&self, query: &str) -> Answer {
        self.run(query).into_answer()
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::with_defaults()
    }
}

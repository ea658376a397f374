//! Planner module
//!
//! The Planner is responsible for:
//! - Running every registered parser over the query text
//! - Validating each candidate step against its tool's schema
//! - Concatenating the survivors into one ordered Plan
//!
//! The Planner does NOT handle:
//! - Tool execution or shared state
//! - Recovering from a parser fault beyond dropping its output

pub mod parsers;

use std::sync::Arc;
use std::time::Instant;

use crate::isolation::run_isolated;
use crate::tool::{ToolBinding, ToolRegistry};
use crate::types::{Intent, Plan, Step};

/// Planner trait - compiles a user intent into an execution plan.
///
/// Compilation never fails: text nothing recognizes yields an empty plan.
pub trait Planner: Send + Sync {
    fn plan(&self, intent: &Intent) -> Plan;
}

/// Rule-based planner backed by the parsers in a [`ToolRegistry`]
#[derive(Debug, Clone)]
pub struct RulePlanner {
    registry: Arc<ToolRegistry>,
}

impl RulePlanner {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one parser inside its isolation boundary and validate its output
    fn run_parser(&self, binding: &ToolBinding, text: &str, intent_id: &str) -> Vec<Step> {
        let candidates = match run_isolated(|| (binding.parser)(text)) {
            Ok(Ok(candidates)) => candidates,
            Ok(Err(error)) => {
                tracing::error!(intent_id, tool = %binding.id, %error, "parser failed");
                return Vec::new();
            }
            Err(panic) => {
                tracing::error!(intent_id, tool = %binding.id, panic = %panic, "parser panicked");
                return Vec::new();
            }
        };

        let mut steps = Vec::with_capacity(candidates.len());
        for raw in candidates {
            match self.registry.validate_raw(raw) {
                Ok(step) => steps.push(step),
                Err(error) => {
                    tracing::warn!(intent_id, tool = %binding.id, %error, "dropping invalid candidate step");
                }
            }
        }

        tracing::info!(intent_id, tool = %binding.id, steps = steps.len(), "parser finished");
        steps
    }
}

impl Planner for RulePlanner {
    fn plan(&self, intent: &Intent) -> Plan {
        let started = Instant::now();
        let text = intent.normalized();

        let steps: Vec<Step> = self
            .registry
            .bindings()
            .iter()
            .flat_map(|binding| self.run_parser(binding, &text, &intent.id))
            .collect();
        let plan = Plan::new(steps);

        tracing::info!(
            intent_id = %intent.id,
            steps = plan.len(),
            tools = ?plan.tool_names(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "plan compiled"
        );
        plan
    }
}

//! Executor module
//!
//! The Executor is responsible for:
//! - Running plan steps strictly in order
//! - Threading one working set through the steps of a plan
//! - Stopping at the first fault and reporting where it happened

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use crate::isolation::run_isolated;
use crate::store::{ReferenceData, WorkingSet};
use crate::tool::{RegistryError, ToolContext, ToolError, ToolRegistry};
use crate::tools;
use crate::types::{Answer, Plan, Step, ToolId};

/// Faults that abort a plan
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid args for {tool}: {reason}")]
    InvalidArgs { tool: ToolId, reason: String },

    #[error("{tool} failed: {source}")]
    Tool {
        tool: ToolId,
        #[source]
        source: ToolError,
    },

    #[error("registry error: {0}")]
    Registry(RegistryError),
}

impl ExecutionError {
    /// Short fault class for log lines
    pub fn class(&self) -> &'static str {
        match self {
            ExecutionError::UnknownTool(_) => "unknown_tool",
            ExecutionError::InvalidArgs { .. } => "invalid_args",
            ExecutionError::Tool { source, .. } => source.class(),
            ExecutionError::Registry(_) => "registry",
        }
    }
}

impl From<RegistryError> for ExecutionError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::InvalidArgs { tool, reason } => {
                ExecutionError::InvalidArgs { tool, reason }
            }
            RegistryError::UnknownTool(name) => ExecutionError::UnknownTool(name),
            other @ RegistryError::AlreadyRegistered(_) => ExecutionError::Registry(other),
        }
    }
}

/// Lifecycle of one plan execution, tracked for the transition log
#[derive(Debug, Clone, PartialEq, Eq)]
enum TaskState {
    Idle,
    Running { step_index: usize },
    Completed,
    Failed { step_index: usize },
}

/// Execution result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionResult {
    /// Every step succeeded; the answer is the last step's output
    Completed { answer: Answer },
    /// Nothing to run
    EmptyPlan,
    /// A step faulted; no partial answer is reported
    Failed {
        step_index: usize,
        #[serde(serialize_with = "serialize_error")]
        error: ExecutionError,
    },
}

fn serialize_error<S: serde::Serializer>(
    error: &ExecutionError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

impl ExecutionResult {
    /// Collapse to the caller-facing answer; anything but completion is absent
    pub fn into_answer(self) -> Answer {
        match self {
            ExecutionResult::Completed { answer } => answer,
            ExecutionResult::EmptyPlan | ExecutionResult::Failed { .. } => Answer::Absent,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, ExecutionResult::Completed { .. })
    }
}

/// The executor - runs a plan step by step
#[derive(Debug, Clone)]
pub struct Executor {
    registry: Arc<ToolRegistry>,
    reference: Arc<ReferenceData>,
}

impl Executor {
    /// Create a new executor
    pub fn new(registry: Arc<ToolRegistry>, reference: Arc<ReferenceData>) -> Self {
        Self {
            registry,
            reference,
        }
    }

    /// Execute a plan with a fresh working set
    pub fn execute(&self, plan: &Plan) -> ExecutionResult {
        let started = Instant::now();
        let mut state = TaskState::Idle;

        if plan.is_empty() {
            tracing::info!(?state, "empty plan, nothing to execute");
            return ExecutionResult::EmptyPlan;
        }

        let mut working_set = WorkingSet::new();
        let mut answer = Answer::Absent;

        for (step_index, step) in plan.steps.iter().enumerate() {
            transition(&mut state, TaskState::Running { step_index });

            match self.execute_step(step, &mut working_set) {
                Ok(output) => {
                    tracing::info!(step_index, tool = %step.tool(), answer = %output, "step completed");
                    answer = output;
                }
                Err(error) => {
                    tracing::error!(
                        step_index,
                        tool = %step.tool(),
                        class = error.class(),
                        %error,
                        "step failed, aborting plan"
                    );
                    transition(&mut state, TaskState::Failed { step_index });
                    return ExecutionResult::Failed { step_index, error };
                }
            }
        }

        transition(&mut state, TaskState::Completed);
        tracing::info!(
            steps = plan.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "plan completed"
        );
        ExecutionResult::Completed { answer }
    }

    fn execute_step(
        &self,
        step: &Step,
        working_set: &mut WorkingSet,
    ) -> Result<Answer, ExecutionError> {
        let tool = step.tool();
        if !self.registry.contains(tool) {
            return Err(ExecutionError::UnknownTool(tool.to_string()));
        }

        let step = self.registry.revalidate(step)?;
        tracing::info!(%tool, args = ?step.args(), "executing step");

        let reference = self.reference.as_ref();
        let outcome = run_isolated(|| {
            let mut ctx = ToolContext::new(working_set, reference);
            tools::dispatch(step.args(), &mut ctx)
        });

        match outcome {
            Ok(result) => result.map_err(|source| ExecutionError::Tool { tool, source }),
            Err(panic) => Err(ExecutionError::Tool {
                tool,
                source: ToolError::Unexpected(panic),
            }),
        }
    }
}

fn transition(state: &mut TaskState, to: TaskState) {
    tracing::debug!(from = ?state, ?to, "task state transition");
    *state = to;
}

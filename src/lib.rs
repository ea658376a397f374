//! # query-agent
//!
//! A rule-based agent that turns a free-text query into a plan of tool
//! invocations, runs the plan step by step and returns one answer.
//!
//! ## Core Concepts
//!
//! - **Intent**: the user's query for one request
//! - **Plan**: ordered steps compiled from the intent by the parsers
//! - **Step**: one tool invocation with validated, typed arguments
//! - **WorkingSet**: typed slots that carry results from one step to the next
//! - **Executor**: sequential runner that stops at the first fault
//!
//! ## Architecture
//!
//! ```text
//! Query text
//!    ↓
//! RulePlanner (parsers in registration order)
//!    ↓
//! ToolRegistry validation
//!    ↓
//! Plan
//!    ↓
//! Executor + WorkingSet
//!    ↓
//! Tool handlers
//!    ↓
//! Answer
//! ```
//!
//! ## Example
//!
//! ```rust
//! use query_agent::prelude::*;
//!
//! let agent = Agent::with_defaults();
//! assert_eq!(agent.answer("What is 8 / 2?"), Answer::Number(4.0));
//!
//! let plan = agent.compile("Convert the average of 10 and 20 USD into EUR");
//! assert_eq!(plan.tool_names(), vec!["calc", "fx"]);
//! ```

pub mod agent;
pub mod config;
pub mod executor;
mod isolation;
pub mod observability;
pub mod planner;
pub mod store;
pub mod tool;
pub mod tools;
pub mod types;

use once_cell::sync::Lazy;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::agent::{Agent, AgentError};
    pub use crate::config::{load_config, AgentConfig, ConfigError};
    pub use crate::executor::{ExecutionError, ExecutionResult, Executor};
    pub use crate::planner::{Planner, RulePlanner};
    pub use crate::store::{EntityReadings, ReferenceData, StoreError, WorkingSet};
    pub use crate::tool::{
        ArithmeticError, RegistryError, ToolContext, ToolError, ToolRegistry,
    };
    pub use crate::types::{
        Aggregate, Answer, Intent, Plan, RawStep, Step, ToolArgs, ToolId,
    };
}

// Re-export key types at crate root
pub use agent::Agent;
pub use executor::{ExecutionResult, Executor};
pub use planner::{Planner, RulePlanner};
pub use store::WorkingSet;
pub use types::{Answer, Intent, Plan, Step};

static DEFAULT_AGENT: Lazy<Agent> = Lazy::new(Agent::with_defaults);

/// Answer a query with the process-wide default agent.
///
/// Returns [`Answer::Absent`] when nothing in the query is recognized or when
/// execution fails.
pub fn answer(query: &str) -> Answer {
    DEFAULT_AGENT.answer(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_entry_point() {
        assert_eq!(answer("What is 3 / 1.5?"), Answer::Number(2.0));
        assert_eq!(answer("What is 8 / 0?"), Answer::Absent);
        assert_eq!(answer("Convert 10 USD to EUR").to_string(), "9.1");
    }
}

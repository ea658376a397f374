//! Core type definitions
//!
//! This module contains the fundamental types used throughout the system:
//! - Intent: the user's query for one request
//! - Step: a single validated tool invocation
//! - Plan: the ordered steps compiled from an intent
//! - Answer: what a tool (and finally the agent) returns

mod answer;
mod intent;
mod plan;
mod step;

pub use answer::{format_decimal, round_to, Answer};
pub use intent::Intent;
pub use plan::Plan;
pub use step::{
    Aggregate, CalcArgs, CurrencyArgs, KbArgs, RawStep, Step, TemperatureArgs, ToolArgs, ToolId,
    WeatherArgs,
};

//! Query parsers
//!
//! Each parser is a pure function from query text to candidate steps for one
//! tool. Parsers check a cheap keyword cue first and return an empty list for
//! text they do not recognize. Candidates are validated by the tool registry,
//! not here.

mod calc;
mod currency;
mod entities;
mod kb;
mod temperature;
mod weather;

pub use calc::parse_calc;
pub use currency::parse_currency;
pub use entities::{extract_cities, UNRESOLVED_CITY};
pub use kb::parse_kb;
pub use temperature::parse_temperature;
pub use weather::parse_weather;

use regex::Captures;
use thiserror::Error;

use crate::tool::ParserFn;
use crate::types::ToolId;

/// Parser failures. A failing parser contributes no steps.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("pattern '{pattern}' matched without capture group {group}")]
    MissingCapture { pattern: &'static str, group: usize },
}

/// The built-in parser for a tool
pub fn parser_for(tool: ToolId) -> ParserFn {
    match tool {
        ToolId::Temperature => parse_temperature,
        ToolId::Weather => parse_weather,
        ToolId::Currency => parse_currency,
        ToolId::Kb => parse_kb,
        ToolId::Calc => parse_calc,
    }
}

/// Required capture group as text
pub(crate) fn capture<'t>(
    caps: &Captures<'t>,
    group: usize,
    pattern: &'static str,
) -> Result<&'t str, ParseError> {
    caps.get(group)
        .map(|m| m.as_str())
        .ok_or(ParseError::MissingCapture { pattern, group })
}

pub(crate) fn parse_number(text: &str) -> Result<f64, ParseError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(text.to_string()))
}

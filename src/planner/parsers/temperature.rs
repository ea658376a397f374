//! Temperature parser

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use super::entities::cities_or_placeholder;
use super::ParseError;
use crate::types::{Aggregate, RawStep, ToolId};

static TEMPERATURE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btemperatures?\b(.*)").unwrap());

static AGGREGATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(average|avg|total|sum|maximum|max|minimum|min)\b").unwrap()
});

/// Parse temperature questions into one `temperature` step.
///
/// The first aggregate keyword anywhere in the query selects the reduction;
/// cities are read from the text after "temperature".
pub fn parse_temperature(text: &str) -> Result<Vec<RawStep>, ParseError> {
    if !text.to_lowercase().contains("temperature") {
        return Ok(Vec::new());
    }

    let Some(caps) = TEMPERATURE_PATTERN.captures(text) else {
        return Ok(Vec::new());
    };

    let operation = AGGREGATE_PATTERN
        .find(text)
        .and_then(|m| Aggregate::from_keyword(m.as_str()))
        .unwrap_or_default();
    let tail = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let cities = cities_or_placeholder(tail);

    tracing::debug!(?cities, ?operation, "temperature parser matched");
    Ok(vec![RawStep::new(
        ToolId::Temperature,
        json!({ "cities": cities, "operation": operation }),
    )])
}

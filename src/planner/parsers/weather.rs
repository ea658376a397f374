//! Weather parser

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use super::entities::cities_or_placeholder;
use super::ParseError;
use crate::types::{RawStep, ToolId};

static WEATHER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bweather\b(.*)").unwrap());

/// Parse weather questions into one `weather` step
pub fn parse_weather(text: &str) -> Result<Vec<RawStep>, ParseError> {
    if !text.to_lowercase().contains("weather") {
        return Ok(Vec::new());
    }

    let Some(caps) = WEATHER_PATTERN.captures(text) else {
        return Ok(Vec::new());
    };
    let cities = cities_or_placeholder(caps.get(1).map(|m| m.as_str()).unwrap_or_default());

    tracing::debug!(?cities, "weather parser matched");
    Ok(vec![RawStep::new(ToolId::Weather, json!({ "cities": cities }))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_weather_cities() {
        let steps = parse_weather("what's the weather in tokyo and berlin?").unwrap();
        assert_eq!(
            steps,
            vec![RawStep::new(ToolId::Weather, json!({"cities": ["tokyo", "berlin"]}))]
        );
    }

    #[test]
    fn test_weather_without_city() {
        let steps = parse_weather("weather please").unwrap();
        assert_eq!(steps[0].args["cities"], json!(["unknown"]));
    }

    #[test]
    fn test_keyword_must_be_a_word() {
        assert!(parse_weather("weathered stones in paris").unwrap().is_empty());
        assert!(parse_weather("temperature in paris").unwrap().is_empty());
    }
}

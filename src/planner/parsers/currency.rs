//! Currency conversion parser
//!
//! "convert [the] [AGG of] AMOUNT(s) CUR to|into|in CUR". A single amount
//! becomes one `fx` step. Several amounts are first reduced by a `calc` step
//! and the `fx` step takes the reduced value from the working set.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use super::{capture, parse_number, ParseError};
use crate::types::{Aggregate, CalcArgs, RawStep, ToolId};

static CONVERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\bconvert\s+(?:the\s+)?(?:(average|avg|sum|total|maximum|max|minimum|min)\s+of\s+)?((?:\d+(?:\.\d+)?(?:\s*,\s*|\s+and\s+|\s+)?)+)\s*([a-z]{3})\s+(?:to|into|in)\s+([a-z]{3})\b",
    )
    .unwrap()
});

// "1,000" is one amount; "5, 7" and "5,7" are two
static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,3}(?:,\d{3})+(?:\.\d+)?\b|\d+(?:\.\d+)?").unwrap()
});

/// Parse conversion requests into `fx` steps, with a `calc` reduction first
/// when several amounts are given
pub fn parse_currency(text: &str) -> Result<Vec<RawStep>, ParseError> {
    if !text.to_lowercase().contains("convert") {
        return Ok(Vec::new());
    }

    let Some(caps) = CONVERSION_PATTERN.captures(text) else {
        tracing::debug!("convert keyword present but no conversion pattern matched");
        return Ok(Vec::new());
    };

    let operation = caps
        .get(1)
        .and_then(|m| Aggregate::from_keyword(m.as_str()))
        .unwrap_or_default();
    let amounts = AMOUNT_PATTERN
        .find_iter(capture(&caps, 2, "conversion")?)
        .map(|m| parse_number(&m.as_str().replace(',', "")))
        .collect::<Result<Vec<f64>, _>>()?;
    let from_currency = capture(&caps, 3, "conversion")?.to_uppercase();
    let to_currency = capture(&caps, 4, "conversion")?.to_uppercase();

    let steps = match amounts.len() {
        0 => Vec::new(),
        1 => vec![RawStep::new(
            ToolId::Currency,
            json!({
                "amount": amounts[0],
                "from_currency": from_currency,
                "to_currency": to_currency
            }),
        )],
        _ => {
            let reduce = serde_json::to_value(CalcArgs::reduce(amounts, operation))
                .unwrap_or(Value::Null);
            vec![
                RawStep::new(ToolId::Calc, reduce),
                RawStep::new(
                    ToolId::Currency,
                    json!({
                        "amount": null,
                        "from_currency": from_currency,
                        "to_currency": to_currency
                    }),
                ),
            ]
        }
    };

    tracing::debug!(steps = steps.len(), %from_currency, %to_currency, "currency parser matched");
    Ok(steps)
}

//! Arithmetic parser
//!
//! Recognizes three shapes:
//! - percentage-of: "12.5% of 243", always collected
//! - binary: "8 / 2", "3 times 4", "10 divided by 5", one step per match
//! - imperative: "add 10 and multiply by 2", joined into one relative
//!   expression "+ 10 and * 2"; only used when no binary expression matched

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{capture, parse_number, ParseError};
use crate::types::{CalcArgs, RawStep, ToolId};

const NUMBER: &str = r"(\d+(?:\.\d+)?)";

static PERCENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"{NUMBER}\s*%\s*of\s*{NUMBER}")).unwrap());

static BINARY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i){NUMBER}\s*(\b(?:add|plus|sum|subtract|minus|multiply|times|divided|divide)\b|[-+*/×÷−])\s*(?:by\s+)?{NUMBER}"
    ))
    .unwrap()
});

static IMPERATIVE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(add|plus|sum|subtract|minus|multiply|times|divided|divide)\b\s*(?:by\s*)?{NUMBER}"
    ))
    .unwrap()
});

/// Map an operator word or symbol to its ASCII symbol
fn operator_symbol(op: &str) -> Option<&'static str> {
    match op.to_lowercase().as_str() {
        "add" | "plus" | "sum" | "+" => Some("+"),
        "subtract" | "minus" | "-" | "−" => Some("-"),
        "multiply" | "times" | "*" | "×" => Some("*"),
        "divide" | "divided" | "/" | "÷" => Some("/"),
        _ => None,
    }
}

fn symbol(op: &str) -> Result<&'static str, ParseError> {
    operator_symbol(op).ok_or_else(|| ParseError::UnknownOperator(op.to_string()))
}

fn expression_step(expr: String) -> RawStep {
    let args = serde_json::to_value(CalcArgs::expression(expr)).unwrap_or(Value::Null);
    RawStep::new(ToolId::Calc, args)
}

fn parse_percent(text: &str) -> Result<Vec<RawStep>, ParseError> {
    PERCENT_PATTERN
        .captures_iter(text)
        .map(|caps| -> Result<RawStep, ParseError> {
            let share = parse_number(capture(&caps, 1, "percent")?)?;
            let base = parse_number(capture(&caps, 2, "percent")?)?;
            Ok(expression_step(format!("{}% of {}", share, base)))
        })
        .collect()
}

fn parse_binary(text: &str) -> Result<Vec<RawStep>, ParseError> {
    BINARY_PATTERN
        .captures_iter(text)
        .map(|caps| -> Result<RawStep, ParseError> {
            let lhs = parse_number(capture(&caps, 1, "binary")?)?;
            let op = symbol(capture(&caps, 2, "binary")?)?;
            let rhs = parse_number(capture(&caps, 3, "binary")?)?;
            Ok(expression_step(format!("{} {} {}", lhs, op, rhs)))
        })
        .collect()
}

fn parse_imperative(text: &str) -> Result<Option<RawStep>, ParseError> {
    let mut ops = Vec::new();
    for caps in IMPERATIVE_PATTERN.captures_iter(text) {
        let op = symbol(capture(&caps, 1, "imperative")?)?;
        let operand = parse_number(capture(&caps, 2, "imperative")?)?;
        ops.push(format!("{} {}", op, operand));
    }
    if ops.is_empty() {
        return Ok(None);
    }
    Ok(Some(expression_step(ops.join(" and "))))
}

/// Parse arithmetic requests into `calc` steps
pub fn parse_calc(text: &str) -> Result<Vec<RawStep>, ParseError> {
    if !text.chars().any(|c| c.is_ascii_digit()) {
        return Ok(Vec::new());
    }

    let mut steps = parse_percent(text)?;

    let binary = parse_binary(text)?;
    if binary.is_empty() {
        steps.extend(parse_imperative(text)?);
    } else {
        steps.extend(binary);
    }

    tracing::debug!(steps = steps.len(), "calc parser finished");
    Ok(steps)
}

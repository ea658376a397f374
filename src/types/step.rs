//! Step type definitions
//!
//! A Step is one tool invocation with an argument record that has already been
//! validated against the tool's schema. Parsers never build Steps directly;
//! they emit [`RawStep`]s that the tool registry turns into Steps.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Closed set of tools the agent knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolId {
    Temperature,
    Weather,
    #[serde(rename = "fx")]
    Currency,
    Kb,
    Calc,
}

impl ToolId {
    /// Every tool, in default registration order
    pub const ALL: [ToolId; 5] = [
        ToolId::Temperature,
        ToolId::Weather,
        ToolId::Currency,
        ToolId::Kb,
        ToolId::Calc,
    ];

    /// Stable wire name of the tool
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolId::Temperature => "temperature",
            ToolId::Weather => "weather",
            ToolId::Currency => "fx",
            ToolId::Kb => "kb",
            ToolId::Calc => "calc",
        }
    }

    /// Resolve a wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == name)
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduction applied across a set of values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregate {
    /// No reduction: one value per entity
    #[default]
    Single,
    #[serde(alias = "avg")]
    Average,
    #[serde(alias = "sum")]
    Total,
    #[serde(alias = "max")]
    Maximum,
    #[serde(alias = "min")]
    Minimum,
}

impl Aggregate {
    /// Map a query keyword to an aggregate
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.trim().to_ascii_lowercase().as_str() {
            "single" => Some(Self::Single),
            "average" | "avg" => Some(Self::Average),
            "total" | "sum" => Some(Self::Total),
            "maximum" | "max" => Some(Self::Maximum),
            "minimum" | "min" => Some(Self::Minimum),
            _ => None,
        }
    }

    /// Display label used as the entity name of an aggregated value
    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Average => "Average",
            Self::Total => "Total",
            Self::Maximum => "Maximum",
            Self::Minimum => "Minimum",
        }
    }

    /// Reduce a list of values. `Single` keeps the first value.
    /// Returns `None` for an empty list.
    pub fn apply(&self, values: &[f64]) -> Option<f64> {
        let first = *values.first()?;
        let result = match self {
            Self::Single => first,
            Self::Average => values.iter().sum::<f64>() / values.len() as f64,
            Self::Total => values.iter().sum(),
            Self::Maximum => values.iter().copied().fold(first, f64::max),
            Self::Minimum => values.iter().copied().fold(first, f64::min),
        };
        Some(result)
    }
}

/// Shared behaviour of the per-tool argument records
trait ArgsRecord: DeserializeOwned + Serialize + Sized {
    /// Check semantic constraints and normalize field values
    fn validated(self) -> Result<Self, String>;
}

fn parse_record<T: ArgsRecord>(raw: Value) -> Result<T, String> {
    let record: T = serde_json::from_value(raw).map_err(|e| e.to_string())?;
    record.validated()
}

fn normalize_cities(cities: Vec<String>) -> Result<Vec<String>, String> {
    if cities.is_empty() {
        return Err("cities must not be empty".to_string());
    }
    Ok(cities
        .into_iter()
        .map(|c| c.trim().to_lowercase())
        .collect())
}

/// Arguments for the arithmetic tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalcArgs {
    /// Operands for a list reduction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbers: Option<Vec<f64>>,
    /// Reduction applied to `numbers`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Aggregate>,
    /// Free-text arithmetic expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expr: Option<String>,
}

impl CalcArgs {
    pub fn expression(expr: impl Into<String>) -> Self {
        Self {
            expr: Some(expr.into()),
            ..Self::default()
        }
    }

    pub fn reduce(numbers: Vec<f64>, operation: Aggregate) -> Self {
        Self {
            numbers: Some(numbers),
            operation: Some(operation),
            expr: None,
        }
    }
}

impl ArgsRecord for CalcArgs {
    fn validated(mut self) -> Result<Self, String> {
        if let Some(expr) = &self.expr {
            let trimmed = expr.trim();
            if trimmed.is_empty() {
                return Err("expr must not be empty".to_string());
            }
            self.expr = Some(trimmed.to_string());
        }
        if let Some(numbers) = &self.numbers {
            if numbers.iter().any(|n| !n.is_finite()) {
                return Err("numbers must be finite".to_string());
            }
        }
        let has_reduction = matches!(&self.numbers, Some(n) if !n.is_empty())
            && self.operation.is_some();
        if self.expr.is_none() && !has_reduction {
            return Err("either expr or non-empty numbers with an operation is required".to_string());
        }
        Ok(self)
    }
}

/// Arguments for the temperature tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemperatureArgs {
    pub cities: Vec<String>,
    #[serde(default)]
    pub operation: Aggregate,
}

impl ArgsRecord for TemperatureArgs {
    fn validated(mut self) -> Result<Self, String> {
        self.cities = normalize_cities(self.cities)?;
        Ok(self)
    }
}

/// Arguments for the weather tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherArgs {
    pub cities: Vec<String>,
}

impl ArgsRecord for WeatherArgs {
    fn validated(mut self) -> Result<Self, String> {
        self.cities = normalize_cities(self.cities)?;
        Ok(self)
    }
}

/// Arguments for the currency conversion tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurrencyArgs {
    /// Amount to convert; `None` defers to the previous numeric result
    #[serde(default)]
    pub amount: Option<f64>,
    pub from_currency: String,
    pub to_currency: String,
}

impl ArgsRecord for CurrencyArgs {
    fn validated(mut self) -> Result<Self, String> {
        if let Some(amount) = self.amount {
            if !amount.is_finite() {
                return Err("amount must be finite".to_string());
            }
        }
        for code in [&mut self.from_currency, &mut self.to_currency] {
            let normalized = code.trim().to_ascii_uppercase();
            if normalized.len() != 3 || !normalized.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(format!("invalid currency code '{}'", code));
            }
            *code = normalized;
        }
        Ok(self)
    }
}

/// Arguments for the knowledge-base lookup tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KbArgs {
    pub q: String,
}

impl ArgsRecord for KbArgs {
    fn validated(mut self) -> Result<Self, String> {
        let trimmed = self.q.trim();
        if trimmed.is_empty() {
            return Err("q must not be empty".to_string());
        }
        self.q = trimmed.to_string();
        Ok(self)
    }
}

/// Validated argument payload, one variant per tool
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tool", content = "args", rename_all = "snake_case")]
pub enum ToolArgs {
    Temperature(TemperatureArgs),
    Weather(WeatherArgs),
    #[serde(rename = "fx")]
    Currency(CurrencyArgs),
    Kb(KbArgs),
    Calc(CalcArgs),
}

impl ToolArgs {
    /// The tool this payload belongs to
    pub fn tool(&self) -> ToolId {
        match self {
            ToolArgs::Temperature(_) => ToolId::Temperature,
            ToolArgs::Weather(_) => ToolId::Weather,
            ToolArgs::Currency(_) => ToolId::Currency,
            ToolArgs::Kb(_) => ToolId::Kb,
            ToolArgs::Calc(_) => ToolId::Calc,
        }
    }

    /// Deserialize and validate raw arguments into the schema of `tool`
    pub fn from_raw(tool: ToolId, raw: Value) -> Result<Self, String> {
        let raw = if raw.is_null() {
            Value::Object(Default::default())
        } else {
            raw
        };
        Ok(match tool {
            ToolId::Temperature => ToolArgs::Temperature(parse_record(raw)?),
            ToolId::Weather => ToolArgs::Weather(parse_record(raw)?),
            ToolId::Currency => ToolArgs::Currency(parse_record(raw)?),
            ToolId::Kb => ToolArgs::Kb(parse_record(raw)?),
            ToolId::Calc => ToolArgs::Calc(parse_record(raw)?),
        })
    }

    /// Serialize back into the raw form a parser would emit
    pub fn to_raw(&self) -> RawStep {
        let args = match self {
            ToolArgs::Temperature(a) => serde_json::to_value(a),
            ToolArgs::Weather(a) => serde_json::to_value(a),
            ToolArgs::Currency(a) => serde_json::to_value(a),
            ToolArgs::Kb(a) => serde_json::to_value(a),
            ToolArgs::Calc(a) => serde_json::to_value(a),
        };
        RawStep::new(self.tool(), args.unwrap_or(Value::Null))
    }
}

/// Unvalidated candidate step produced by a parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStep {
    /// Tool wire name
    pub tool: String,
    /// Arguments, validated later against the tool's schema
    #[serde(default)]
    pub args: Value,
}

impl RawStep {
    pub fn new(tool: ToolId, args: Value) -> Self {
        Self {
            tool: tool.as_str().to_string(),
            args,
        }
    }
}

/// A single validated step in a plan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Step {
    args: ToolArgs,
}

impl Step {
    /// Steps are only built from validated arguments
    pub(crate) fn new(args: ToolArgs) -> Self {
        Self { args }
    }

    pub fn tool(&self) -> ToolId {
        self.args.tool()
    }

    pub fn args(&self) -> &ToolArgs {
        &self.args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_tool_names_round_trip() {
        for id in ToolId::ALL {
            assert_eq!(ToolId::from_name(id.as_str()), Some(id));
        }
        assert_eq!(ToolId::from_name("currency"), None);
    }

    #[test]
    fn test_aggregate_keywords_and_reductions() {
        assert_eq!(Aggregate::from_keyword("avg"), Some(Aggregate::Average));
        assert_eq!(Aggregate::from_keyword("SUM"), Some(Aggregate::Total));
        assert_eq!(Aggregate::from_keyword("median"), None);

        let values = [18.0, 17.0, 31.0];
        assert_eq!(Aggregate::Single.apply(&values), Some(18.0));
        assert_eq!(Aggregate::Total.apply(&values), Some(66.0));
        assert_eq!(Aggregate::Average.apply(&values), Some(22.0));
        assert_eq!(Aggregate::Maximum.apply(&values), Some(31.0));
        assert_eq!(Aggregate::Minimum.apply(&values), Some(17.0));
        assert_eq!(Aggregate::Average.apply(&[]), None);
    }

    #[test]
    fn test_temperature_args_default_operation() {
        let args = ToolArgs::from_raw(ToolId::Temperature, json!({"cities": [" Paris "]})).unwrap();
        assert_eq!(
            args,
            ToolArgs::Temperature(TemperatureArgs {
                cities: vec!["paris".to_string()],
                operation: Aggregate::Single,
            })
        );
    }

    #[test]
    fn test_calc_args_require_expr_or_reduction() {
        assert!(ToolArgs::from_raw(ToolId::Calc, json!({})).is_err());
        assert!(ToolArgs::from_raw(ToolId::Calc, json!({"numbers": [1.0]})).is_err());
        assert!(ToolArgs::from_raw(ToolId::Calc, json!({"expr": "   "})).is_err());
        assert!(
            ToolArgs::from_raw(ToolId::Calc, json!({"numbers": [1.0, 2.0], "operation": "avg"}))
                .is_ok()
        );
    }

    #[test]
    fn test_unknown_fields_and_wrong_types_are_rejected() {
        let err = ToolArgs::from_raw(ToolId::Kb, json!({"q": "ada", "extra": 1})).unwrap_err();
        assert!(err.contains("unknown field"));
        assert!(ToolArgs::from_raw(ToolId::Weather, json!({"cities": "paris"})).is_err());
    }

    #[test]
    fn test_currency_codes_are_normalized() {
        let args = ToolArgs::from_raw(
            ToolId::Currency,
            json!({"amount": 10.0, "from_currency": "usd", "to_currency": "eur"}),
        )
        .unwrap();
        match args {
            ToolArgs::Currency(fx) => {
                assert_eq!(fx.from_currency, "USD");
                assert_eq!(fx.to_currency, "EUR");
            }
            other => panic!("unexpected args: {:?}", other),
        }
        assert!(ToolArgs::from_raw(
            ToolId::Currency,
            json!({"from_currency": "dollars", "to_currency": "EUR"})
        )
        .is_err());
    }

    #[test]
    fn test_to_raw_revalidates_to_same_args() {
        let original = ToolArgs::Calc(CalcArgs::reduce(vec![10.0, 20.0], Aggregate::Average));
        let raw = original.to_raw();
        assert_eq!(raw.tool, "calc");
        assert_eq!(ToolArgs::from_raw(ToolId::Calc, raw.args).unwrap(), original);
    }

    #[test]
    fn test_step_serializes_with_tool_tag() {
        let step = Step::new(ToolArgs::Kb(KbArgs {
            q: "ada lovelace".to_string(),
        }));
        assert_eq!(
            serde_json::to_value(&step).unwrap(),
            json!({"tool": "kb", "args": {"q": "ada lovelace"}})
        );
    }
}

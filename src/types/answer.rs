//! Answer type definition

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Value produced by a tool, and finally by the agent
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Answer {
    /// No result
    #[default]
    Absent,
    /// Scalar number
    Number(f64),
    /// Free text
    Text(String),
    /// Entity name -> rendered value, in first-mention order
    Entities(IndexMap<String, String>),
}

impl Answer {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_entities(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Self::Entities(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("None"),
            Self::Number(n) => f.write_str(&format_decimal(*n)),
            Self::Text(s) => f.write_str(s),
            Self::Entities(map) => {
                let rendered: Vec<String> =
                    map.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                f.write_str(&rendered.join(", "))
            }
        }
    }
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Render a computed number, always with at least one decimal place
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

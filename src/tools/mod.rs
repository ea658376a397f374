//! Built-in tool handlers
//!
//! Every handler has the shape
//! `fn(&Args, &mut ToolContext) -> Result<Answer, ToolError>`.
//! Expected misses (unknown city, unknown name, unsupported currency pair)
//! produce fallback answers; errors are reserved for faults that abort the plan.

pub mod calc;
pub mod currency;
pub mod expression;
pub mod kb;
pub mod temperature;
pub mod weather;

use crate::tool::{ToolContext, ToolError};
use crate::types::{Answer, ToolArgs};

/// Unit suffix of temperature readings
pub const CELSIUS: &str = "°C";

/// Run the handler bound to the argument variant
pub fn dispatch(args: &ToolArgs, ctx: &mut ToolContext<'_>) -> Result<Answer, ToolError> {
    match args {
        ToolArgs::Temperature(a) => temperature::handle(a, ctx),
        ToolArgs::Weather(a) => weather::handle(a, ctx),
        ToolArgs::Currency(a) => currency::handle(a, ctx),
        ToolArgs::Kb(a) => kb::handle(a, ctx),
        ToolArgs::Calc(a) => calc::handle(a, ctx),
    }
}

/// "new york" -> "New York"
pub(crate) fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("dhaka"), "Dhaka");
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case(""), "");
    }
}

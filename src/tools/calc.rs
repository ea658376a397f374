//! Arithmetic tool
//!
//! Dispatch order:
//! 1. relative expression with entity readings in the working set: applied
//!    to every reading
//! 2. `numbers` + `operation`: list reduction
//! 3. relative expression without readings: applied to the last number.
//!    With no last number only `+`/`-` chains start from zero.
//! 4. absolute expression: evaluated as is

use indexmap::IndexMap;

use super::expression::{apply_relative, evaluate, is_relative};
use crate::store::EntityReadings;
use crate::tool::{ToolContext, ToolError};
use crate::types::{format_decimal, Aggregate, Answer, CalcArgs};

pub fn handle(args: &CalcArgs, ctx: &mut ToolContext<'_>) -> Result<Answer, ToolError> {
    tracing::debug!(?args, "calc called");

    if let Some(expr) = args.expr.as_deref().filter(|e| is_relative(e)) {
        if let Some(readings) = ctx
            .working_set
            .entity_readings()
            .filter(|r| !r.is_empty())
            .cloned()
        {
            return apply_to_readings(expr, readings, ctx);
        }
    }

    if let (Some(numbers), Some(operation)) = (&args.numbers, args.operation) {
        return reduce(numbers, operation, ctx);
    }

    match args.expr.as_deref() {
        Some(expr) if is_relative(expr) => {
            let base = relative_base(expr, ctx.working_set.last_number())?;
            let result = apply_relative(base, expr)?;
            ctx.working_set.set_last_number(result);
            tracing::info!(base, expr, result, "calc applied to last result");
            Ok(Answer::Number(result))
        }
        Some(expr) => {
            let result = evaluate(expr)?;
            ctx.working_set.set_last_number(result);
            tracing::info!(expr, result, "calc evaluated");
            Ok(Answer::Number(result))
        }
        None => Err(ToolError::InvalidArgument(
            "calc needs an expression or numbers with an operation".to_string(),
        )),
    }
}

fn relative_base(expr: &str, last_number: Option<f64>) -> Result<f64, ToolError> {
    match last_number {
        Some(base) => Ok(base),
        None if matches!(expr.trim_start().chars().next(), Some('+' | '-' | '−')) => Ok(0.0),
        None => Err(ToolError::Domain(format!(
            "'{}' needs a previous result to apply to",
            expr.trim()
        ))),
    }
}

fn apply_to_readings(
    expr: &str,
    readings: EntityReadings,
    ctx: &mut ToolContext<'_>,
) -> Result<Answer, ToolError> {
    let mut updated = EntityReadings::new(readings.unit.clone());
    for (name, value) in &readings.values {
        updated.insert(name.clone(), apply_relative(*value, expr)?);
    }

    if let Some(first) = updated.first() {
        ctx.working_set.set_last_number(first);
    }
    tracing::info!(expr, readings = ?updated.values, "calc applied to entity readings");

    let rendered: IndexMap<String, String> = updated
        .values
        .iter()
        .map(|(name, value)| (name.clone(), format!("{}{}", format_decimal(*value), updated.unit)))
        .collect();
    ctx.working_set.set_entity_readings(updated);

    Ok(match rendered.len() {
        1 => Answer::Text(rendered.into_values().next().unwrap_or_default()),
        _ => Answer::Entities(rendered),
    })
}

fn reduce(
    numbers: &[f64],
    operation: Aggregate,
    ctx: &mut ToolContext<'_>,
) -> Result<Answer, ToolError> {
    let result = operation
        .apply(numbers)
        .ok_or_else(|| ToolError::InvalidArgument("numbers must not be empty".to_string()))?;
    ctx.working_set.set_last_number(result);
    tracing::info!(?numbers, ?operation, result, "calc reduced numbers");
    Ok(Answer::Number(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ReferenceData, WorkingSet};
    use crate::tool::ArithmeticError;
    use pretty_assertions::assert_eq;

    fn run(args: CalcArgs, ws: &mut WorkingSet) -> Result<Answer, ToolError> {
        let reference = ReferenceData::builtin();
        let mut ctx = ToolContext::new(ws, &reference);
        handle(&args, &mut ctx)
    }

    #[test]
    fn test_absolute_expression_sets_last_number() {
        let mut ws = WorkingSet::new();
        assert_eq!(run(CalcArgs::expression("8 / 2"), &mut ws), Ok(Answer::Number(4.0)));
        assert_eq!(ws.last_number(), Some(4.0));
    }

    #[test]
    fn test_division_by_zero_is_an_error() {
        let mut ws = WorkingSet::new();
        assert_eq!(
            run(CalcArgs::expression("8 / 0"), &mut ws),
            Err(ToolError::Arithmetic(ArithmeticError::DivisionByZero))
        );
        assert!(ws.is_empty());
    }

    #[test]
    fn test_relative_expression_on_single_reading() {
        let mut ws = WorkingSet::new();
        ws.set_entity_readings(EntityReadings::single("Average", 17.5, "°C"));

        let answer = run(CalcArgs::expression("+ 10"), &mut ws).unwrap();
        assert_eq!(answer, Answer::Text("27.5°C".to_string()));
        assert_eq!(ws.last_number(), Some(27.5));
        assert_eq!(ws.entity_readings().and_then(|r| r.first()), Some(27.5));
    }

    #[test]
    fn test_relative_expression_on_many_readings() {
        let mut ws = WorkingSet::new();
        let mut readings = EntityReadings::new("°C");
        readings.insert("Paris", 18.0);
        readings.insert("London", 17.0);
        ws.set_entity_readings(readings);

        let answer = run(CalcArgs::expression("* 2"), &mut ws).unwrap();
        let mut expected = IndexMap::new();
        expected.insert("Paris".to_string(), "36.0°C".to_string());
        expected.insert("London".to_string(), "34.0°C".to_string());
        assert_eq!(answer, Answer::Entities(expected));
    }

    #[test]
    fn test_reduction() {
        let mut ws = WorkingSet::new();
        let answer = run(CalcArgs::reduce(vec![10.0, 20.0], Aggregate::Average), &mut ws);
        assert_eq!(answer, Ok(Answer::Number(15.0)));
        assert_eq!(ws.last_number(), Some(15.0));

        let answer = run(CalcArgs::reduce(vec![10.0, 20.0], Aggregate::Single), &mut ws);
        assert_eq!(answer, Ok(Answer::Number(10.0)));
    }

    #[test]
    fn test_relative_expression_uses_last_number_or_zero() {
        let mut ws = WorkingSet::new();
        assert_eq!(run(CalcArgs::expression("+ 10"), &mut ws), Ok(Answer::Number(10.0)));
        assert_eq!(
            run(CalcArgs::expression("* 3 and - 5"), &mut ws),
            Ok(Answer::Number(25.0))
        );
    }

    #[test]
    fn test_scaling_without_previous_result_is_an_error() {
        let mut ws = WorkingSet::new();
        assert!(matches!(
            run(CalcArgs::expression("* 3"), &mut ws),
            Err(ToolError::Domain(_))
        ));
        assert!(matches!(
            run(CalcArgs::expression("/ 4 and + 1"), &mut ws),
            Err(ToolError::Domain(_))
        ));
        assert_eq!(ws.last_number(), None);

        assert_eq!(run(CalcArgs::expression("+ 2"), &mut ws), Ok(Answer::Number(2.0)));
        assert_eq!(run(CalcArgs::expression("* 3"), &mut ws), Ok(Answer::Number(6.0)));
    }

    #[test]
    fn test_absolute_expression_ignores_readings() {
        let mut ws = WorkingSet::new();
        ws.set_entity_readings(EntityReadings::single("Paris", 18.0, "°C"));
        assert_eq!(run(CalcArgs::expression("2 + 2"), &mut ws), Ok(Answer::Number(4.0)));
    }
}

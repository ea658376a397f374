//! Temperature tool

use indexmap::IndexMap;

use super::{title_case, CELSIUS};
use crate::store::EntityReadings;
use crate::tool::{ToolContext, ToolError};
use crate::types::{round_to, Aggregate, Answer, TemperatureArgs};

fn reading(value: f64) -> String {
    format!("{}{}", value, CELSIUS)
}

pub fn handle(args: &TemperatureArgs, ctx: &mut ToolContext<'_>) -> Result<Answer, ToolError> {
    let reference = ctx.reference;

    let mut known = EntityReadings::new(CELSIUS);
    for city in &args.cities {
        match reference.temperature(city) {
            Some(value) => known.insert(title_case(city), value),
            None => tracing::debug!(%city, "no temperature data for city"),
        }
    }

    if known.is_empty() {
        let city = reference.default_city();
        let value = reference.temperature(city).ok_or_else(|| {
            ToolError::Domain(format!("default city '{}' has no temperature data", city))
        })?;
        let name = title_case(city);
        tracing::info!(cities = ?args.cities, default = %name, "temperature fallback to default city");
        ctx.working_set
            .set_entity_readings(EntityReadings::single(name.clone(), value, CELSIUS));
        return Ok(Answer::Text(format!(
            "Temperature data unavailable. Default for {}: {}",
            name,
            reading(value)
        )));
    }

    if args.operation == Aggregate::Single {
        let rendered: IndexMap<String, String> = known
            .values
            .iter()
            .map(|(name, value)| (name.clone(), reading(*value)))
            .collect();
        tracing::info!(readings = ?rendered, "temperature lookup");
        ctx.working_set.set_entity_readings(known);
        return Ok(match rendered.len() {
            1 => Answer::Text(rendered.into_values().next().unwrap_or_default()),
            _ => Answer::Entities(rendered),
        });
    }

    let values: Vec<f64> = known.values.values().copied().collect();
    let value = args
        .operation
        .apply(&values)
        .map(|v| round_to(v, 1))
        .ok_or_else(|| ToolError::Unexpected("no readings to aggregate".to_string()))?;
    tracing::info!(operation = ?args.operation, value, "temperature aggregate");
    ctx.working_set.set_entity_readings(EntityReadings::single(
        args.operation.label(),
        value,
        CELSIUS,
    ));
    Ok(Answer::Text(reading(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::parsers::UNRESOLVED_CITY;
    use crate::store::{ReferenceData, WorkingSet};
    use pretty_assertions::assert_eq;

    fn args(cities: &[&str], operation: Aggregate) -> TemperatureArgs {
        TemperatureArgs {
            cities: cities.iter().map(|c| c.to_string()).collect(),
            operation,
        }
    }

    fn run(args: TemperatureArgs, ws: &mut WorkingSet) -> Answer {
        let reference = ReferenceData::builtin();
        let mut ctx = ToolContext::new(ws, &reference);
        handle(&args, &mut ctx).unwrap()
    }

    #[test]
    fn test_single_city() {
        let mut ws = WorkingSet::new();
        assert_eq!(
            run(args(&["paris"], Aggregate::Single), &mut ws),
            Answer::Text("18°C".to_string())
        );
        assert_eq!(ws.entity_readings().and_then(|r| r.first()), Some(18.0));
    }

    #[test]
    fn test_several_cities_in_order() {
        let mut ws = WorkingSet::new();
        let answer = run(args(&["paris", "london"], Aggregate::Single), &mut ws);
        let mut expected = IndexMap::new();
        expected.insert("Paris".to_string(), "18°C".to_string());
        expected.insert("London".to_string(), "17°C".to_string());
        assert_eq!(answer, Answer::Entities(expected));
    }

    #[test]
    fn test_average() {
        let mut ws = WorkingSet::new();
        let answer = run(args(&["paris", "london"], Aggregate::Average), &mut ws);
        assert_eq!(answer, Answer::Text("17.5°C".to_string()));
        let readings = ws.entity_readings().unwrap();
        assert_eq!(readings.values.get("Average"), Some(&17.5));
    }

    #[test]
    fn test_unknown_single_city_falls_back_to_default() {
        let mut ws = WorkingSet::new();
        let answer = run(args(&[UNRESOLVED_CITY], Aggregate::Single), &mut ws);
        assert_eq!(
            answer,
            Answer::Text("Temperature data unavailable. Default for Dhaka: 31°C".to_string())
        );
        assert_eq!(ws.entity_readings().and_then(|r| r.first()), Some(31.0));
    }

    #[test]
    fn test_unknown_cities_among_several_are_skipped() {
        let mut ws = WorkingSet::new();
        let answer = run(args(&["atlantis", "tokyo"], Aggregate::Maximum), &mut ws);
        assert_eq!(answer, Answer::Text("24°C".to_string()));
    }
}

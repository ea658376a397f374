//! Weather tool

use indexmap::IndexMap;

use super::title_case;
use crate::tool::{ToolContext, ToolError};
use crate::types::{Answer, WeatherArgs};

pub fn handle(args: &WeatherArgs, ctx: &mut ToolContext<'_>) -> Result<Answer, ToolError> {
    let reference = ctx.reference;

    let mut known: IndexMap<String, String> = IndexMap::new();
    for city in &args.cities {
        if let Some(description) = reference.weather(city) {
            known.insert(title_case(city), description.to_string());
        }
    }

    if known.is_empty() {
        let city = reference.default_city();
        let description = reference.weather(city).ok_or_else(|| {
            ToolError::Domain(format!("default city '{}' has no weather data", city))
        })?;
        let name = title_case(city);
        tracing::info!(cities = ?args.cities, default = %name, "weather fallback to default city");
        let answer = format!("Weather data unavailable. Default for {}: {}", name, description);
        let mut fallback = IndexMap::new();
        fallback.insert(name, description.to_string());
        ctx.working_set.set_last_weather(fallback);
        return Ok(Answer::Text(answer));
    }

    tracing::info!(weather = ?known, "weather lookup");
    ctx.working_set.set_last_weather(known.clone());
    Ok(if known.len() == 1 {
        Answer::Text(known.into_values().next().unwrap_or_default())
    } else {
        Answer::Entities(known)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ReferenceData, WorkingSet};
    use pretty_assertions::assert_eq;

    fn run(cities: &[&str], ws: &mut WorkingSet) -> Answer {
        let reference = ReferenceData::builtin();
        let mut ctx = ToolContext::new(ws, &reference);
        let args = WeatherArgs {
            cities: cities.iter().map(|c| c.to_string()).collect(),
        };
        handle(&args, &mut ctx).unwrap()
    }

    #[test]
    fn test_single_city() {
        let mut ws = WorkingSet::new();
        assert_eq!(run(&["london"], &mut ws), Answer::Text("Cool and rainy.".to_string()));
        assert_eq!(
            ws.last_weather().and_then(|w| w.get("London")).map(String::as_str),
            Some("Cool and rainy.")
        );
    }

    #[test]
    fn test_several_cities() {
        let mut ws = WorkingSet::new();
        let answer = run(&["tokyo", "atlantis", "berlin"], &mut ws);
        let map = answer.as_entities().unwrap();
        let names: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Tokyo", "Berlin"]);
    }

    #[test]
    fn test_one_known_city_among_unknown_is_text() {
        let mut ws = WorkingSet::new();
        assert_eq!(
            run(&["atlantis", "london"], &mut ws),
            Answer::Text("Cool and rainy.".to_string())
        );
    }

    #[test]
    fn test_unknown_city_falls_back_to_default() {
        let mut ws = WorkingSet::new();
        assert_eq!(
            run(&["unknown"], &mut ws),
            Answer::Text("Weather data unavailable. Default for Dhaka: Hot and humid.".to_string())
        );
    }
}

//! WorkingSet - typed slots shared by the steps of one plan execution

use indexmap::IndexMap;
use serde::Serialize;

/// Numeric reading per entity, e.g. the temperature per city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityReadings {
    /// Unit suffix used when the readings are rendered
    pub unit: String,
    /// Entity display name -> value, in first-mention order
    pub values: IndexMap<String, f64>,
}

impl EntityReadings {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            values: IndexMap::new(),
        }
    }

    /// Readings holding exactly one entity
    pub fn single(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        let mut readings = Self::new(unit);
        readings.insert(name, value);
        readings
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn first(&self) -> Option<f64> {
        self.values.values().next().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Working set - intermediate values threaded through one plan execution.
///
/// Created empty when execution starts and dropped when it ends. Every slot
/// has one fixed type, so a reader always sees the shape the writer stored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkingSet {
    entity_readings: Option<EntityReadings>,
    last_number: Option<f64>,
    last_lookup: Option<String>,
    last_conversion: Option<f64>,
    last_weather: Option<IndexMap<String, String>>,
}

impl WorkingSet {
    /// Create a new empty working set
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Entity readings ============

    /// Per-entity readings written by the last entity lookup or calculation
    pub fn entity_readings(&self) -> Option<&EntityReadings> {
        self.entity_readings.as_ref()
    }

    pub fn set_entity_readings(&mut self, readings: EntityReadings) {
        self.entity_readings = Some(readings);
    }

    // ============ Scalar results ============

    /// Last calculation result, usable as an implicit operand
    pub fn last_number(&self) -> Option<f64> {
        self.last_number
    }

    pub fn set_last_number(&mut self, value: f64) {
        self.last_number = Some(value);
    }

    pub fn last_conversion(&self) -> Option<f64> {
        self.last_conversion
    }

    pub fn set_last_conversion(&mut self, value: f64) {
        self.last_conversion = Some(value);
    }

    // ============ Lookup caches ============

    pub fn last_lookup(&self) -> Option<&str> {
        self.last_lookup.as_deref()
    }

    pub fn set_last_lookup(&mut self, value: impl Into<String>) {
        self.last_lookup = Some(value.into());
    }

    pub fn last_weather(&self) -> Option<&IndexMap<String, String>> {
        self.last_weather.as_ref()
    }

    pub fn set_last_weather(&mut self, value: IndexMap<String, String>) {
        self.last_weather = Some(value);
    }

    /// True when no step has written anything yet
    pub fn is_empty(&self) -> bool {
        self.entity_readings.is_none()
            && self.last_number.is_none()
            && self.last_lookup.is_none()
            && self.last_conversion.is_none()
            && self.last_weather.is_none()
    }
}

//! ReferenceData - read-only lookup tables
//!
//! Loaded once at startup and shared by every request. Keys are lower-cased
//! names; lookups normalize their input the same way.

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::StoreError;
use crate::config::DataConfig;

/// Cities the entity parsers recognize, in table order
pub const SUPPORTED_CITIES: [&str; 6] = ["dhaka", "paris", "london", "tokyo", "berlin", "sydney"];

/// City substituted when a query names no known city
pub const DEFAULT_CITY: &str = "dhaka";

const TEMPERATURES_C: [(&str, f64); 6] = [
    ("dhaka", 31.0),
    ("paris", 18.0),
    ("london", 17.0),
    ("tokyo", 24.0),
    ("berlin", 15.0),
    ("sydney", 20.0),
];

const WEATHER_DESCRIPTIONS: [(&str, &str); 6] = [
    ("dhaka", "Hot and humid."),
    ("paris", "Mild and cloudy."),
    ("london", "Cool and rainy."),
    ("tokyo", "Warm and clear."),
    ("berlin", "Cold and windy."),
    ("sydney", "Sunny and breezy."),
];

/// Direct rates; the inverse direction is derived
const FX_RATES: [(&str, &str, f64); 6] = [
    ("usd", "eur", 0.91),
    ("usd", "gbp", 0.79),
    ("usd", "jpy", 150.0),
    ("usd", "bdt", 110.0),
    ("usd", "inr", 83.0),
    ("eur", "gbp", 0.86),
];

const BUNDLED_KB: &str = include_str!("../../data/kb.json");

/// One knowledge-base record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KbEntry {
    pub name: String,
    pub summary: String,
}

/// Knowledge-base file contents
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub entries: Vec<KbEntry>,
}

impl KnowledgeBase {
    /// Parse a knowledge base from JSON text
    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a knowledge base from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// The table shipped with the crate
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_KB).unwrap_or_else(|error| {
            tracing::error!(%error, "bundled knowledge base is malformed");
            Self::default()
        })
    }

    /// Case-insensitive exact match on the entry name
    pub fn lookup(&self, query: &str) -> Option<&KbEntry> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.name.to_lowercase() == needle)
    }
}

/// Read-only tables used by the tool handlers
#[derive(Debug, Clone)]
pub struct ReferenceData {
    temperatures: IndexMap<String, f64>,
    weather: IndexMap<String, String>,
    fx_rates: HashMap<(String, String), f64>,
    knowledge_base: KnowledgeBase,
    default_city: String,
}

impl ReferenceData {
    /// Built-in tables with the bundled knowledge base
    pub fn builtin() -> Self {
        Self {
            temperatures: TEMPERATURES_C
                .iter()
                .map(|(city, t)| (city.to_string(), *t))
                .collect(),
            weather: WEATHER_DESCRIPTIONS
                .iter()
                .map(|(city, d)| (city.to_string(), d.to_string()))
                .collect(),
            fx_rates: FX_RATES
                .iter()
                .map(|(from, to, rate)| ((from.to_string(), to.to_string()), *rate))
                .collect(),
            knowledge_base: KnowledgeBase::bundled(),
            default_city: DEFAULT_CITY.to_string(),
        }
    }

    /// Built-in tables, with an optional knowledge-base file and default city.
    ///
    /// A knowledge-base file that cannot be loaded is logged and the bundled
    /// table is kept. An unknown default city is rejected.
    pub fn load(kb_path: Option<&Path>, default_city: &str) -> Result<Self, StoreError> {
        let mut data = Self::builtin();

        if let Some(path) = kb_path {
            match KnowledgeBase::from_path(path) {
                Ok(kb) => {
                    tracing::info!(
                        path = %path.display(),
                        entries = kb.entries.len(),
                        "loaded knowledge base"
                    );
                    data.knowledge_base = kb;
                }
                Err(error) => {
                    tracing::error!(
                        path = %path.display(),
                        %error,
                        "failed to load knowledge base, using bundled entries"
                    );
                }
            }
        }

        data.set_default_city(default_city)?;
        Ok(data)
    }

    /// Tables for the `data` section of the configuration
    pub fn from_config(config: &DataConfig) -> Result<Self, StoreError> {
        Self::load(config.kb_path.as_deref(), &config.default_city)
    }

    fn set_default_city(&mut self, city: &str) -> Result<(), StoreError> {
        let city = city.trim().to_lowercase();
        if !self.temperatures.contains_key(&city) || !self.weather.contains_key(&city) {
            return Err(StoreError::Invalid(format!(
                "default city '{}' has no temperature or weather data",
                city
            )));
        }
        self.default_city = city;
        Ok(())
    }

    /// Replace the knowledge base
    pub fn with_knowledge_base(mut self, knowledge_base: KnowledgeBase) -> Self {
        self.knowledge_base = knowledge_base;
        self
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    pub fn temperature(&self, city: &str) -> Option<f64> {
        self.temperatures.get(&city.trim().to_lowercase()).copied()
    }

    pub fn weather(&self, city: &str) -> Option<&str> {
        self.weather
            .get(&city.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Conversion rate between two currency codes: direct, else inverse
    pub fn fx_rate(&self, from: &str, to: &str) -> Option<f64> {
        let from = from.trim().to_lowercase();
        let to = to.trim().to_lowercase();
        if let Some(rate) = self.fx_rates.get(&(from.clone(), to.clone())) {
            return Some(*rate);
        }
        self.fx_rates
            .get(&(to, from))
            .filter(|rate| **rate != 0.0)
            .map(|rate| 1.0 / rate)
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_every_supported_city_has_data() {
        let data = ReferenceData::builtin();
        for city in SUPPORTED_CITIES {
            assert!(data.temperature(city).is_some(), "{} temperature", city);
            assert!(data.weather(city).is_some(), "{} weather", city);
        }
    }

    #[test]
    fn test_lookups_are_case_insensitive() {
        let data = ReferenceData::builtin();
        assert_eq!(data.temperature("Paris"), Some(18.0));
        assert_eq!(data.weather(" LONDON "), Some("Cool and rainy."));
        assert_eq!(data.temperature("atlantis"), None);
    }

    #[test]
    fn test_fx_rate_direct_and_inverse() {
        let data = ReferenceData::builtin();
        assert_eq!(data.fx_rate("USD", "EUR"), Some(0.91));
        let inverse = data.fx_rate("EUR", "USD").unwrap();
        assert!((inverse - 1.0 / 0.91).abs() < 1e-12);
        assert_eq!(data.fx_rate("XYZ", "ABC"), None);
    }

    #[test]
    fn test_bundled_knowledge_base() {
        let kb = KnowledgeBase::bundled();
        let entry = kb.lookup("aDa LOVElace").expect("entry");
        assert_eq!(entry.name, "Ada Lovelace");
        assert!(kb.lookup("lace").is_none());
    }

    #[test]
    fn test_load_reads_kb_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"entries": [{{"name": "Edsger Dijkstra", "summary": "Shortest paths."}}]}}"#
        )
        .unwrap();

        let data = ReferenceData::load(Some(file.path()), "paris").unwrap();
        assert_eq!(data.default_city(), "paris");
        assert_eq!(
            data.knowledge_base().lookup("edsger dijkstra").map(|e| e.summary.as_str()),
            Some("Shortest paths.")
        );
        assert!(data.knowledge_base().lookup("ada lovelace").is_none());
    }

    #[test]
    fn test_load_falls_back_to_bundled_kb_on_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let data = ReferenceData::load(Some(file.path()), DEFAULT_CITY).unwrap();
        assert!(data.knowledge_base().lookup("ada lovelace").is_some());
    }

    #[test]
    fn test_from_default_config() {
        let data = ReferenceData::from_config(&DataConfig::default()).unwrap();
        assert_eq!(data.default_city(), DEFAULT_CITY);
        assert_eq!(data.temperature(DEFAULT_CITY), Some(31.0));
    }

    #[test]
    fn test_load_rejects_unknown_default_city() {
        let err = ReferenceData::load(None, "gotham").unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
    }
}

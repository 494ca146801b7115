use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::raw::RawReading;

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub city: String,
}

impl WeatherRequest {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

/// Air temperature in °C. A missing reading stays `Unknown` and is never
/// treated as 0 °C.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Temperature {
    Known(f64),
    #[default]
    Unknown,
}

impl Temperature {
    pub fn from_option(value: Option<f64>) -> Self {
        value.map_or(Temperature::Unknown, Temperature::Known)
    }

    pub fn celsius(&self) -> Option<f64> {
        match self {
            Temperature::Known(c) => Some(*c),
            Temperature::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Temperature::Known(_))
    }
}

impl From<Option<f64>> for Temperature {
    fn from(value: Option<f64>) -> Self {
        Self::from_option(value)
    }
}

impl From<Temperature> for Option<f64> {
    fn from(value: Temperature) -> Self {
        value.celsius()
    }
}

/// Canonical, fully defaulted view of one weather reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city_name: String,
    pub country_code: String,
    pub temperature_c: Temperature,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub wind_speed: f64,
    pub pressure: f64,
    /// Lower-cased free text, e.g. "light rain". Empty when unknown.
    pub condition_description: String,
}

impl WeatherSnapshot {
    /// Render the snapshot in the provider's payload shape.
    pub fn to_raw(&self) -> RawReading {
        let mut main = Map::new();
        if let Some(temp) = self.temperature_c.celsius() {
            main.insert("temp".into(), json!(temp));
        }
        main.insert("feels_like".into(), json!(self.feels_like_c));
        main.insert("humidity".into(), json!(self.humidity_pct));
        main.insert("pressure".into(), json!(self.pressure));

        let weather = if self.condition_description.is_empty() {
            json!([])
        } else {
            json!([{ "description": self.condition_description }])
        };

        RawReading::new(json!({
            "name": self.city_name,
            "sys": { "country": self.country_code },
            "main": Value::Object(main),
            "weather": weather,
            "wind": { "speed": self.wind_speed },
        }))
    }
}

/// Clothing suggestions in rule order, each at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RecommendationList(Vec<String>);

impl RecommendationList {
    /// Drop repeated entries, keeping the first occurrence of each.
    pub fn dedup(self) -> Self {
        self.0.into_iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, item: &str) -> bool {
        self.0.iter().any(|s| s == item)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for RecommendationList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let items = iter
            .into_iter()
            .map(Into::into)
            .filter(|item: &String| seen.insert(item.clone()))
            .collect();
        Self(items)
    }
}

impl From<Vec<String>> for RecommendationList {
    fn from(items: Vec<String>) -> Self {
        items.into_iter().collect()
    }
}

impl From<RecommendationList> for Vec<String> {
    fn from(list: RecommendationList) -> Self {
        list.0
    }
}

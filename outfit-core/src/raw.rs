//! Total, key-path based access into a provider's JSON payload.
//!
//! Every accessor returns `None` (or the supplied default) instead of
//! failing when a key is missing or an intermediate value is not an object.

use serde_json::Value;

use crate::error::WeatherError;

/// A raw, possibly incomplete weather reading as returned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading(Value);

impl RawReading {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn parse(body: &str) -> Result<Self, WeatherError> {
        Ok(Self(serde_json::from_str(body)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Whether the reading is an object carrying `key` at the top level.
    pub fn has_key(&self, key: &str) -> bool {
        self.0.as_object().is_some_and(|obj| obj.contains_key(key))
    }

    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.0, |current, key| current.as_object()?.get(*key))
    }

    /// Numeric value at `path`. Strings that look like numbers are not numbers.
    pub fn f64_at(&self, path: &[&str]) -> Option<f64> {
        self.lookup(path).and_then(Value::as_f64)
    }

    pub fn f64_or(&self, path: &[&str], default: f64) -> f64 {
        self.f64_at(path).unwrap_or(default)
    }

    pub fn str_at(&self, path: &[&str]) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str)
    }

    /// `description` of the first entry of the `weather` array.
    pub fn first_description(&self) -> Option<&str> {
        self.lookup(&["weather"])?
            .as_array()?
            .first()?
            .get("description")?
            .as_str()
    }
}

impl From<Value> for RawReading {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_walks_nested_objects() {
        let raw = RawReading::new(json!({ "sys": { "country": "CH" } }));

        assert_eq!(raw.str_at(&["sys", "country"]), Some("CH"));
        assert_eq!(raw.lookup(&["sys", "sunrise"]), None);
        assert_eq!(raw.lookup(&["nope", "deeper", "still"]), None);
    }

    #[test]
    fn lookup_through_non_object_is_none() {
        let raw = RawReading::new(json!({ "main": 12, "weather": "sunny" }));

        assert_eq!(raw.f64_at(&["main", "temp"]), None);
        assert_eq!(raw.first_description(), None);
    }

    #[test]
    fn numeric_strings_are_not_numbers() {
        let raw = RawReading::new(json!({ "main": { "temp": "12", "humidity": 40 } }));

        assert_eq!(raw.f64_at(&["main", "temp"]), None);
        assert_eq!(raw.f64_at(&["main", "humidity"]), Some(40.0));
        assert_eq!(raw.f64_or(&["main", "pressure"], 0.0), 0.0);
    }

    #[test]
    fn first_description_handles_empty_array() {
        let empty = RawReading::new(json!({ "weather": [] }));
        assert_eq!(empty.first_description(), None);

        let partial = RawReading::new(json!({ "weather": [{ "main": "Rain" }] }));
        assert_eq!(partial.first_description(), None);

        let full = RawReading::new(json!({
            "weather": [{ "description": "light rain" }, { "description": "mist" }]
        }));
        assert_eq!(full.first_description(), Some("light rain"));
    }

    #[test]
    fn has_key_requires_an_object() {
        assert!(RawReading::new(json!({ "main": {} })).has_key("main"));
        assert!(!RawReading::new(json!([1, 2, 3])).has_key("main"));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        let err = RawReading::parse("{ not json").unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::model::{RecommendationList, WeatherSnapshot};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Presentation-ready result of one lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    /// Rounded °C, `None` when the provider gave no temperature.
    pub temperature: Option<i64>,
    pub feels_like: i64,
    pub description: String,
    #[serde(serialize_with = "whole_as_integer")]
    pub humidity: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub wind_speed: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub pressure: f64,
    pub clothing_recommendations: Vec<String>,
    pub timestamp: String,
}

impl WeatherReport {
    pub fn build(
        snapshot: &WeatherSnapshot,
        recommendations: RecommendationList,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            city: snapshot.city_name.clone(),
            country: snapshot.country_code.clone(),
            temperature: snapshot.temperature_c.celsius().map(round_half_even),
            feels_like: round_half_even(snapshot.feels_like_c),
            description: title_case(&snapshot.condition_description),
            humidity: snapshot.humidity_pct,
            wind_speed: snapshot.wind_speed,
            pressure: snapshot.pressure,
            clothing_recommendations: recommendations.into_vec(),
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Providers send `71`, not `71.0`; keep whole readings integral on the way out.
fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const EXACT: f64 = 9_007_199_254_740_992.0; // 2^53

    if value.fract() == 0.0 && value.abs() <= EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Banker's rounding, so 0.5 → 0 and 1.5 → 2. Non-finite input yields 0.
pub fn round_half_even(value: f64) -> i64 {
    if value.is_finite() {
        value.round_ties_even() as i64
    } else {
        0
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Temperature;
    use chrono::TimeZone;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            city_name: "Zurich".into(),
            country_code: "CH".into(),
            temperature_c: Temperature::Known(12.5),
            feels_like_c: 11.6,
            humidity_pct: 71.0,
            wind_speed: 4.1,
            pressure: 1016.0,
            condition_description: "light rain".into(),
        }
    }

    #[test]
    fn build_formats_presentation_fields() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 7, 5, 9).unwrap();
        let recs: RecommendationList = ["Light jacket or sweater", "Umbrella"].into_iter().collect();

        let report = WeatherReport::build(&snapshot(), recs, at);

        assert_eq!(report.city, "Zurich");
        assert_eq!(report.temperature, Some(12));
        assert_eq!(report.feels_like, 12);
        assert_eq!(report.description, "Light Rain");
        assert_eq!(report.clothing_recommendations, ["Light jacket or sweater", "Umbrella"]);
        assert_eq!(report.timestamp, "2024-03-01 07:05:09 UTC");
    }

    #[test]
    fn unknown_temperature_is_null_in_json() {
        let mut snap = snapshot();
        snap.temperature_c = Temperature::Unknown;

        let report = WeatherReport::build(&snap, RecommendationList::default(), Utc::now());
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["temperature"].is_null());
        assert!(json["clothing_recommendations"].is_array());
    }

    #[test]
    fn whole_readings_serialize_as_integers() {
        let report = WeatherReport::build(&snapshot(), RecommendationList::default(), Utc::now());
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains(r#""humidity":71,"#));
        assert!(json.contains(r#""wind_speed":4.1,"#));
        assert!(json.contains(r#""pressure":1016,"#));

        let back: WeatherReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(round_half_even(0.5), 0);
        assert_eq!(round_half_even(1.5), 2);
        assert_eq!(round_half_even(2.5), 2);
        assert_eq!(round_half_even(-3.5), -4);
        assert_eq!(round_half_even(-3.4), -3);
        assert_eq!(round_half_even(f64::NAN), 0);
    }

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("light rain"), "Light Rain");
        assert_eq!(title_case("overcast clouds"), "Overcast Clouds");
        assert_eq!(title_case("thunderstorm with heavy drizzle"), "Thunderstorm With Heavy Drizzle");
        assert_eq!(title_case("o'neil-smith"), "O'Neil-Smith");
        assert_eq!(title_case(""), "");
    }
}

//! Rule-based clothing recommendations.
//!
//! Each [`RuleCategory`] looks at the snapshot on its own and contributes
//! zero or more suggestions. Categories never suppress one another: a
//! fault in one of them drops only that category's output.

use tracing::warn;

use crate::model::{RecommendationList, Temperature, WeatherSnapshot};

/// Wind speed above which wind protection is suggested, in the provider's unit.
pub const WIND_THRESHOLD: f64 = 10.0;
/// Relative humidity (%) above which breathable fabrics are suggested.
pub const HUMIDITY_THRESHOLD: f64 = 80.0;

pub const UNKNOWN_TEMPERATURE: &str = "Unable to determine temperature — bring a light layer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureBand {
    /// below 0 °C
    Freezing,
    /// [0, 10)
    Cold,
    /// [10, 20)
    Cool,
    /// [20, 30)
    Warm,
    /// 30 °C and above
    Hot,
}

impl TemperatureBand {
    /// Band for a temperature in °C; `None` only for NaN.
    pub fn from_celsius(celsius: f64) -> Option<Self> {
        if celsius.is_nan() {
            return None;
        }

        let band = if celsius < 0.0 {
            Self::Freezing
        } else if celsius < 10.0 {
            Self::Cold
        } else if celsius < 20.0 {
            Self::Cool
        } else if celsius < 30.0 {
            Self::Warm
        } else {
            Self::Hot
        };
        Some(band)
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            Self::Freezing => &["Heavy winter coat or parka", "Thermal underwear"],
            Self::Cold => &["Winter coat or heavy jacket", "Long-sleeved shirt"],
            Self::Cool => &["Light jacket or sweater", "Long-sleeved shirt"],
            Self::Warm => &["T-shirt or light shirt", "Shorts or light pants"],
            Self::Hot => &["Light, breathable clothing", "Shorts and tank top"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleFault {
    #[error("{field} is not a finite number ({value})")]
    NonFinite { field: &'static str, value: f64 },
}

/// Independent rule groups, in the order their output is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCategory {
    Temperature,
    Precipitation,
    Sun,
    Wind,
    Humidity,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 5] = [
        RuleCategory::Temperature,
        RuleCategory::Precipitation,
        RuleCategory::Sun,
        RuleCategory::Wind,
        RuleCategory::Humidity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Temperature => "temperature",
            RuleCategory::Precipitation => "precipitation",
            RuleCategory::Sun => "sun",
            RuleCategory::Wind => "wind",
            RuleCategory::Humidity => "humidity",
        }
    }

    pub fn evaluate(&self, snapshot: &WeatherSnapshot) -> Result<Vec<&'static str>, RuleFault> {
        let description = snapshot.condition_description.to_lowercase();

        let items = match self {
            RuleCategory::Temperature => match snapshot.temperature_c {
                Temperature::Unknown => vec![UNKNOWN_TEMPERATURE],
                Temperature::Known(celsius) => TemperatureBand::from_celsius(celsius)
                    .ok_or(RuleFault::NonFinite { field: "temperature_c", value: celsius })?
                    .recommendations()
                    .to_vec(),
            },
            RuleCategory::Precipitation => {
                let mut items = Vec::new();
                if mentions(&description, &["rain", "drizzle"]) {
                    items.extend(["Waterproof jacket or raincoat", "Umbrella"]);
                }
                if mentions(&description, &["snow"]) {
                    items.extend(["Snow boots", "Warm gloves"]);
                }
                items
            }
            RuleCategory::Sun => {
                if mentions(&description, &["clear", "sun"]) {
                    vec!["Sunglasses", "Sunscreen"]
                } else {
                    Vec::new()
                }
            }
            RuleCategory::Wind => {
                if finite("wind_speed", snapshot.wind_speed)? > WIND_THRESHOLD {
                    vec!["Windbreaker", "Secure hat"]
                } else {
                    Vec::new()
                }
            }
            RuleCategory::Humidity => {
                if finite("humidity_pct", snapshot.humidity_pct)? > HUMIDITY_THRESHOLD {
                    vec!["Breathable, moisture-wicking clothing"]
                } else {
                    Vec::new()
                }
            }
        };

        Ok(items)
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn mentions(description: &str, words: &[&str]) -> bool {
    words.iter().any(|w| description.contains(w))
}

fn finite(field: &'static str, value: f64) -> Result<f64, RuleFault> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RuleFault::NonFinite { field, value })
    }
}

/// Clothing suggestions for `snapshot`, temperature items first.
///
/// Never fails: a category that faults is logged and contributes nothing.
pub fn recommend(snapshot: &WeatherSnapshot) -> RecommendationList {
    RuleCategory::ALL
        .iter()
        .flat_map(|category| {
            category.evaluate(snapshot).unwrap_or_else(|fault| {
                warn!(%category, %fault, "rule category skipped");
                Vec::new()
            })
        })
        .collect()
}

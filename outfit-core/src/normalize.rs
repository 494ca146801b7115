use tracing::debug;

use crate::{
    error::WeatherError,
    model::{Temperature, WeatherSnapshot},
    raw::RawReading,
};

/// Top-level sections every provider payload must carry.
const SHAPE_MARKERS: [&str; 2] = ["main", "weather"];

/// Turn a raw provider reading into a [`WeatherSnapshot`].
///
/// Only a payload missing one of the mandatory sections is rejected; any
/// other absent field falls back to its default. Temperature is the
/// exception: when missing it stays [`Temperature::Unknown`].
pub fn normalize(raw: &RawReading, fallback_city: &str) -> Result<WeatherSnapshot, WeatherError> {
    if let Some(missing) = SHAPE_MARKERS.into_iter().find(|key| !raw.has_key(key)) {
        return Err(WeatherError::MalformedInput { missing });
    }

    let city_name = match raw.str_at(&["name"]).map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            debug!(fallback = fallback_city, "reading has no city name, using the queried one");
            fallback_city.to_string()
        }
    };

    let temperature_c = Temperature::from_option(raw.f64_at(&["main", "temp"]));
    if !temperature_c.is_known() {
        debug!(city = %city_name, "reading has no numeric temperature");
    }

    let condition_description = raw
        .first_description()
        .map(str::to_lowercase)
        .unwrap_or_default();

    Ok(WeatherSnapshot {
        country_code: raw.str_at(&["sys", "country"]).unwrap_or_default().to_string(),
        temperature_c,
        feels_like_c: raw.f64_or(&["main", "feels_like"], 0.0),
        humidity_pct: raw.f64_or(&["main", "humidity"], 0.0),
        wind_speed: raw.f64_or(&["wind", "speed"], 0.0),
        pressure: raw.f64_or(&["main", "pressure"], 0.0),
        condition_description,
        city_name,
    })
}

use chrono::Utc;
use tracing::{info, warn};

use crate::{
    error::WeatherError, model::WeatherRequest, normalize::normalize, recommend::recommend,
    report::WeatherReport, source::ReadingSource,
};

/// Fetch a reading for `request` and turn it into a report with clothing advice.
///
/// A payload that is not a weather reading stops here; the engine only ever
/// sees normalized snapshots.
pub async fn advise(
    source: &dyn ReadingSource,
    request: &WeatherRequest,
) -> Result<WeatherReport, WeatherError> {
    let raw = source.fetch(request).await.inspect_err(|err| {
        warn!(city = %request.city, source = %source.kind(), error = %err, "failed to fetch reading");
    })?;

    let snapshot = normalize(&raw, &request.city).inspect_err(|err| {
        if let WeatherError::MalformedInput { missing } = err {
            warn!(city = %request.city, missing, "reading is missing a mandatory section");
        }
    })?;

    let recommendations = recommend(&snapshot);
    info!(
        city = %snapshot.city_name,
        recommendations = recommendations.len(),
        "built clothing recommendations"
    );

    Ok(WeatherReport::build(&snapshot, recommendations, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{raw::RawReading, source::SourceKind};
    use async_trait::async_trait;
    use serde_json::{Value, json};

    #[derive(Debug)]
    struct Canned(Value);

    #[async_trait]
    impl ReadingSource for Canned {
        fn kind(&self) -> SourceKind {
            SourceKind::File
        }

        async fn fetch(&self, _request: &WeatherRequest) -> Result<RawReading, WeatherError> {
            Ok(RawReading::new(self.0.clone()))
        }
    }

    #[tokio::test]
    async fn advise_builds_report() {
        let source = Canned(json!({
            "name": "Bergen",
            "sys": { "country": "NO" },
            "main": { "temp": 7.5, "feels_like": 4.5, "humidity": 93, "pressure": 1002 },
            "weather": [{ "description": "moderate rain" }],
            "wind": { "speed": 11.3 },
        }));

        let report = advise(&source, &WeatherRequest::new("bergen")).await.unwrap();

        assert_eq!(report.city, "Bergen");
        assert_eq!(report.country, "NO");
        assert_eq!(report.temperature, Some(8));
        assert_eq!(report.feels_like, 4);
        assert_eq!(report.description, "Moderate Rain");
        assert_eq!(
            report.clothing_recommendations,
            [
                "Winter coat or heavy jacket",
                "Long-sleeved shirt",
                "Waterproof jacket or raincoat",
                "Umbrella",
                "Windbreaker",
                "Secure hat",
                "Breathable, moisture-wicking clothing",
            ]
        );
    }

    #[tokio::test]
    async fn advise_rejects_non_weather_payload() {
        let source = Canned(json!({ "cod": 401, "message": "Invalid API key" }));

        let err = advise(&source, &WeatherRequest::new("Paris")).await.unwrap_err();

        assert!(err.is_malformed());
        assert!(!err.to_string().contains("Invalid API key"));
    }
}

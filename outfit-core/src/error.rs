use std::path::PathBuf;

/// Errors raised while obtaining or normalizing a weather reading.
///
/// Display texts never include the raw payload; callers can surface them
/// to end users as-is.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The payload is not a weather reading at all (a mandatory top-level
    /// section is missing).
    #[error("unable to process weather data")]
    MalformedInput { missing: &'static str },

    #[error("weather reading is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read weather reading from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read weather reading from stdin")]
    Stdin(#[source] std::io::Error),

    #[error("no weather reading for '{city}' (looked for {})", path.display())]
    NotFound { city: String, path: PathBuf },
}

impl WeatherError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, WeatherError::MalformedInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_input_message_is_generic() {
        let err = WeatherError::MalformedInput { missing: "main" };
        assert_eq!(err.to_string(), "unable to process weather data");
        assert!(err.is_malformed());
    }

    #[test]
    fn not_found_mentions_city_and_path() {
        let err = WeatherError::NotFound {
            city: "Zurich".into(),
            path: PathBuf::from("/tmp/readings/zurich.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Zurich"));
        assert!(msg.contains("zurich.json"));
        assert!(!err.is_malformed());
    }
}

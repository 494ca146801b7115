use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use outfit_core::{Config, OutputFormat, WeatherReport, WeatherRequest, advise, source_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "outfit", version, about = "What to wear, given the weather")]
pub struct Cli {
    /// Log at debug level when RUST_LOG is not set.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set where readings are stored and how reports are printed.
    Configure {
        /// Directory containing one `<city>.json` provider payload per city.
        #[arg(long)]
        readings_dir: Option<PathBuf>,

        /// Default output format: "text" or "json".
        #[arg(long)]
        output: Option<String>,
    },

    /// Show weather and clothing advice for a city.
    Show {
        /// City name as queried; used when the reading has no name.
        city: String,

        /// Read this payload file instead of the readings directory ("-" for stdin).
        #[arg(long)]
        input: Option<PathBuf>,

        /// Print JSON regardless of the configured format.
        #[arg(long)]
        json: bool,
    },

    /// Print the location of the configuration file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { readings_dir, output } => configure(readings_dir, output),
            Command::Show { city, input, json } => show(city, input, json).await,
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn configure(readings_dir: Option<PathBuf>, output: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let dir = match readings_dir {
        Some(dir) => dir,
        None => {
            let current = config
                .readings_dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_default();
            let answer = inquire::Text::new("Readings directory:")
                .with_default(&current)
                .with_help_message("one <city>.json provider payload per city")
                .prompt()
                .context("Failed to read readings directory")?;
            PathBuf::from(answer.trim())
        }
    };

    if dir.as_os_str().is_empty() {
        anyhow::bail!("Readings directory must not be empty.");
    }
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "readings directory does not exist yet");
    }
    config.set_readings_dir(dir);

    if let Some(output) = output {
        config.output = OutputFormat::try_from(output.as_str())?;
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: String, input: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let source = source_from_config(&config, input)?;
    let request = WeatherRequest::new(city);

    let report = advise(source.as_ref(), &request).await.map_err(|err| {
        if err.is_malformed() {
            anyhow::anyhow!("Unable to process weather data for '{}'.", request.city)
        } else {
            anyhow::Error::new(err)
        }
    })?;

    let format = if json { OutputFormat::Json } else { config.output };
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", render_text(&report)),
    }

    Ok(())
}

fn render_text(report: &WeatherReport) -> String {
    let mut out = String::new();

    let location = if report.country.is_empty() {
        report.city.clone()
    } else {
        format!("{}, {}", report.city, report.country)
    };
    out.push_str(&format!("{location} ({})\n", report.timestamp));

    let temperature = report
        .temperature
        .map(|t| format!("{t}°C"))
        .unwrap_or_else(|| "unknown".to_string());
    out.push_str(&format!(
        "  {temperature}, feels like {}°C",
        report.feels_like
    ));
    if !report.description.is_empty() {
        out.push_str(&format!(", {}", report.description));
    }
    out.push('\n');
    out.push_str(&format!(
        "  humidity {}%, wind {}, pressure {}\n",
        report.humidity, report.wind_speed, report.pressure
    ));

    out.push_str("\nWhat to wear:\n");
    for item in &report.clothing_recommendations {
        out.push_str(&format!("  - {item}\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> WeatherReport {
        WeatherReport {
            city: "Zurich".into(),
            country: "CH".into(),
            temperature: Some(12),
            feels_like: 11,
            description: "Light Rain".into(),
            humidity: 71.0,
            wind_speed: 4.1,
            pressure: 1016.0,
            clothing_recommendations: vec!["Light jacket or sweater".into(), "Umbrella".into()],
            timestamp: "2024-03-01 07:05:09 UTC".into(),
        }
    }

    #[test]
    fn text_output_lists_recommendations() {
        let text = render_text(&report());

        assert!(text.starts_with("Zurich, CH (2024-03-01 07:05:09 UTC)"));
        assert!(text.contains("12°C, feels like 11°C, Light Rain"));
        assert!(text.contains("  - Light jacket or sweater\n  - Umbrella\n"));
    }

    #[test]
    fn text_output_marks_unknown_temperature() {
        let mut report = report();
        report.temperature = None;
        report.country.clear();

        let text = render_text(&report);
        assert!(text.starts_with("Zurich ("));
        assert!(text.contains("unknown, feels like"));
    }

    #[test]
    fn show_requires_city() {
        assert!(Cli::try_parse_from(["outfit", "show"]).is_err());

        let cli = Cli::try_parse_from(["outfit", "show", "Zurich", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Show { json: true, .. }));
    }
}

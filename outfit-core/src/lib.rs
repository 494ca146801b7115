//! Core library for the `outfit` CLI.
//!
//! This crate defines:
//! - Normalization of raw provider readings into a typed snapshot
//! - The rule-based clothing recommendation engine
//! - Presentation of the result (rounding, title-casing, timestamp)
//! - Reading sources and on-disk configuration
//!
//! It is used by `outfit-cli`, but the normalizer and engine are pure and
//! can be called from any number of request handlers concurrently.

pub mod advisor;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod raw;
pub mod recommend;
pub mod report;
pub mod source;

pub use advisor::advise;
pub use config::{Config, OutputFormat};
pub use error::WeatherError;
pub use model::{RecommendationList, Temperature, WeatherRequest, WeatherSnapshot};
pub use normalize::normalize;
pub use raw::RawReading;
pub use recommend::{RuleCategory, RuleFault, TemperatureBand, recommend};
pub use report::WeatherReport;
pub use source::{DirectorySource, FileSource, ReadingSource, SourceKind, source_from_config};

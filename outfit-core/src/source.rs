use crate::{Config, RawReading, WeatherError, WeatherRequest};
use async_trait::async_trait;
use std::{
    fmt::Debug,
    path::{Path, PathBuf},
};
use tokio::io::AsyncReadExt;

/// Where raw provider payloads come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Directory,
    File,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Directory => "directory",
            SourceKind::File => "file",
        }
    }

    pub const fn all() -> &'static [SourceKind] {
        &[SourceKind::Directory, SourceKind::File]
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SourceKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "directory" | "dir" => Ok(SourceKind::Directory),
            "file" => Ok(SourceKind::File),
            _ => Err(anyhow::anyhow!(
                "Unknown reading source '{value}'. Supported sources: directory, file."
            )),
        }
    }
}

#[async_trait]
pub trait ReadingSource: Send + Sync + Debug {
    fn kind(&self) -> SourceKind;

    async fn fetch(&self, request: &WeatherRequest) -> Result<RawReading, WeatherError>;
}

/// A directory of saved provider payloads, one `<city-slug>.json` per city.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// File holding `city`'s reading; `None` when the name has no usable characters.
    pub fn path_for(&self, city: &str) -> Option<PathBuf> {
        let slug = city_slug(city);
        (!slug.is_empty()).then(|| self.root.join(format!("{slug}.json")))
    }
}

#[async_trait]
impl ReadingSource for DirectorySource {
    fn kind(&self) -> SourceKind {
        SourceKind::Directory
    }

    async fn fetch(&self, request: &WeatherRequest) -> Result<RawReading, WeatherError> {
        let Some(path) = self.path_for(&request.city) else {
            return Err(WeatherError::NotFound {
                city: request.city.clone(),
                path: self.root.clone(),
            });
        };

        match tokio::fs::read_to_string(&path).await {
            Ok(body) => RawReading::parse(&body),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(WeatherError::NotFound {
                city: request.city.clone(),
                path,
            }),
            Err(source) => Err(WeatherError::Io { path, source }),
        }
    }
}

/// A single payload file; `-` reads from stdin.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn is_stdin(&self) -> bool {
        self.path == Path::new("-")
    }
}

#[async_trait]
impl ReadingSource for FileSource {
    fn kind(&self) -> SourceKind {
        SourceKind::File
    }

    async fn fetch(&self, _request: &WeatherRequest) -> Result<RawReading, WeatherError> {
        let body = if self.is_stdin() {
            let mut body = String::new();
            tokio::io::stdin()
                .read_to_string(&mut body)
                .await
                .map_err(WeatherError::Stdin)?;
            body
        } else {
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| WeatherError::Io { path: self.path.clone(), source })?
        };

        RawReading::parse(&body)
    }
}

/// "New York" → "new-york". Only lower-cased alphanumeric runs survive, so
/// the slug never contains a path separator or `..`.
pub fn city_slug(city: &str) -> String {
    city.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Construct a source: an explicit input file wins over the configured directory.
pub fn source_from_config(
    config: &Config,
    input: Option<PathBuf>,
) -> anyhow::Result<Box<dyn ReadingSource>> {
    let boxed: Box<dyn ReadingSource> = match input {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(DirectorySource::new(config.readings_dir()?)),
    };

    Ok(boxed)
}

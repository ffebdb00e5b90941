use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::features::{LabeledExample, Track};

/// The 100-example reference set (25 per emotion), embedded at build time.
const FIXTURE_JSON: &str = include_str!("../data/fixture.json");

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unsupported dataset format: {0} (expected .json, .yaml, .yml or .toml)")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, DatasetError>;

/// Document formats a dataset file may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(DatasetError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExamplesDoc {
    examples: Vec<LabeledExample>,
}

#[derive(Debug, Deserialize)]
struct TracksDoc {
    tracks: Vec<Track>,
}

fn parse<T: DeserializeOwned>(contents: &str, format: Format) -> Result<T> {
    Ok(match format {
        Format::Json => serde_json::from_str(contents)?,
        Format::Yaml => serde_yaml::from_str(contents)?,
        Format::Toml => toml::from_str(contents)?,
    })
}

/// Parse a labeled dataset document: `{ examples: [ {valence, energy, ..., true_emotion} ] }`.
pub fn parse_examples(contents: &str, format: Format) -> Result<Vec<LabeledExample>> {
    let doc: ExamplesDoc = parse(contents, format)?;
    Ok(doc.examples)
}

/// Parse a candidate track list: `{ tracks: [ {name, valence, energy, ...} ] }`.
pub fn parse_tracks(contents: &str, format: Format) -> Result<Vec<Track>> {
    let doc: TracksDoc = parse(contents, format)?;
    Ok(doc.tracks)
}

pub fn load_examples(path: &Path) -> Result<Vec<LabeledExample>> {
    let format = Format::from_path(path)?;
    let contents = std::fs::read_to_string(path)?;
    let examples = parse_examples(&contents, format)?;
    log::info!("Loaded {} labeled examples from {}", examples.len(), path.display());
    Ok(examples)
}

pub fn load_tracks(path: &Path) -> Result<Vec<Track>> {
    let format = Format::from_path(path)?;
    let contents = std::fs::read_to_string(path)?;
    let tracks = parse_tracks(&contents, format)?;
    log::info!("Loaded {} tracks from {}", tracks.len(), path.display());
    Ok(tracks)
}

/// The built-in reference dataset.
pub fn builtin_fixture() -> Result<Vec<LabeledExample>> {
    parse_examples(FIXTURE_JSON, Format::Json)
}

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::story_processor::{BoundaryMarkers, GUTENBERG_END_MARKER, GUTENBERG_START_MARKER};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Token budget at which a segment is cut
    #[serde(default = "default_segment_length")]
    pub segment_length: usize,

    /// Number of sentiment values averaged per trajectory point
    #[serde(default = "default_window_length")]
    pub window_length: usize,

    /// Number of values the window advances between points
    #[serde(default = "default_stride")]
    pub stride: usize,

    /// Story body delimiters
    #[serde(default)]
    pub markers: MarkerConfig,

    /// Sentiment scorer config
    #[serde(default)]
    pub scorer: ScorerConfig,

    /// Token counter config
    #[serde(default)]
    pub tokenizer: TokenizerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            segment_length: default_segment_length(),
            window_length: default_window_length(),
            stride: default_stride(),
            markers: MarkerConfig::default(),
            scorer: ScorerConfig::default(),
            tokenizer: TokenizerConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Story body boundary markers as stored in the config file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MarkerConfig {
    // @field: Start-of-body line prefix
    #[serde(default = "default_start_marker")]
    pub start: String,

    // @field: End-of-body line prefix
    #[serde(default = "default_end_marker")]
    pub end: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            start: default_start_marker(),
            end: default_end_marker(),
        }
    }
}

impl MarkerConfig {
    // @returns: Markers usable by the segmenter
    pub fn to_markers(&self) -> BoundaryMarkers {
        BoundaryMarkers::new(self.start.clone(), self.end.clone())
    }
}

/// Sentiment provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScorerProvider {
    // @provider: Text-classification inference endpoint
    #[default]
    Inference,
    // @provider: Offline mock (fixed positive score, for dry runs)
    Mock,
}

impl ScorerProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Inference => "Inference",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Inference => "inference".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

impl std::fmt::Display for ScorerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for ScorerProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "inference" => Ok(Self::Inference),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Scorer provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScorerConfig {
    // @field: Provider type identifier
    #[serde(rename = "type", default)]
    pub provider: ScorerProvider,

    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL (empty for the provider default)
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Max chars per request
    #[serde(default = "default_max_chars_per_request")]
    pub max_chars_per_request: usize,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            provider: ScorerProvider::default(),
            model: default_model(),
            api_key: String::new(),
            endpoint: String::new(),
            max_chars_per_request: default_max_chars_per_request(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Token counter kind
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    // @kind: ~4 chars per token approximation
    #[default]
    Heuristic,
    // @kind: Whitespace-delimited words
    Whitespace,
    // @kind: HuggingFace tokenizer.json file
    Pretrained,
}

/// Token counter configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TokenizerConfig {
    // @field: Counter kind
    #[serde(rename = "type", default)]
    pub kind: TokenizerKind,

    // @field: Path to tokenizer.json (pretrained only)
    #[serde(default = "String::new")]
    pub path: String,
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to open config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Write this configuration to a JSON file, pretty-printed
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json).context(format!("Failed to write config to {:?}", path))?;
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// Zero-valued core parameters are configuration errors and must be
    /// rejected here, before any document I/O.
    pub fn validate(&self) -> Result<()> {
        if self.segment_length == 0 {
            return Err(anyhow!("segment_length must be at least 1"));
        }
        if self.window_length == 0 {
            return Err(anyhow!("window_length must be at least 1"));
        }
        if self.stride == 0 {
            return Err(anyhow!("stride must be at least 1"));
        }
        if self.markers.start.is_empty() || self.markers.end.is_empty() {
            return Err(anyhow!("Boundary markers must be non-empty"));
        }

        if self.scorer.provider == ScorerProvider::Inference {
            if self.scorer.model.is_empty() {
                return Err(anyhow!("Scorer model must be set for the inference provider"));
            }
            if !self.scorer.endpoint.is_empty() {
                url::Url::parse(&self.scorer.endpoint)
                    .context(format!("Invalid scorer endpoint: {}", self.scorer.endpoint))?;
            }
        }

        if self.tokenizer.kind == TokenizerKind::Pretrained && self.tokenizer.path.is_empty() {
            return Err(anyhow!(
                "tokenizer.path must point to a tokenizer.json file for the pretrained counter"
            ));
        }

        Ok(())
    }
}

// Default value functions for serde

fn default_segment_length() -> usize {
    50
}

fn default_window_length() -> usize {
    5
}

fn default_stride() -> usize {
    1
}

fn default_start_marker() -> String {
    GUTENBERG_START_MARKER.to_string()
}

fn default_end_marker() -> String {
    GUTENBERG_END_MARKER.to_string()
}

fn default_model() -> String {
    "distilbert-base-uncased-finetuned-sst-2-english".to_string()
}

fn default_max_chars_per_request() -> usize {
    2000
}

fn default_timeout_secs() -> u64 {
    30
}

//! Configuration: a TOML file with data locations and pipeline parameters.


use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recommender::{BuildOptions, DEFAULT_POSTER_BASE_URL};
use crate::vectorizer::DEFAULT_MAX_FEATURES;

pub const DEFAULT_CONFIG_FILE: &str = "recommender.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub vectorizer: VectorizerConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub movies: PathBuf,
    pub credits: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            movies: PathBuf::from("data/tmdb_5000_movies.csv"),
            credits: PathBuf::from("data/tmdb_5000_credits.csv"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VectorizerConfig {
    pub max_features: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecommendConfig {
    pub top_n: usize,
    pub poster_base_url: String,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            poster_base_url: DEFAULT_POSTER_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid max_features: {0} (must be between 1 and 1000000)")]
    InvalidMaxFeatures(usize),
    #[error("Invalid top_n: {0} (must be between 1 and 100)")]
    InvalidTopN(usize),
    #[error("Data path for {0} is empty")]
    EmptyPath(&'static str),
    #[error("Invalid poster base URL: {0} (must start with http:// or https://)")]
    InvalidPosterUrl(String),
}

impl Config {
    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| "Configuration validation failed")?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.data.movies.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("movies"));
        }
        if self.data.credits.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("credits"));
        }
        if !(1..=1_000_000).contains(&self.vectorizer.max_features) {
            return Err(ConfigError::InvalidMaxFeatures(self.vectorizer.max_features));
        }
        if !(1..=100).contains(&self.recommend.top_n) {
            return Err(ConfigError::InvalidTopN(self.recommend.top_n));
        }
        let url = &self.recommend.poster_base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidPosterUrl(url.clone()));
        }
        Ok(())
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            max_features: self.vectorizer.max_features,
            poster_base_url: Some(self.recommend.poster_base_url.clone()),
        }
    }
}

use std::env;

use crate::error::PipelineError;

pub const DEFAULT_EMBEDDING_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_DIMENSIONS: u32 = 1536;

/// Connection settings for the vector store and its embedding backend.
///
/// Built once at process start and passed into components by value; nothing
/// reads the environment after construction.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_url: String,
    pub embedding_api_url: String,
    pub embedding_api_key: String,
    pub embedding_model: String,
    pub embedding_dimensions: u32,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, PipelineError> {
        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            embedding_api_url: optional_var(
                "EMBEDDING_API_URL",
                DEFAULT_EMBEDDING_API_URL,
            ),
            embedding_api_key: required_var("OPENAI_API_KEY")?,
            embedding_model: optional_var("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            embedding_dimensions: parse_var(
                "EMBEDDING_DIMENSIONS",
                DEFAULT_EMBEDDING_DIMENSIONS,
            )?,
        })
    }
}

/// A required environment variable; absence is a configuration error raised
/// before any network call.
pub fn required_var(name: &str) -> Result<String, PipelineError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PipelineError::Configuration(format!(
            "missing required environment variable {}",
            name
        ))),
    }
}

pub fn optional_var(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

pub fn parse_var<T>(name: &str, default: T) -> Result<T, PipelineError>
where
    T: std::str::FromStr,
{
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| {
            PipelineError::Configuration(format!("{} is not a valid value: {}", name, raw))
        }),
        Err(_) => Ok(default),
    }
}

/// Split a comma-separated variable into trimmed, non-empty entries.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

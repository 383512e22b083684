use shared::config::{parse_var, StoreConfig};
use shared::error::PipelineError;

/// How many chunks a query returns when the caller does not say.
pub const DEFAULT_RESULT_COUNT: usize = 20;

/// Internal-only calls are excluded from results unless the caller opts in.
pub const DEFAULT_EXCLUDE_INTERNAL: bool = true;

pub const DEFAULT_PORT: u16 = 8084;

#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    pub port: u16,
    pub default_k: usize,
    pub exclude_internal_default: bool,
    pub store: StoreConfig,
}

impl RetrieverConfig {
    pub fn from_env() -> Result<Self, PipelineError> {
        Ok(Self {
            port: parse_var("RETRIEVER_PORT", DEFAULT_PORT)?,
            default_k: parse_var("DEFAULT_RESULT_COUNT", DEFAULT_RESULT_COUNT)?,
            exclude_internal_default: parse_var(
                "EXCLUDE_INTERNAL_DEFAULT",
                DEFAULT_EXCLUDE_INTERNAL,
            )?,
            store: StoreConfig::from_env()?,
        })
    }
}

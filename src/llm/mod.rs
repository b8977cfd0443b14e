//! Plan fetching
//!
//! Turns a natural-language prompt into a drawing [`Plan`](crate::plan::Plan)
//! via an LLM provider. The orchestrator only sees the [`PlanFetcher`] trait.

use std::sync::Arc;

use tracing::debug;

mod anthropic;
pub mod client;
mod error;

pub use anthropic::AnthropicFetcher;
pub use client::{PlanFetcher, PlanResponse};
pub use error::FetchError;

use crate::config::LlmConfig;

/// Create a plan fetcher for the provider named in the config
pub fn create_fetcher(config: &LlmConfig) -> Result<Arc<dyn PlanFetcher>, FetchError> {
    debug!(provider = %config.provider, model = %config.model, "create_fetcher: called");
    match config.provider.as_str() {
        "anthropic" => Ok(Arc::new(AnthropicFetcher::from_config(config)?)),
        other => Err(FetchError::Malformed(format!(
            "unknown plan provider: '{other}'. Supported: anthropic"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_fetcher_rejects_unknown_provider() {
        let config = LlmConfig {
            provider: "carrier-pigeon".to_string(),
            ..LlmConfig::default()
        };
        let err = create_fetcher(&config).err().unwrap();
        assert!(matches!(err, FetchError::Malformed(_)));
        assert!(err.to_string().contains("carrier-pigeon"));
    }
}

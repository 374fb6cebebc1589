use crate::{ProviderConfig, error::ProviderError, model::WeatherPayload};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherstack;

pub use weatherstack::WeatherstackProvider;

/// Source of current-conditions data for a free-form location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// One outbound call per invocation: no retries, no caching.
    async fn fetch(&self, location: &str) -> Result<WeatherPayload, ProviderError>;
}

/// Construct the provider from config; fails when no access key is set.
pub fn provider_from_config(config: &ProviderConfig) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let access_key = config.require_access_key()?;

    let provider = WeatherstackProvider::new(
        config.base_url.clone(),
        access_key.to_owned(),
        config.units.clone(),
    );

    Ok(Arc::new(provider))
}

pub mod aws;

use async_trait::async_trait;
use thiserror::Error;

use crate::resource::{FetchConfig, Resource};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("instance not found: {0}")]
    NotFound(String),
    #[error("aws error: {0}")]
    Aws(String),
}

/// Source of observed (live) instance state.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    fn resource_types(&self) -> Vec<&str>;

    async fn fetch(&self, instance_id: &str) -> Result<Resource, ProviderError>;

    /// Fetches every requested instance. Failures are logged and the
    /// instance is left out of the returned list.
    async fn fetch_all(&self, config: &FetchConfig) -> Vec<Resource> {
        let mut resources = Vec::with_capacity(config.instance_ids.len());

        for instance_id in &config.instance_ids {
            match self.fetch(instance_id).await {
                Ok(resource) => resources.push(resource),
                Err(err) => {
                    tracing::warn!(
                        provider = self.name(),
                        instance_id = %instance_id,
                        error = %err,
                        "could not retrieve instance, skipping"
                    );
                }
            }
        }

        tracing::info!(
            requested = config.instance_ids.len(),
            count = resources.len(),
            "observed instances retrieved"
        );
        resources
    }
}

pub async fn get_provider(
    name: &str,
    config: &FetchConfig,
) -> Result<Box<dyn Provider>, ProviderError> {
    match name {
        "aws" => Ok(Box::new(aws::AwsProvider::from_env(config.region.clone()).await)),
        other => Err(ProviderError::UnknownProvider(other.to_string())),
    }
}

mod client;
mod error;
mod types;

pub use client::Ec2Client;
pub use error::AwsError;
pub use types::instance_to_resource;

use async_trait::async_trait;

use super::{Provider, ProviderError, Resource};

#[derive(Debug)]
pub struct AwsProvider {
    client: Ec2Client,
}

impl AwsProvider {
    pub fn new(client: Ec2Client) -> Self {
        Self { client }
    }

    /// Builds a provider from the default AWS credential and region chain.
    pub async fn from_env(region: Option<String>) -> Self {
        Self::new(Ec2Client::from_env(region).await)
    }
}

#[async_trait]
impl Provider for AwsProvider {
    fn name(&self) -> &str {
        "aws"
    }

    fn resource_types(&self) -> Vec<&str> {
        vec!["aws_instance"]
    }

    async fn fetch(&self, instance_id: &str) -> Result<Resource, ProviderError> {
        let resource = self.client.describe_instance(instance_id).await?;
        tracing::debug!(instance_id, "instance described");
        Ok(resource)
    }
}

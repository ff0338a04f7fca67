use aws_config::{BehaviorVersion, Region};
use aws_sdk_ec2::error::DisplayErrorContext;

use super::AwsError;
use super::types::instance_to_resource;
use crate::resource::Resource;

#[derive(Debug, Clone)]
pub struct Ec2Client {
    client: aws_sdk_ec2::Client,
}

impl Ec2Client {
    /// NOTE: Primarily used for testing with a pre-configured SDK client.
    pub fn new(client: aws_sdk_ec2::Client) -> Self {
        Self { client }
    }

    pub async fn from_env(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;

        tracing::debug!(region = ?config.region(), "AWS configuration loaded");
        Self::new(aws_sdk_ec2::Client::new(&config))
    }

    pub async fn describe_instance(&self, instance_id: &str) -> Result<Resource, AwsError> {
        let output = self
            .client
            .describe_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| AwsError::Describe {
                instance_id: instance_id.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let instance = output
            .reservations()
            .first()
            .and_then(|reservation| reservation.instances().first())
            .ok_or_else(|| AwsError::InstanceNotFound {
                instance_id: instance_id.to_string(),
            })?;

        Ok(instance_to_resource(instance))
    }
}

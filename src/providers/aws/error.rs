use thiserror::Error;

/// EC2-specific errors that can occur while describing instances.
#[derive(Debug, Error)]
pub enum AwsError {
    /// DescribeInstances call failed (credentials, network, API error)
    #[error("describe instances failed for {instance_id}: {message}")]
    Describe {
        instance_id: String,
        message: String,
    },

    /// The call succeeded but returned no matching instance
    #[error("instance not found in AWS: '{instance_id}'")]
    InstanceNotFound { instance_id: String },
}

impl From<AwsError> for crate::providers::ProviderError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::InstanceNotFound { instance_id } => {
                crate::providers::ProviderError::NotFound(instance_id)
            }
            other => crate::providers::ProviderError::Aws(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderError;

    #[test]
    fn test_describe_error_display() {
        let err = AwsError::Describe {
            instance_id: "i-1".to_string(),
            message: "UnauthorizedOperation".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "describe instances failed for i-1: UnauthorizedOperation"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = AwsError::InstanceNotFound {
            instance_id: "i-0d7862461ee383cd8".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "instance not found in AWS: 'i-0d7862461ee383cd8'"
        );
    }

    #[test]
    fn test_not_found_converts_to_provider_not_found() {
        let err: ProviderError = AwsError::InstanceNotFound {
            instance_id: "i-1".to_string(),
        }
        .into();
        assert!(matches!(err, ProviderError::NotFound(id) if id == "i-1"));
    }

    #[test]
    fn test_describe_converts_to_provider_aws() {
        let err: ProviderError = AwsError::Describe {
            instance_id: "i-1".to_string(),
            message: "timeout".to_string(),
        }
        .into();
        assert!(matches!(err, ProviderError::Aws(_)));
        assert!(err.to_string().contains("timeout"));
    }
}

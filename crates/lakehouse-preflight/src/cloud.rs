// crates/lakehouse-preflight/src/cloud.rs
// ============================================================================
// Module: Cloud Probes
// Description: Caller identity and bucket accessibility probes.
// Purpose: Confirm credentials and warehouse access before a session starts.
// Dependencies: async-trait, aws-config, aws-sdk-s3, aws-sdk-sts
// ============================================================================

//! ## Overview
//! [`CloudProbe`] is the only seam through which checks reach the cloud.
//! [`AwsCloudProbe`] builds one SDK session from the configured profile and
//! region and shares it between the STS and S3 clients. The profile and region
//! are passed to the SDK loader explicitly; process environment variables are
//! never mutated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use lakehouse_config::CredentialEnvironment;
use thiserror::Error;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Identity resolved from the active credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// AWS account id.
    pub account: String,
    /// Principal ARN when returned.
    pub arn: Option<String>,
}

/// Cloud probe failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The service rejected or failed the request.
    #[error("{service} error: {message}")]
    Service {
        /// Service name (`sts` or `s3`).
        service: &'static str,
        /// Error chain rendered by the SDK.
        message: String,
    },
    /// The service answered without a required field.
    #[error("{service} response missing {field}")]
    MissingField {
        /// Service name.
        service: &'static str,
        /// Missing field name.
        field: &'static str,
    },
    /// The probe did not finish in time.
    #[error("{probe} probe timed out after {timeout_ms} ms")]
    Timeout {
        /// Probe name.
        probe: &'static str,
        /// Timeout that elapsed.
        timeout_ms: u64,
    },
}

/// Cloud probe interface.
#[async_trait]
pub trait CloudProbe: Send + Sync {
    /// Resolves the identity behind the active credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the identity cannot be resolved.
    async fn caller_identity(&self) -> Result<CallerIdentity, ProbeError>;

    /// Confirms `bucket` exists and is reachable with the active credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when the bucket cannot be reached.
    async fn head_bucket(&self, bucket: &str) -> Result<(), ProbeError>;
}

// ============================================================================
// SECTION: AWS Implementation
// ============================================================================

/// STS + S3 backed probe sharing one SDK session.
pub struct AwsCloudProbe {
    /// STS client for identity lookups.
    sts: aws_sdk_sts::Client,
    /// S3 client for bucket checks.
    s3: aws_sdk_s3::Client,
}

impl AwsCloudProbe {
    /// Builds a session for the configured profile and region.
    pub async fn connect(credentials: &CredentialEnvironment) -> Self {
        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(credentials.profile.clone())
            .region(Region::new(credentials.region.clone()))
            .load()
            .await;
        Self {
            sts: aws_sdk_sts::Client::new(&shared_config),
            s3: aws_sdk_s3::Client::new(&shared_config),
        }
    }
}

#[async_trait]
impl CloudProbe for AwsCloudProbe {
    async fn caller_identity(&self) -> Result<CallerIdentity, ProbeError> {
        let output = self.sts.get_caller_identity().send().await.map_err(|err| {
            ProbeError::Service {
                service: "sts",
                message: DisplayErrorContext(err).to_string(),
            }
        })?;
        let account = output.account().ok_or(ProbeError::MissingField {
            service: "sts",
            field: "Account",
        })?;
        Ok(CallerIdentity {
            account: account.to_string(),
            arn: output.arn().map(str::to_string),
        })
    }

    async fn head_bucket(&self, bucket: &str) -> Result<(), ProbeError> {
        self.s3.head_bucket().bucket(bucket).send().await.map_err(|err| {
            ProbeError::Service {
                service: "s3",
                message: DisplayErrorContext(err).to_string(),
            }
        })?;
        Ok(())
    }
}

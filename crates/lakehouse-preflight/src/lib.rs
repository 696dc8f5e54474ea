// crates/lakehouse-preflight/src/lib.rs
// ============================================================================
// Module: Lakehouse Preflight Library
// Description: Environment validation and configuration self-test.
// Purpose: Check a lakehouse configuration before a Spark session starts.
// Dependencies: lakehouse-config, aws-config, aws-sdk-s3, aws-sdk-sts, tokio
// ============================================================================

//! ## Overview
//! Every check returns a [`CheckOutcome`] instead of printing or raising, so
//! one failing check never hides the others and the aggregate report is a
//! plain value callers can render, serialize, or assert on.
//!
//! Cloud access is isolated behind [`CloudProbe`]; [`AwsCloudProbe`] talks to
//! STS and S3, tests substitute fakes.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod cloud;
pub mod dependencies;
pub mod report;
pub mod selftest;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::PreflightAuditEvent;
pub use audit::PreflightAuditSink;
pub use audit::audit_sink_from_config;
pub use cloud::AwsCloudProbe;
pub use cloud::CallerIdentity;
pub use cloud::CloudProbe;
pub use cloud::ProbeError;
pub use dependencies::missing_dependencies;
pub use report::CheckKind;
pub use report::CheckOutcome;
pub use report::CheckStatus;
pub use report::Fact;
pub use report::ValidationReport;
pub use selftest::ProbeSource;
pub use selftest::SELF_TEST_TABLES;
pub use selftest::SelfTest;
pub use selftest::SelfTestError;
pub use selftest::SelfTestReport;
pub use selftest::SelfTestStep;
pub use selftest::SelfTestStepKind;
pub use validate::CLOUD_CHECKS_DISABLED;
pub use validate::Preflight;

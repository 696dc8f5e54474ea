// crates/lakehouse-preflight/tests/common/mod.rs
// =============================================================================
// Module: Preflight Test Helpers
// Description: Fake cloud probes, recording audit sinks, and jar fixtures.
// Purpose: Exercise every check without network access.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use lakehouse_config::ConfigError;
use lakehouse_config::LakehouseConfig;
use lakehouse_preflight::CallerIdentity;
use lakehouse_preflight::CheckKind;
use lakehouse_preflight::CloudProbe;
use lakehouse_preflight::PreflightAuditEvent;
use lakehouse_preflight::PreflightAuditSink;
use lakehouse_preflight::ProbeError;

/// Minimal TOML carrying only the settings without defaults.
pub const MINIMAL_TOML: &str = r#"
[aws]
profile = "tarun_student"

[storage]
bucket = "tarun-lakehouse-bucket"
"#;

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<LakehouseConfig, ConfigError> {
    LakehouseConfig::parse(MINIMAL_TOML)
}

/// Creates every configured jar under `dir` except those in `skip`.
pub fn stage_jars(config: &LakehouseConfig, dir: &Path, skip: &[&str]) -> std::io::Result<()> {
    for jar in &config.engine.jars {
        if !skip.contains(&jar.as_str()) {
            fs::write(dir.join(jar), b"")?;
        }
    }
    Ok(())
}

/// Scripted cloud probe.
pub struct FakeProbe {
    /// Identity result.
    pub identity: Result<CallerIdentity, ProbeError>,
    /// Bucket result.
    pub bucket: Result<(), ProbeError>,
    /// Delay applied before each answer.
    pub delay: Option<Duration>,
    /// Buckets probed, in order.
    pub probed_buckets: Mutex<Vec<String>>,
}

impl FakeProbe {
    /// Probe answering every call successfully.
    pub fn healthy() -> Self {
        Self {
            identity: Ok(CallerIdentity {
                account: "123456789012".to_string(),
                arn: Some("arn:aws:iam::123456789012:user/tarun".to_string()),
            }),
            bucket: Ok(()),
            delay: None,
            probed_buckets: Mutex::new(Vec::new()),
        }
    }

    /// Probe whose identity lookup fails but whose bucket is reachable.
    pub fn identity_denied() -> Self {
        Self {
            identity: Err(ProbeError::Service {
                service: "sts",
                message: "ExpiredToken".to_string(),
            }),
            ..Self::healthy()
        }
    }

    /// Probe whose bucket lookup fails.
    pub fn bucket_missing() -> Self {
        Self {
            bucket: Err(ProbeError::Service {
                service: "s3",
                message: "NotFound".to_string(),
            }),
            ..Self::healthy()
        }
    }

    /// Probe that answers only after `delay`.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::healthy()
        }
    }

    /// Waits for the configured delay.
    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CloudProbe for FakeProbe {
    async fn caller_identity(&self) -> Result<CallerIdentity, ProbeError> {
        self.pause().await;
        self.identity.clone()
    }

    async fn head_bucket(&self, bucket: &str) -> Result<(), ProbeError> {
        if let Ok(mut probed) = self.probed_buckets.lock() {
            probed.push(bucket.to_string());
        }
        self.pause().await;
        self.bucket.clone()
    }
}

/// Audit sink that keeps every event in memory.
#[derive(Default)]
pub struct RecordingSink {
    /// Recorded events.
    pub events: Mutex<Vec<PreflightAuditEvent>>,
}

impl RecordingSink {
    /// Returns the check kinds recorded so far, in order.
    pub fn checks(&self) -> Vec<CheckKind> {
        self.events
            .lock()
            .map(|events| events.iter().map(|event| event.check).collect())
            .unwrap_or_default()
    }
}

impl PreflightAuditSink for RecordingSink {
    fn record(&self, event: &PreflightAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

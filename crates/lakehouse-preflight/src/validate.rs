// crates/lakehouse-preflight/src/validate.rs
// ============================================================================
// Module: Environment Validation
// Description: Dependency, identity, storage, and derivation checks.
// Purpose: Run every check, record every outcome, never stop early.
// Dependencies: lakehouse-config, tokio
// ============================================================================

//! ## Overview
//! [`Preflight`] binds a loaded config to an optional [`CloudProbe`] and an
//! audit sink. Each `check_*` method returns a [`CheckOutcome`] and records
//! it; [`Preflight::validate_environment`] runs the dependency, identity, and
//! storage checks in order regardless of earlier failures.
//!
//! Identity and storage probes share one cloud session but are independent
//! checks: an identity failure does not prevent the bucket probe from running
//! and reporting its own result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use lakehouse_config::DeriveError;
use lakehouse_config::LakehouseConfig;
use lakehouse_config::required_engine_keys;

use crate::audit::PreflightAuditEvent;
use crate::audit::PreflightAuditSink;
use crate::cloud::CloudProbe;
use crate::cloud::ProbeError;
use crate::dependencies::missing_dependencies;
use crate::report::CheckKind;
use crate::report::CheckOutcome;
use crate::report::ValidationReport;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Detail recorded when cloud checks are disabled.
pub const CLOUD_CHECKS_DISABLED: &str = "cloud checks disabled";

// ============================================================================
// SECTION: Preflight
// ============================================================================

/// Check runner for one loaded configuration.
pub struct Preflight<'a> {
    /// Loaded settings.
    config: &'a LakehouseConfig,
    /// Cloud probe; `None` skips cloud checks.
    probe: Option<&'a dyn CloudProbe>,
    /// Audit sink receiving every outcome.
    audit: &'a dyn PreflightAuditSink,
    /// Jar directory override; resolved from settings when unset.
    jars_dir: Option<PathBuf>,
}

impl<'a> Preflight<'a> {
    /// Creates a runner with cloud checks disabled.
    #[must_use]
    pub fn new(config: &'a LakehouseConfig, audit: &'a dyn PreflightAuditSink) -> Self {
        Self {
            config,
            probe: None,
            audit,
            jars_dir: None,
        }
    }

    /// Enables cloud checks through `probe`.
    #[must_use]
    pub fn with_probe(mut self, probe: Option<&'a dyn CloudProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Overrides the jar directory instead of resolving `engine.jars_dir`.
    #[must_use]
    pub fn with_jars_dir(mut self, jars_dir: PathBuf) -> Self {
        self.jars_dir = Some(jars_dir);
        self
    }

    /// Returns the settings under check.
    #[must_use]
    pub const fn config(&self) -> &LakehouseConfig {
        self.config
    }

    /// Returns the jar directory used for dependency checks and options.
    ///
    /// # Errors
    ///
    /// Returns [`DeriveError`] when the configured directory cannot be
    /// resolved.
    pub fn jars_dir(&self) -> Result<PathBuf, DeriveError> {
        match &self.jars_dir {
            Some(dir) => Ok(dir.clone()),
            None => self.config.resolved_jars_dir(),
        }
    }

    /// Records `outcome` with the audit sink and returns it.
    fn record(&self, outcome: CheckOutcome) -> CheckOutcome {
        self.audit.record(&PreflightAuditEvent::from_outcome(&outcome));
        outcome
    }

    /// Runs `future` under the configured probe timeout.
    async fn bounded<T, F>(&self, probe: &'static str, future: F) -> Result<T, ProbeError>
    where
        F: Future<Output = Result<T, ProbeError>>,
    {
        let timeout_ms = self.config.probes.timeout_ms;
        tokio::time::timeout(Duration::from_millis(timeout_ms), future).await.unwrap_or(Err(
            ProbeError::Timeout {
                probe,
                timeout_ms,
            },
        ))
    }

    // ------------------------------------------------------------------------
    // Environment checks
    // ------------------------------------------------------------------------

    /// Checks every dependency jar exists in the jar directory.
    #[must_use]
    pub fn check_dependencies(&self) -> CheckOutcome {
        let outcome = match self.jars_dir() {
            Err(err) => CheckOutcome::fail(CheckKind::Dependencies, err.to_string()),
            Ok(dir) => {
                let missing = missing_dependencies(&dir, &self.config.engine.jars);
                let detail = dir.display().to_string();
                if missing.is_empty() {
                    CheckOutcome::pass(CheckKind::Dependencies, detail)
                } else {
                    missing.into_iter().fold(
                        CheckOutcome::fail(CheckKind::Dependencies, detail),
                        |outcome, jar| outcome.with_fact("missing_jar", jar),
                    )
                }
            }
        };
        self.record(outcome)
    }

    /// Resolves the caller identity through the probe.
    pub async fn check_identity(&self) -> CheckOutcome {
        let outcome = match self.probe {
            None => CheckOutcome::skipped(CheckKind::Identity, CLOUD_CHECKS_DISABLED),
            Some(probe) => match self.bounded("identity", probe.caller_identity()).await {
                Ok(identity) => {
                    let outcome = CheckOutcome::pass(CheckKind::Identity, identity.account);
                    match identity.arn {
                        Some(arn) => outcome.with_fact("arn", arn),
                        None => outcome,
                    }
                }
                Err(err) => CheckOutcome::fail(CheckKind::Identity, err.to_string()),
            },
        };
        self.record(outcome.with_fact("aws_profile", self.config.aws.profile.trim()))
    }

    /// Probes the warehouse bucket through the probe.
    pub async fn check_storage(&self) -> CheckOutcome {
        let bucket = self.config.storage.bucket.trim();
        let outcome = match self.probe {
            None => CheckOutcome::skipped(CheckKind::Storage, CLOUD_CHECKS_DISABLED),
            Some(probe) => match self.bounded("storage", probe.head_bucket(bucket)).await {
                Ok(()) => CheckOutcome::pass(CheckKind::Storage, bucket),
                Err(err) => CheckOutcome::fail(CheckKind::Storage, err.to_string()),
            },
        };
        self.record(outcome.with_fact("bucket", bucket))
    }

    /// Runs dependency, identity, and storage checks in order.
    pub async fn validate_environment(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        report.push(self.check_dependencies());
        report.push(self.check_identity().await);
        report.push(self.check_storage().await);
        report
    }

    // ------------------------------------------------------------------------
    // Derivation checks
    // ------------------------------------------------------------------------

    /// Builds the engine option map and checks the required keys are present.
    #[must_use]
    pub fn check_engine_config(&self) -> CheckOutcome {
        let outcome = match self.jars_dir() {
            Err(err) => CheckOutcome::fail(CheckKind::EngineConfig, err.to_string()),
            Ok(dir) => {
                let options = self.config.engine_config_in(&dir);
                let missing = options.missing_keys(&required_engine_keys(&self.config.catalog.name));
                let detail = options.len().to_string();
                if missing.is_empty() {
                    CheckOutcome::pass(CheckKind::EngineConfig, detail)
                } else {
                    missing.into_iter().fold(
                        CheckOutcome::fail(CheckKind::EngineConfig, detail),
                        |outcome, key| outcome.with_fact("missing_key", key),
                    )
                }
            }
        };
        self.record(outcome)
    }

    /// Builds the bootstrap SQL statements for inspection.
    #[must_use]
    pub fn check_sql(&self) -> CheckOutcome {
        let statements = self.config.sql_statements();
        let outcome = statements.labeled().iter().fold(
            CheckOutcome::pass(CheckKind::SqlGeneration, self.config.full_table_name())
                .with_fact("location", self.config.default_table_location()),
            |outcome, &(label, statement)| outcome.with_fact(label, statement),
        );
        self.record(outcome)
    }

    /// Compares `table_location(name)` against the warehouse formula.
    #[must_use]
    pub fn check_table_location(&self, table_name: &str) -> CheckOutcome {
        let location = self.config.table_location(table_name);
        let expected = format!("{}/{table_name}/", self.config.warehouse_path());
        let outcome = if location == expected {
            CheckOutcome::pass(CheckKind::TableLocation, table_name).with_fact("location", location)
        } else {
            CheckOutcome::fail(CheckKind::TableLocation, table_name)
                .with_fact("expected", expected)
                .with_fact("actual", location)
        };
        self.record(outcome)
    }
}

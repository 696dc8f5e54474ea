// crates/lakehouse-preflight/src/selftest.rs
// ============================================================================
// Module: Configuration Self-Test
// Description: Five-step exercise of the configuration surface.
// Purpose: Prove a config is ready before a notebook session is started.
// Dependencies: lakehouse-config, thiserror
// ============================================================================

//! ## Overview
//! The self-test walks the same path a notebook does: load settings, validate
//! the environment, build engine options, generate bootstrap SQL, and derive
//! table locations. Only the load step is fatal; every later step records its
//! outcomes and the run continues.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use lakehouse_config::ConfigError;
use lakehouse_config::LakehouseConfig;
use serde::Serialize;
use thiserror::Error;

use crate::audit::PreflightAuditEvent;
use crate::audit::PreflightAuditSink;
use crate::cloud::AwsCloudProbe;
use crate::cloud::CloudProbe;
use crate::report::CheckKind;
use crate::report::CheckOutcome;
use crate::validate::Preflight;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Table names whose locations the self-test derives.
pub const SELF_TEST_TABLES: [&str; 4] = ["customer", "orders", "products", "users"];

// ============================================================================
// SECTION: Types
// ============================================================================

/// Self-test steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfTestStepKind {
    /// Load settings and report the credential environment.
    LoadConfig,
    /// Run the environment validator.
    ValidateEnvironment,
    /// Build the engine option map.
    EngineConfig,
    /// Generate bootstrap SQL.
    SqlGeneration,
    /// Derive table locations.
    TableLocations,
}

impl SelfTestStepKind {
    /// One-based step number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::LoadConfig => 1,
            Self::ValidateEnvironment => 2,
            Self::EngineConfig => 3,
            Self::SqlGeneration => 4,
            Self::TableLocations => 5,
        }
    }

    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoadConfig => "load_config",
            Self::ValidateEnvironment => "validate_environment",
            Self::EngineConfig => "engine_config",
            Self::SqlGeneration => "sql_generation",
            Self::TableLocations => "table_locations",
        }
    }
}

/// Outcomes produced by one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfTestStep {
    /// Step identity.
    pub kind: SelfTestStepKind,
    /// Outcomes in execution order.
    pub outcomes: Vec<CheckOutcome>,
}

/// Full self-test report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelfTestReport {
    /// Steps in execution order.
    pub steps: Vec<SelfTestStep>,
}

impl SelfTestReport {
    /// Returns the step of `kind`.
    #[must_use]
    pub fn step(&self, kind: SelfTestStepKind) -> Option<&SelfTestStep> {
        self.steps.iter().find(|step| step.kind == kind)
    }

    /// Iterates failed outcomes across all steps.
    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.steps.iter().flat_map(|step| step.outcomes.iter()).filter(|outcome| outcome.is_failure())
    }

    /// Returns true when no outcome failed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Fatal self-test errors.
#[derive(Debug, Error)]
pub enum SelfTestError {
    /// Settings could not be loaded; no further step ran.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),
}

/// Where the self-test gets its cloud probe.
pub enum ProbeSource<'a> {
    /// Cloud checks are skipped.
    Disabled,
    /// Build an AWS probe from the loaded profile and region.
    Aws,
    /// Use a caller-provided probe.
    Provided(&'a dyn CloudProbe),
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Self-test runner.
pub struct SelfTest<'a> {
    /// Probe selection.
    probes: ProbeSource<'a>,
    /// Audit sink receiving every outcome.
    audit: &'a dyn PreflightAuditSink,
    /// Jar directory override.
    jars_dir: Option<PathBuf>,
}

impl<'a> SelfTest<'a> {
    /// Creates a runner with cloud checks disabled.
    #[must_use]
    pub const fn new(audit: &'a dyn PreflightAuditSink) -> Self {
        Self {
            probes: ProbeSource::Disabled,
            audit,
            jars_dir: None,
        }
    }

    /// Selects the probe source.
    #[must_use]
    pub fn with_probes(mut self, probes: ProbeSource<'a>) -> Self {
        self.probes = probes;
        self
    }

    /// Overrides the jar directory instead of resolving `engine.jars_dir`.
    #[must_use]
    pub fn with_jars_dir(mut self, jars_dir: PathBuf) -> Self {
        self.jars_dir = Some(jars_dir);
        self
    }

    /// Loads settings from `path` and runs every step.
    ///
    /// A load failure is recorded on the sink given to [`SelfTest::new`].
    /// Callers that pick the sink from the loaded `[audit]` section load the
    /// settings themselves and call [`SelfTest::run_loaded`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`SelfTestError::Load`] when settings cannot be loaded; no
    /// other step runs in that case.
    pub async fn run(&self, path: Option<&Path>) -> Result<SelfTestReport, SelfTestError> {
        let config = match LakehouseConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                let outcome = CheckOutcome::fail(CheckKind::ConfigLoad, err.to_string());
                self.audit.record(&PreflightAuditEvent::from_outcome(&outcome));
                return Err(SelfTestError::Load(err));
            }
        };
        Ok(self.run_loaded(&config).await)
    }

    /// Runs every step against already loaded settings.
    ///
    /// Step 1 reports the loaded settings; it cannot fail here.
    pub async fn run_loaded(&self, config: &LakehouseConfig) -> SelfTestReport {
        let mut report = SelfTestReport::default();
        report.steps.push(SelfTestStep {
            kind: SelfTestStepKind::LoadConfig,
            outcomes: vec![self.load_outcome(config, |key| std::env::var(key).ok())],
        });

        let aws_probe;
        let probe: Option<&dyn CloudProbe> = match self.probes {
            ProbeSource::Disabled => None,
            ProbeSource::Provided(probe) => Some(probe),
            ProbeSource::Aws => {
                aws_probe = AwsCloudProbe::connect(&config.credential_environment()).await;
                Some(&aws_probe as &dyn CloudProbe)
            }
        };
        let mut preflight = Preflight::new(config, self.audit).with_probe(probe);
        if let Some(dir) = &self.jars_dir {
            preflight = preflight.with_jars_dir(dir.clone());
        }

        report.steps.push(SelfTestStep {
            kind: SelfTestStepKind::ValidateEnvironment,
            outcomes: preflight.validate_environment().await.outcomes,
        });
        report.steps.push(SelfTestStep {
            kind: SelfTestStepKind::EngineConfig,
            outcomes: vec![preflight.check_engine_config()],
        });
        report.steps.push(SelfTestStep {
            kind: SelfTestStepKind::SqlGeneration,
            outcomes: vec![preflight.check_sql()],
        });
        report.steps.push(SelfTestStep {
            kind: SelfTestStepKind::TableLocations,
            outcomes: SELF_TEST_TABLES
                .iter()
                .map(|table| preflight.check_table_location(table))
                .collect(),
        });
        report
    }

    /// Builds and records the load-step outcome.
    ///
    /// The detail is the source path, or empty for settings parsed from a
    /// string.
    fn load_outcome<F>(&self, config: &LakehouseConfig, lookup: F) -> CheckOutcome
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = config
            .source_path
            .as_ref()
            .map_or_else(String::new, |path| path.display().to_string());
        let credentials = config.credential_environment();
        let drift = credentials.drift(lookup);
        let outcome = CheckOutcome::pass(CheckKind::ConfigLoad, source)
            .with_fact("aws_profile", credentials.profile.as_str())
            .with_fact("aws_region", credentials.region.as_str())
            .with_fact("s3_bucket", config.storage.bucket.trim())
            .with_fact("warehouse", config.warehouse_path());
        let outcome =
            drift.into_iter().fold(outcome, |outcome, key| outcome.with_fact("env_drift", key));
        self.audit.record(&PreflightAuditEvent::from_outcome(&outcome));
        outcome
    }
}

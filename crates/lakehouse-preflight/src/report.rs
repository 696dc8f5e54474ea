// crates/lakehouse-preflight/src/report.rs
// ============================================================================
// Module: Check Reports
// Description: Outcome values for individual checks and their aggregate.
// Purpose: Make continue-on-failure validation a first-class, testable value.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`CheckOutcome`] carries the check kind, a status, one primary detail
//! value, and keyed facts. Rendering (and localization) is left to callers:
//! `detail` and fact values are data, not sentences.
//!
//! Detail by kind:
//! - `config_load`: config source path.
//! - `dependencies`: resolved jar directory, or the resolution error.
//! - `identity`: account id, or the probe error.
//! - `storage`: bucket name, or the probe error.
//! - `engine_config`: option count, or the derivation error.
//! - `sql_generation`: full table name.
//! - `table_location`: table name.

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Identifies a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Settings load and credential environment.
    ConfigLoad,
    /// Dependency jar existence.
    Dependencies,
    /// Caller identity lookup.
    Identity,
    /// Warehouse bucket accessibility.
    Storage,
    /// Engine option map completeness.
    EngineConfig,
    /// Bootstrap SQL generation.
    SqlGeneration,
    /// Table location derivation.
    TableLocation,
}

impl CheckKind {
    /// Returns the stable label used in audit events and message keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigLoad => "config_load",
            Self::Dependencies => "dependencies",
            Self::Identity => "identity",
            Self::Storage => "storage",
            Self::EngineConfig => "engine_config",
            Self::SqlGeneration => "sql_generation",
            Self::TableLocation => "table_location",
        }
    }
}

/// Result status of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// The check passed.
    Pass,
    /// The check failed; execution continued.
    Fail,
    /// The check was not run.
    Skipped,
}

impl CheckStatus {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skipped => "skipped",
        }
    }
}

/// A keyed value attached to an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    /// Stable key (e.g. `missing_jar`).
    pub key: &'static str,
    /// Value.
    pub value: String,
}

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// Check that produced the outcome.
    pub kind: CheckKind,
    /// Status.
    pub status: CheckStatus,
    /// Primary detail value (see module docs).
    pub detail: String,
    /// Additional keyed values, in emission order.
    pub facts: Vec<Fact>,
}

impl CheckOutcome {
    /// Builds an outcome with no facts.
    #[must_use]
    pub fn new(kind: CheckKind, status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            detail: detail.into(),
            facts: Vec::new(),
        }
    }

    /// Builds a passing outcome.
    #[must_use]
    pub fn pass(kind: CheckKind, detail: impl Into<String>) -> Self {
        Self::new(kind, CheckStatus::Pass, detail)
    }

    /// Builds a failing outcome.
    #[must_use]
    pub fn fail(kind: CheckKind, detail: impl Into<String>) -> Self {
        Self::new(kind, CheckStatus::Fail, detail)
    }

    /// Builds a skipped outcome.
    #[must_use]
    pub fn skipped(kind: CheckKind, detail: impl Into<String>) -> Self {
        Self::new(kind, CheckStatus::Skipped, detail)
    }

    /// Appends a fact.
    #[must_use]
    pub fn with_fact(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.facts.push(Fact {
            key,
            value: value.into(),
        });
        self
    }

    /// Returns every fact value stored under `key`.
    pub fn facts_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.facts.iter().filter(move |fact| fact.key == key).map(|fact| fact.value.as_str())
    }

    /// Returns true when the outcome failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.status == CheckStatus::Fail
    }
}

/// Ordered collection of outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Outcomes in execution order.
    pub outcomes: Vec<CheckOutcome>,
}

impl ValidationReport {
    /// Appends an outcome.
    pub fn push(&mut self, outcome: CheckOutcome) {
        self.outcomes.push(outcome);
    }

    /// Returns the first outcome of `kind`.
    #[must_use]
    pub fn outcome(&self, kind: CheckKind) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|outcome| outcome.kind == kind)
    }

    /// Iterates failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_failure())
    }

    /// Returns true when no outcome failed (skipped outcomes do not count).
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures().next().is_none()
    }
}

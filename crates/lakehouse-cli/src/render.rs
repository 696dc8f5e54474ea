// crates/lakehouse-cli/src/render.rs
// ============================================================================
// Module: Report Rendering
// Description: Localized text for check outcomes and self-test reports.
// Purpose: Keep check logic free of presentation and presentation testable.
// Dependencies: lakehouse-config, lakehouse-preflight
// ============================================================================

//! ## Overview
//! Outcomes carry data; this module turns them into localized lines. Each
//! outcome renders as one headline prefixed by a status marker, followed by
//! indented fact lines for the facts worth showing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use lakehouse_config::summary::banner_rule;
use lakehouse_preflight::CheckKind;
use lakehouse_preflight::CheckOutcome;
use lakehouse_preflight::CheckStatus;
use lakehouse_preflight::SelfTestReport;
use lakehouse_preflight::SelfTestStepKind;
use lakehouse_preflight::ValidationReport;

use crate::t;

/// Indentation applied to fact lines.
const FACT_INDENT: &str = "   ";

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Returns the localized marker for `status`.
#[must_use]
pub fn status_marker(status: CheckStatus) -> String {
    match status {
        CheckStatus::Pass => t!("check.marker.pass"),
        CheckStatus::Fail => t!("check.marker.fail"),
        CheckStatus::Skipped => t!("check.marker.skipped"),
    }
}

/// Renders one outcome as a headline plus fact lines.
#[must_use]
pub fn outcome_lines(outcome: &CheckOutcome) -> Vec<String> {
    let mut lines = vec![format!("{} {}", status_marker(outcome.status), headline(outcome))];
    lines.extend(
        outcome
            .facts
            .iter()
            .filter_map(|fact| fact_line(fact.key, &fact.value))
            .map(|line| format!("{FACT_INDENT}{line}")),
    );
    lines
}

/// Joins every fact value stored under `key`.
fn joined(outcome: &CheckOutcome, key: &str) -> String {
    outcome.facts_for(key).collect::<Vec<_>>().join(", ")
}

/// Returns the localized headline for an outcome.
fn headline(outcome: &CheckOutcome) -> String {
    let detail = outcome.detail.as_str();
    match (outcome.kind, outcome.status) {
        (CheckKind::ConfigLoad, CheckStatus::Fail) => t!("check.config_load.fail", error = detail),
        (CheckKind::ConfigLoad, _) if detail.is_empty() => {
            t!("check.config_load.pass", path = t!("config.source.inline"))
        }
        (CheckKind::ConfigLoad, _) => t!("check.config_load.pass", path = detail),
        (CheckKind::Dependencies, CheckStatus::Fail) => {
            let jars = joined(outcome, "missing_jar");
            if jars.is_empty() {
                t!("check.dependencies.error", error = detail)
            } else {
                t!("check.dependencies.fail", dir = detail, jars = jars)
            }
        }
        (CheckKind::Dependencies, _) => t!("check.dependencies.pass", dir = detail),
        (CheckKind::Identity, CheckStatus::Pass) => t!("check.identity.pass", account = detail),
        (CheckKind::Identity, CheckStatus::Fail) => t!("check.identity.fail", error = detail),
        (CheckKind::Identity, CheckStatus::Skipped) => {
            t!("check.identity.skipped", reason = detail)
        }
        (CheckKind::Storage, CheckStatus::Pass) => t!("check.storage.pass", bucket = detail),
        (CheckKind::Storage, CheckStatus::Fail) => {
            t!("check.storage.fail", bucket = joined(outcome, "bucket"), error = detail)
        }
        (CheckKind::Storage, CheckStatus::Skipped) => t!("check.storage.skipped", reason = detail),
        (CheckKind::EngineConfig, CheckStatus::Fail) => {
            let keys = joined(outcome, "missing_key");
            if keys.is_empty() {
                t!("check.engine_config.error", error = detail)
            } else {
                t!("check.engine_config.fail", keys = keys)
            }
        }
        (CheckKind::EngineConfig, _) => t!("check.engine_config.pass", count = detail),
        (CheckKind::SqlGeneration, _) => t!("check.sql_generation.pass", table = detail),
        (CheckKind::TableLocation, CheckStatus::Fail) => t!(
            "check.table_location.fail",
            table = detail,
            expected = joined(outcome, "expected"),
            actual = joined(outcome, "actual")
        ),
        (CheckKind::TableLocation, _) => {
            t!("check.table_location.pass", table = detail, location = joined(outcome, "location"))
        }
    }
}

/// Returns the localized line for a fact, or `None` when the headline
/// already carries it.
fn fact_line(key: &str, value: &str) -> Option<String> {
    let line = match key {
        "aws_profile" => t!("check.fact.aws_profile", value = value),
        "aws_region" => t!("check.fact.aws_region", value = value),
        "s3_bucket" => t!("check.fact.s3_bucket", value = value),
        "warehouse" => t!("check.fact.warehouse", value = value),
        "env_drift" => t!("check.fact.env_drift", value = value),
        "arn" => t!("check.fact.arn", value = value),
        "create_database" => t!("check.fact.create_database", value = value),
        "drop_table" => t!("check.fact.drop_table", value = value),
        "create_table" => t!("check.fact.create_table", value = value),
        _ => return None,
    };
    Some(line)
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Renders a validation report followed by its verdict.
#[must_use]
pub fn validation_lines(report: &ValidationReport) -> Vec<String> {
    let mut lines: Vec<String> = report.outcomes.iter().flat_map(outcome_lines).collect();
    lines.push(String::new());
    let failures = report.failures().count();
    if failures == 0 {
        lines.push(t!("validate.ok"));
    } else {
        lines.push(t!("validate.failed", count = failures));
    }
    lines
}

/// Returns the localized title of a self-test step.
fn step_title(kind: SelfTestStepKind) -> String {
    match kind {
        SelfTestStepKind::LoadConfig => t!("selftest.step.load_config"),
        SelfTestStepKind::ValidateEnvironment => t!("selftest.step.validate_environment"),
        SelfTestStepKind::EngineConfig => t!("selftest.step.engine_config"),
        SelfTestStepKind::SqlGeneration => t!("selftest.step.sql_generation"),
        SelfTestStepKind::TableLocations => t!("selftest.step.table_locations"),
    }
}

/// Renders a full self-test run: banner, steps, summary, and next steps.
///
/// `config_path` names the file operators should edit.
#[must_use]
pub fn self_test_lines(report: &SelfTestReport, config_path: &str) -> Vec<String> {
    let rule = banner_rule();
    let mut lines = vec![rule.clone(), t!("selftest.title"), rule.clone()];
    for step in &report.steps {
        lines.push(String::new());
        lines.push(t!("selftest.step", number = step.kind.number(), title = step_title(step.kind)));
        lines.extend(step.outcomes.iter().flat_map(outcome_lines));
    }

    lines.push(String::new());
    lines.push(rule.clone());
    lines.push(t!("selftest.summary.title"));
    lines.push(rule.clone());
    let failures = report.failures().count();
    if failures == 0 {
        let pass = status_marker(CheckStatus::Pass);
        for line in [
            t!("selftest.summary.loads"),
            t!("selftest.summary.settings"),
            t!("selftest.summary.engine"),
            t!("selftest.summary.sql"),
            t!("selftest.summary.locations"),
        ] {
            lines.push(format!("{pass} {line}"));
        }
        lines.push(String::new());
        lines.push(t!("selftest.summary.ready"));
    } else {
        lines.push(format!(
            "{} {}",
            status_marker(CheckStatus::Fail),
            t!("selftest.summary.failed", count = failures)
        ));
    }
    lines.push(String::new());
    lines.push(t!("selftest.next.header"));
    lines.push(t!("selftest.next.env"));
    lines.push(t!("selftest.next.engine"));
    lines.push(t!("selftest.next.sql"));
    lines.push(String::new());
    lines.push(t!("selftest.next.edit", path = config_path));
    lines.push(rule);
    lines
}

/// Renders the self-test banner and a failed load step.
#[must_use]
pub fn self_test_load_failure_lines(error: &str) -> Vec<String> {
    let rule = banner_rule();
    let mut lines = vec![rule.clone(), t!("selftest.title"), rule, String::new()];
    let step = SelfTestStepKind::LoadConfig;
    lines.push(t!("selftest.step", number = step.number(), title = step_title(step)));
    lines.extend(outcome_lines(&CheckOutcome::fail(CheckKind::ConfigLoad, error)));
    lines
}

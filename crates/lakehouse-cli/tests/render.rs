// crates/lakehouse-cli/tests/render.rs
// ============================================================================
// Module: Report Rendering Tests
// Description: Localized lines for outcomes, validation, and self-test runs.
// Purpose: Pin the text operators read after a check run.
// Dependencies: lakehouse-cli render module and the `t!` macro.
// ============================================================================

//! ## Overview
//! Builds outcomes by hand and checks the rendered headline, fact lines, and
//! report framing. The locale is never set here, so output is English.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use lakehouse_cli::i18n::MessageArg;
use lakehouse_cli::i18n::translate;
use lakehouse_cli::render::outcome_lines;
use lakehouse_cli::render::self_test_lines;
use lakehouse_cli::render::self_test_load_failure_lines;
use lakehouse_cli::render::validation_lines;
use lakehouse_cli::t;
use lakehouse_preflight::CLOUD_CHECKS_DISABLED;
use lakehouse_preflight::CheckKind;
use lakehouse_preflight::CheckOutcome;
use lakehouse_preflight::SelfTestReport;
use lakehouse_preflight::SelfTestStep;
use lakehouse_preflight::SelfTestStepKind;
use lakehouse_preflight::ValidationReport;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn missing_jars_render_in_one_headline() {
    let outcome = CheckOutcome::fail(CheckKind::Dependencies, "/opt/jars")
        .with_fact("missing_jar", "a.jar")
        .with_fact("missing_jar", "b.jar");
    assert_eq!(
        outcome_lines(&outcome),
        vec!["❌ Missing dependency jars in /opt/jars: a.jar, b.jar"]
    );
}

#[test]
fn unresolvable_jar_directory_renders_error() {
    let outcome = CheckOutcome::fail(CheckKind::Dependencies, "home directory unavailable");
    assert_eq!(
        outcome_lines(&outcome),
        vec!["❌ Could not resolve the jar directory: home directory unavailable"]
    );
}

#[test]
fn load_outcome_renders_fact_lines() {
    let outcome = CheckOutcome::pass(CheckKind::ConfigLoad, "lakehouse.toml")
        .with_fact("aws_profile", "tarun_student")
        .with_fact("aws_region", "us-east-1");
    assert_eq!(
        outcome_lines(&outcome),
        vec![
            "✅ Configuration loaded from lakehouse.toml",
            "   AWS Profile: tarun_student",
            "   AWS Region: us-east-1",
        ]
    );
}

#[test]
fn inline_settings_render_localized_source() {
    let outcome = CheckOutcome::pass(CheckKind::ConfigLoad, "");
    assert_eq!(outcome_lines(&outcome), vec!["✅ Configuration loaded from (inline)"]);
}

#[test]
fn storage_failure_names_bucket() {
    let outcome = CheckOutcome::fail(CheckKind::Storage, "s3 error: AccessDenied")
        .with_fact("bucket", "tarun-lakehouse-bucket");
    assert_eq!(
        outcome_lines(&outcome),
        vec!["❌ S3 bucket check failed for tarun-lakehouse-bucket: s3 error: AccessDenied"]
    );
}

#[test]
fn validation_verdict_counts_failures() {
    let mut report = ValidationReport::default();
    report.push(CheckOutcome::pass(CheckKind::Dependencies, "/opt/jars"));
    report.push(CheckOutcome::skipped(CheckKind::Identity, CLOUD_CHECKS_DISABLED));
    report.push(CheckOutcome::fail(CheckKind::Storage, "timeout"));
    let lines = validation_lines(&report);
    assert_eq!(
        lines.last().map(String::as_str),
        Some("Environment validation found 1 failing check(s).")
    );
    assert!(lines.iter().any(|line| line.contains("AWS identity check skipped")));
}

#[test]
fn self_test_summary_depends_on_failures() {
    let passing = SelfTestReport {
        steps: vec![SelfTestStep {
            kind: SelfTestStepKind::TableLocations,
            outcomes: vec![
                CheckOutcome::pass(CheckKind::TableLocation, "orders")
                    .with_fact("location", "s3://b/p/orders/"),
            ],
        }],
    };
    let lines = self_test_lines(&passing, "lakehouse.toml");
    assert!(lines.contains(&"[Test 5] Testing table location derivation...".to_string()));
    assert!(lines.contains(&"✅ orders: s3://b/p/orders/".to_string()));
    assert!(lines.contains(&"Your session is ready to start.".to_string()));
    assert!(lines.contains(&"To change bucket, profile or region, edit lakehouse.toml only.".to_string()));

    let mut failing = passing;
    failing.steps[0].outcomes.push(
        CheckOutcome::fail(CheckKind::TableLocation, "users")
            .with_fact("expected", "s3://b/p/users/")
            .with_fact("actual", "s3://b/p//users/"),
    );
    let lines = self_test_lines(&failing, "lakehouse.toml");
    assert!(lines.contains(&"❌ users: expected s3://b/p/users/, got s3://b/p//users/".to_string()));
    assert!(lines.contains(&"❌ 1 check(s) failed; review the output above.".to_string()));
    assert!(!lines.contains(&"Your session is ready to start.".to_string()));
}

#[test]
fn load_failure_lines_stop_at_step_one() {
    let lines = self_test_load_failure_lines("config io error: missing.toml");
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[4], "[Test 1] Loading configuration...");
    assert_eq!(lines[5], "❌ Failed to load configuration: config io error: missing.toml");
}

#[test]
fn t_macro_matches_translate() {
    let direct = translate("config.validate.ok", vec![MessageArg::new("path", "a.toml")]);
    assert_eq!(t!("config.validate.ok", path = "a.toml"), direct);
    assert_eq!(direct, "Config valid: a.toml");
}

#[test]
fn translate_falls_back_to_key() {
    assert_eq!(translate("missing.key", Vec::new()), "missing.key");
}

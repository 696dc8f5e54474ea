//! Self-test runner tests for lakehouse-preflight.
// crates/lakehouse-preflight/tests/self_test.rs
// =============================================================================
// Module: Self-Test Tests
// Description: Five-step self-test against files on disk and fake probes.
// Purpose: Prove only the load step is fatal and every later step reports.
// =============================================================================

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

use std::fs;

use lakehouse_preflight::CheckKind;
use lakehouse_preflight::CheckStatus;
use lakehouse_preflight::ProbeSource;
use lakehouse_preflight::SELF_TEST_TABLES;
use lakehouse_preflight::SelfTest;
use lakehouse_preflight::SelfTestError;
use lakehouse_preflight::SelfTestStepKind;

mod common;

use common::FakeProbe;
use common::RecordingSink;

#[tokio::test]
async fn missing_config_is_fatal_and_recorded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sink = RecordingSink::default();
    let result = SelfTest::new(&sink).run(Some(&dir.path().join("missing.toml"))).await;

    match result {
        Err(SelfTestError::Load(err)) => assert!(err.to_string().starts_with("config io error")),
        Ok(report) => panic!("expected load failure, got {report:?}"),
    }
    let events = sink.events.lock().expect("lock");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].check, CheckKind::ConfigLoad);
    assert_eq!(events[0].status, CheckStatus::Fail);
}

#[tokio::test]
async fn invalid_config_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lakehouse.toml");
    fs::write(&path, "[aws]\nprofile = \"\"\n[storage]\nbucket = \"b\"\n").expect("write");
    let sink = RecordingSink::default();
    let result = SelfTest::new(&sink).run(Some(&path)).await;
    assert!(matches!(result, Err(SelfTestError::Load(_))));
}

#[tokio::test]
async fn runs_all_five_steps_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lakehouse.toml");
    fs::write(&path, common::MINIMAL_TOML).expect("write");
    let config = common::minimal_config().expect("config");
    common::stage_jars(&config, dir.path(), &[]).expect("stage");
    let sink = RecordingSink::default();
    let probe = FakeProbe::healthy();

    let report = SelfTest::new(&sink)
        .with_probes(ProbeSource::Provided(&probe))
        .with_jars_dir(dir.path().to_path_buf())
        .run(Some(&path))
        .await
        .expect("self-test");

    let kinds: Vec<SelfTestStepKind> = report.steps.iter().map(|step| step.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SelfTestStepKind::LoadConfig,
            SelfTestStepKind::ValidateEnvironment,
            SelfTestStepKind::EngineConfig,
            SelfTestStepKind::SqlGeneration,
            SelfTestStepKind::TableLocations,
        ]
    );
    assert!(report.all_passed(), "failures: {:?}", report.failures().collect::<Vec<_>>());

    let load = &report.step(SelfTestStepKind::LoadConfig).expect("load").outcomes[0];
    assert_eq!(load.detail, path.display().to_string());
    assert_eq!(load.facts_for("aws_profile").collect::<Vec<_>>(), vec!["tarun_student"]);
    assert_eq!(load.facts_for("aws_region").collect::<Vec<_>>(), vec!["us-east-1"]);
    assert_eq!(
        load.facts_for("warehouse").collect::<Vec<_>>(),
        vec!["s3://tarun-lakehouse-bucket/catalogs/glue"]
    );
}

#[tokio::test]
async fn later_steps_run_after_environment_failures() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = common::minimal_config().expect("config");
    let sink = RecordingSink::default();
    let probe = FakeProbe::bucket_missing();

    let report = SelfTest::new(&sink)
        .with_probes(ProbeSource::Provided(&probe))
        .with_jars_dir(dir.path().join("no-jars"))
        .run_loaded(&config)
        .await;

    assert_eq!(report.steps.len(), 5);
    assert!(!report.all_passed());
    let failed: Vec<CheckKind> = report.failures().map(|outcome| outcome.kind).collect();
    assert_eq!(failed, vec![CheckKind::Dependencies, CheckKind::Storage]);
    let load = &report.step(SelfTestStepKind::LoadConfig).expect("load").outcomes[0];
    assert!(load.detail.is_empty());
    let engine = &report.step(SelfTestStepKind::EngineConfig).expect("engine").outcomes[0];
    assert_eq!(engine.status, CheckStatus::Pass);
    assert_eq!(engine.detail, "12");
}

#[tokio::test]
async fn table_location_step_covers_every_self_test_table() {
    let config = common::minimal_config().expect("config");
    let sink = RecordingSink::default();
    let report = SelfTest::new(&sink).run_loaded(&config).await;

    let step = report.step(SelfTestStepKind::TableLocations).expect("locations");
    assert_eq!(step.outcomes.len(), SELF_TEST_TABLES.len());
    for (outcome, table) in step.outcomes.iter().zip(SELF_TEST_TABLES) {
        assert_eq!(outcome.detail, table);
        assert_eq!(
            outcome.facts_for("location").collect::<Vec<_>>(),
            vec![format!("s3://tarun-lakehouse-bucket/catalogs/glue/{table}/")]
        );
    }
}

#[tokio::test]
async fn sql_step_carries_statements_and_location() {
    let config = common::minimal_config().expect("config");
    let sink = RecordingSink::default();
    let report = SelfTest::new(&sink).run_loaded(&config).await;

    let sql = &report.step(SelfTestStepKind::SqlGeneration).expect("sql").outcomes[0];
    assert_eq!(sql.detail, "glue.prod.customer");
    assert_eq!(
        sql.facts_for("drop_table").collect::<Vec<_>>(),
        vec!["DROP TABLE IF EXISTS glue.prod.customer"]
    );
    assert_eq!(
        sql.facts_for("location").collect::<Vec<_>>(),
        vec!["s3://tarun-lakehouse-bucket/catalogs/glue/customer/"]
    );
    assert!(
        sql.facts_for("create_table")
            .all(|text| text.ends_with("LOCATION 's3://tarun-lakehouse-bucket/catalogs/glue/customer/'"))
    );
}

#[tokio::test]
async fn every_outcome_is_audited() {
    let config = common::minimal_config().expect("config");
    let sink = RecordingSink::default();
    let report = SelfTest::new(&sink).run_loaded(&config).await;

    let outcome_count: usize = report.steps.iter().map(|step| step.outcomes.len()).sum();
    assert_eq!(sink.checks().len(), outcome_count);
    assert_eq!(sink.checks()[0], CheckKind::ConfigLoad);
}

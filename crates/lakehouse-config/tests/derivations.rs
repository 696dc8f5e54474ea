//! Derived value tests for lakehouse-config.
// crates/lakehouse-config/tests/derivations.rs
// =============================================================================
// Module: Derived Value Tests
// Description: Warehouse paths, table locations, identifiers, and SQL text.
// Purpose: Pin the exact strings consumed by Spark and the Glue catalog.
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

use lakehouse_config::LakehouseConfig;
use lakehouse_config::render_summary;

mod common;

fn config() -> LakehouseConfig {
    common::minimal_config().expect("minimal config")
}

#[test]
fn orders_location_matches_known_path() {
    assert_eq!(
        config().table_location("orders"),
        "s3://tarun-lakehouse-bucket/catalogs/glue/orders/"
    );
}

#[test]
fn default_table_identifiers() {
    let config = config();
    assert_eq!(config.full_table_name(), "glue.prod.customer");
    assert_eq!(config.database_identifier(), "glue.prod");
    assert_eq!(
        config.default_table_location(),
        "s3://tarun-lakehouse-bucket/catalogs/glue/customer/"
    );
}

#[test]
fn table_location_echoes_empty_and_unsafe_names() {
    let config = config();
    let warehouse = config.warehouse_path();
    assert_eq!(config.table_location(""), format!("{warehouse}//"));
    assert_eq!(config.table_location("../x y"), format!("{warehouse}/../x y/"));
}

#[test]
fn trailing_prefix_slash_is_not_doubled() {
    let mut config = config();
    config.storage.prefix = "catalogs/glue/".to_string();
    assert_eq!(config.warehouse_path(), "s3://tarun-lakehouse-bucket/catalogs/glue");
}

#[test]
fn empty_prefix_uses_bucket_root() {
    let mut config = config();
    config.storage.prefix = String::new();
    assert_eq!(config.warehouse_path(), "s3://tarun-lakehouse-bucket");
    assert_eq!(config.table_location("orders"), "s3://tarun-lakehouse-bucket/orders/");
}

#[test]
fn changing_bucket_changes_only_location_values() {
    let before = config();
    let mut after = before.clone();
    after.storage.bucket = "other-bucket".to_string();

    assert_ne!(before.warehouse_path(), after.warehouse_path());
    assert_ne!(before.table_location("orders"), after.table_location("orders"));
    assert_eq!(after.warehouse_path(), "s3://other-bucket/catalogs/glue");

    assert_eq!(before.full_table_name(), after.full_table_name());
    assert_eq!(before.database_identifier(), after.database_identifier());
    assert_eq!(before.credential_environment(), after.credential_environment());
    assert_eq!(before.sql_statements().drop_table, after.sql_statements().drop_table);
    assert_eq!(
        before.sql_statements().create_database,
        after.sql_statements().create_database
    );
}

#[test]
fn changing_table_changes_identifier_but_not_warehouse() {
    let before = config();
    let mut after = before.clone();
    after.catalog.table = "orders".to_string();
    assert_eq!(before.warehouse_path(), after.warehouse_path());
    assert_eq!(after.full_table_name(), "glue.prod.orders");
    assert_eq!(after.default_table_location(), after.table_location("orders"));
}

#[test]
fn drop_statement_is_exact() {
    assert_eq!(config().sql_statements().drop_table, "DROP TABLE IF EXISTS glue.prod.customer");
}

#[test]
fn create_database_statement_is_exact() {
    assert_eq!(
        config().sql_statements().create_database,
        "CREATE DATABASE IF NOT EXISTS glue.prod"
    );
}

#[test]
fn create_table_statement_embeds_settings() {
    let statement = config().sql_statements().create_table;
    let expected = "CREATE TABLE IF NOT EXISTS glue.prod.customer (\n    id string,\n    name \
                    string,\n    price decimal(10,2)\n)\nUSING iceberg\nTBLPROPERTIES (\n    \
                    'table_type'='ICEBERG',\n    'format-version'='2'\n)\nLOCATION \
                    's3://tarun-lakehouse-bucket/catalogs/glue/customer/'";
    assert_eq!(statement, expected);
}

#[test]
fn credential_environment_exports_profile_and_region() {
    let exports = config().credential_environment().shell_exports();
    assert_eq!(
        exports,
        vec![
            "export AWS_PROFILE=tarun_student".to_string(),
            "export AWS_DEFAULT_REGION=us-east-1".to_string(),
        ]
    );
}

#[test]
fn summary_reflects_current_settings() {
    let mut config = config();
    config.storage.bucket = "summary-bucket".to_string();
    let summary = render_summary(&config);
    assert!(summary.contains("S3 Bucket:          summary-bucket"));
    assert!(summary.contains("s3://summary-bucket/catalogs/glue/customer/"));
}

// crates/lakehouse-config/tests/proptest_derivations.rs
// ============================================================================
// Module: Derivation Property-Based Tests
// Description: Property tests for location and option map invariants.
// Purpose: Hold the derivation formulas across arbitrary inputs.
// ============================================================================

//! Property-based tests for derived value invariants.

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

use std::path::Path;

use lakehouse_config::LakehouseConfig;
use lakehouse_config::required_engine_keys;
use proptest::prelude::*;

mod common;

fn base() -> LakehouseConfig {
    common::minimal_config().expect("minimal config")
}

proptest! {
    #[test]
    fn table_location_matches_formula(table in ".*") {
        let config = base();
        let expected = format!("{}/{}/", config.warehouse_path(), table);
        prop_assert_eq!(config.table_location(&table), expected);
    }

    #[test]
    fn table_location_is_idempotent(table in "[a-z_]{0,16}") {
        let config = base();
        prop_assert_eq!(config.table_location(&table), config.table_location(&table));
    }

    #[test]
    fn bucket_change_moves_warehouse_only(bucket in "[a-z0-9][a-z0-9-]{1,40}[a-z0-9]") {
        let before = base();
        let mut after = before.clone();
        after.storage.bucket.clone_from(&bucket);
        prop_assert!(after.validate().is_ok());
        prop_assert_eq!(after.warehouse_path(), format!("s3://{bucket}/catalogs/glue"));
        prop_assert_eq!(before.full_table_name(), after.full_table_name());
        prop_assert_eq!(before.catalog_options().len(), after.catalog_options().len());
        prop_assert_eq!(
            before.session_options(Path::new("/jars")),
            after.session_options(Path::new("/jars"))
        );
    }

    #[test]
    fn options_superset_of_required_keys(catalog in "[a-z][a-z0-9_]{0,12}") {
        let mut config = base();
        config.catalog.name.clone_from(&catalog);
        let options = config.engine_config_in(Path::new("/jars"));
        prop_assert!(options.missing_keys(&required_engine_keys(&catalog)).is_empty());
    }
}

// crates/lakehouse-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for lakehouse-config integration tests.
// Purpose: Reduce duplication across integration tests for lakehouse-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use lakehouse_config::ConfigError;
use lakehouse_config::LakehouseConfig;

/// Minimal TOML carrying only the settings without defaults.
pub const MINIMAL_TOML: &str = r#"
[aws]
profile = "tarun_student"

[storage]
bucket = "tarun-lakehouse-bucket"
"#;

/// Parses and validates a TOML string.
pub fn config_from_toml(toml_str: &str) -> Result<LakehouseConfig, ConfigError> {
    LakehouseConfig::parse(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<LakehouseConfig, ConfigError> {
    config_from_toml(MINIMAL_TOML)
}

/// Asserts a result failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

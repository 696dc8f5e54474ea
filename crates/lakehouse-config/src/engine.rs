// crates/lakehouse-config/src/engine.rs
// ============================================================================
// Module: Engine Options
// Description: Spark session option map for Iceberg on a Glue catalog.
// Purpose: Assemble the exact key/value set the engine reads at startup.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The engine option map is the merge of two subsets: session options
//! (application name, jars, classpaths, extensions, vectorization) and
//! catalog options (default catalog, catalog implementation, Glue type,
//! warehouse, S3 file IO, client region). Key names are consumed verbatim by
//! Spark and must not change.
//!
//! ## Invariants
//! - Every session key survives the merge with the catalog subset.
//! - The map is ordered, so renderings are deterministic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::LakehouseConfig;
use crate::paths::DeriveError;
use crate::paths::shell_quote;

// ============================================================================
// SECTION: Keys and Values
// ============================================================================

/// Spark application name key.
pub const KEY_APP_NAME: &str = "spark.app.name";
/// Comma-separated jar list key.
pub const KEY_JARS: &str = "spark.jars";
/// Driver classpath key.
pub const KEY_DRIVER_CLASSPATH: &str = "spark.driver.extraClassPath";
/// Executor classpath key.
pub const KEY_EXECUTOR_CLASSPATH: &str = "spark.executor.extraClassPath";
/// SQL extensions key.
pub const KEY_SQL_EXTENSIONS: &str = "spark.sql.extensions";
/// Iceberg vectorized read toggle key.
pub const KEY_VECTORIZATION: &str = "spark.sql.iceberg.vectorization.enabled";
/// Default catalog key.
pub const KEY_DEFAULT_CATALOG: &str = "spark.sql.defaultCatalog";
/// Prefix of per-catalog keys.
pub const CATALOG_KEY_PREFIX: &str = "spark.sql.catalog";

/// Iceberg SQL extensions class.
pub const ICEBERG_EXTENSIONS_CLASS: &str =
    "org.apache.iceberg.spark.extensions.IcebergSparkSessionExtensions";
/// Iceberg Spark catalog implementation class.
pub const SPARK_CATALOG_CLASS: &str = "org.apache.iceberg.spark.SparkCatalog";
/// Iceberg catalog type tag for Glue.
pub const GLUE_CATALOG_TYPE: &str = "glue";
/// Iceberg S3 file IO implementation class.
pub const S3_FILE_IO_CLASS: &str = "org.apache.iceberg.aws.s3.S3FileIO";

/// Separator for `spark.jars`.
pub const JAR_LIST_SEPARATOR: &str = ",";
/// Separator for JVM classpath entries on this platform.
pub const CLASSPATH_SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

// ============================================================================
// SECTION: Engine Options
// ============================================================================

/// Ordered engine option map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EngineOptions(BTreeMap<String, String>);

impl EngineOptions {
    /// Creates an empty option map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts an option, returning any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Adds every option from `other`; colliding keys take `other`'s value.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns the required keys absent from this map, in input order.
    #[must_use]
    pub fn missing_keys<S: AsRef<str>>(&self, required: &[S]) -> Vec<String> {
        required
            .iter()
            .map(AsRef::as_ref)
            .filter(|key| !self.contains_key(key))
            .map(ToString::to_string)
            .collect()
    }

    /// Renders `spark-defaults.conf` lines.
    #[must_use]
    pub fn to_properties(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            out.push_str(key);
            out.push(' ');
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    /// Renders `--conf key=value` argument pairs for `spark-submit`.
    #[must_use]
    pub fn to_submit_args(&self) -> Vec<String> {
        self.iter().flat_map(|(key, value)| ["--conf".to_string(), format!("{key}={value}")]).collect()
    }

    /// Renders one `--conf key=value` line per option, quoted for POSIX
    /// shells so values with spaces survive word splitting.
    #[must_use]
    pub fn to_shell_args(&self) -> Vec<String> {
        self.iter()
            .map(|(key, value)| format!("--conf {}", shell_quote(&format!("{key}={value}"))))
            .collect()
    }

    /// Renders the map as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Returns a per-catalog key, `spark.sql.catalog.<catalog>[.<suffix>]`.
#[must_use]
pub fn catalog_key(catalog: &str, suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) => format!("{CATALOG_KEY_PREFIX}.{catalog}.{suffix}"),
        None => format!("{CATALOG_KEY_PREFIX}.{catalog}"),
    }
}

/// Keys a usable session must carry for `catalog`.
#[must_use]
pub fn required_engine_keys(catalog: &str) -> Vec<String> {
    vec![
        KEY_APP_NAME.to_string(),
        KEY_JARS.to_string(),
        KEY_DRIVER_CLASSPATH.to_string(),
        KEY_SQL_EXTENSIONS.to_string(),
        KEY_DEFAULT_CATALOG.to_string(),
        catalog_key(catalog, None),
        catalog_key(catalog, Some("type")),
        catalog_key(catalog, Some("warehouse")),
        catalog_key(catalog, Some("client.region")),
    ]
}

/// Joins paths with `separator` using their display form.
fn join_paths(paths: &[PathBuf], separator: &str) -> String {
    paths.iter().map(|path| path.display().to_string()).collect::<Vec<_>>().join(separator)
}

impl LakehouseConfig {
    /// Builds the session subset for jars resolved under `jars_dir`.
    #[must_use]
    pub fn session_options(&self, jars_dir: &Path) -> EngineOptions {
        let jar_paths = self.jar_paths_in(jars_dir);
        let classpath = join_paths(&jar_paths, CLASSPATH_SEPARATOR);
        let mut options = EngineOptions::new();
        options.insert(KEY_APP_NAME, self.engine.app_name.trim());
        options.insert(KEY_JARS, join_paths(&jar_paths, JAR_LIST_SEPARATOR));
        options.insert(KEY_DRIVER_CLASSPATH, classpath.clone());
        options.insert(KEY_EXECUTOR_CLASSPATH, classpath);
        options.insert(KEY_SQL_EXTENSIONS, ICEBERG_EXTENSIONS_CLASS);
        options.insert(KEY_VECTORIZATION, self.table_format.vectorization.to_string());
        options
    }

    /// Builds the Glue catalog subset.
    #[must_use]
    pub fn catalog_options(&self) -> EngineOptions {
        let catalog = self.catalog.name.trim();
        let mut options = EngineOptions::new();
        options.insert(KEY_DEFAULT_CATALOG, catalog);
        options.insert(catalog_key(catalog, None), SPARK_CATALOG_CLASS);
        options.insert(catalog_key(catalog, Some("type")), GLUE_CATALOG_TYPE);
        options.insert(catalog_key(catalog, Some("warehouse")), self.warehouse_path());
        options.insert(catalog_key(catalog, Some("io-impl")), S3_FILE_IO_CLASS);
        options.insert(catalog_key(catalog, Some("client.region")), self.aws.region.trim());
        options
    }

    /// Builds the full option map with jars resolved under `jars_dir`.
    #[must_use]
    pub fn engine_config_in(&self, jars_dir: &Path) -> EngineOptions {
        let mut options = self.session_options(jars_dir);
        options.merge(self.catalog_options());
        options
    }

    /// Builds the full option map, resolving `~` in the jar directory.
    ///
    /// # Errors
    ///
    /// Returns [`DeriveError`] when the jar directory cannot be resolved.
    pub fn engine_config(&self) -> Result<EngineOptions, DeriveError> {
        let jars_dir = self.resolved_jars_dir()?;
        Ok(self.engine_config_in(&jars_dir))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

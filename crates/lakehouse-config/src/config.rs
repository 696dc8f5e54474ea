// crates/lakehouse-config/src/config.rs
// ============================================================================
// Module: Lakehouse Configuration
// Description: Configuration loading and validation for Lakehouse Preflight.
// Purpose: Provide strict, fail-closed settings parsing with hard limits.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Settings are loaded from a TOML file with strict size and path limits.
//! Missing or invalid settings fail closed; nothing downstream runs against a
//! half-valid configuration. The loaded [`LakehouseConfig`] is immutable and
//! holds only primary settings; derived values live in [`crate::paths`],
//! [`crate::engine`], and [`crate::sql`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "lakehouse.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "LAKEHOUSE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Minimum S3 bucket name length.
pub(crate) const MIN_BUCKET_NAME_LENGTH: usize = 3;
/// Maximum S3 bucket name length.
pub(crate) const MAX_BUCKET_NAME_LENGTH: usize = 63;
/// Maximum number of dependency jars.
pub(crate) const MAX_DEPENDENCY_JARS: usize = 64;
/// Maximum number of table columns.
pub(crate) const MAX_TABLE_COLUMNS: usize = 256;
/// Minimum probe timeout in milliseconds.
pub(crate) const MIN_PROBE_TIMEOUT_MS: u64 = 100;
/// Maximum probe timeout in milliseconds.
pub(crate) const MAX_PROBE_TIMEOUT_MS: u64 = 60_000;
/// Default probe timeout in milliseconds.
pub(crate) const DEFAULT_PROBE_TIMEOUT_MS: u64 = 10_000;
/// Iceberg table format versions accepted by the catalog.
pub(crate) const SUPPORTED_FORMAT_VERSIONS: &[&str] = &["1", "2", "3"];

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Lakehouse session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LakehouseConfig {
    /// AWS credential profile and region.
    pub aws: AwsConfig,
    /// S3 warehouse location.
    pub storage: StorageConfig,
    /// Glue catalog, database, and default table.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Iceberg table properties.
    #[serde(default)]
    pub table_format: TableFormatConfig,
    /// Spark session name and dependency jars.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Cloud probe behavior.
    #[serde(default)]
    pub probes: ProbeConfig,
    /// Audit event logging for validation checks.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Path the configuration was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl LakehouseConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit path, then `LAKEHOUSE_CONFIG`, then
    /// `lakehouse.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| {
            ConfigError::Io(format!("{}: {err}", resolved.display()))
        })?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::parse(content)?;
        config.source_path = Some(resolved);
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aws.validate()?;
        self.storage.validate()?;
        self.catalog.validate()?;
        self.table_format.validate()?;
        self.engine.validate()?;
        self.probes.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

/// AWS credential configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AwsConfig {
    /// Named credential profile used for all cloud calls.
    pub profile: String,
    /// Region for the catalog client and probes.
    #[serde(default = "default_region")]
    pub region: String,
}

impl AwsConfig {
    /// Validates AWS settings.
    fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty("aws.profile", &self.profile)?;
        require_non_empty("aws.region", &self.region)?;
        if self.region.trim().contains(char::is_whitespace) {
            return Err(ConfigError::Invalid("aws.region must not contain whitespace".to_string()));
        }
        Ok(())
    }
}

/// S3 warehouse configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Bucket holding the warehouse.
    pub bucket: String,
    /// Key prefix inside the bucket (empty for the bucket root).
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl StorageConfig {
    /// Validates storage settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_bucket_name(&self.bucket)?;
        validate_warehouse_prefix(&self.prefix)
    }
}

/// Glue catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Spark catalog name registered for Glue.
    #[serde(default = "default_catalog_name")]
    pub name: String,
    /// Glue database name.
    #[serde(default = "default_database_name")]
    pub database: String,
    /// Default table name.
    #[serde(default = "default_table_name")]
    pub table: String,
    /// Columns used when generating the create-table statement.
    #[serde(default = "default_columns")]
    pub columns: Vec<ColumnConfig>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            name: default_catalog_name(),
            database: default_database_name(),
            table: default_table_name(),
            columns: default_columns(),
        }
    }
}

impl CatalogConfig {
    /// Validates catalog settings.
    fn validate(&self) -> Result<(), ConfigError> {
        require_identifier("catalog.name", &self.name)?;
        require_identifier("catalog.database", &self.database)?;
        require_identifier("catalog.table", &self.table)?;
        if self.columns.is_empty() {
            return Err(ConfigError::Invalid(
                "catalog.columns must list at least one column".to_string(),
            ));
        }
        if self.columns.len() > MAX_TABLE_COLUMNS {
            return Err(ConfigError::Invalid("catalog.columns exceeds max entries".to_string()));
        }
        let mut seen = BTreeSet::new();
        for column in &self.columns {
            require_identifier("catalog.columns.name", &column.name)?;
            require_non_empty("catalog.columns.type", &column.data_type)?;
            if !seen.insert(column.name.trim().to_ascii_lowercase()) {
                return Err(ConfigError::Invalid(format!(
                    "catalog.columns contains duplicate column {}",
                    column.name.trim()
                )));
            }
        }
        Ok(())
    }
}

/// A single table column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColumnConfig {
    /// Column name.
    pub name: String,
    /// Spark SQL type (e.g. `decimal(10,2)`).
    #[serde(rename = "type")]
    pub data_type: String,
}

impl ColumnConfig {
    /// Builds a column from name and type.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Iceberg table format configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TableFormatConfig {
    /// Iceberg format version tag.
    #[serde(default = "default_format_version")]
    pub format_version: String,
    /// Glue table type tag.
    #[serde(default = "default_table_type")]
    pub table_type: String,
    /// Enables Iceberg vectorized reads.
    #[serde(default)]
    pub vectorization: bool,
}

impl Default for TableFormatConfig {
    fn default() -> Self {
        Self {
            format_version: default_format_version(),
            table_type: default_table_type(),
            vectorization: false,
        }
    }
}

impl TableFormatConfig {
    /// Validates table format settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_FORMAT_VERSIONS.contains(&self.format_version.trim()) {
            return Err(ConfigError::Invalid(format!(
                "table_format.format_version must be one of {}",
                SUPPORTED_FORMAT_VERSIONS.join(", ")
            )));
        }
        require_non_empty("table_format.table_type", &self.table_type)?;
        if self.table_type.contains('\'') {
            return Err(ConfigError::Invalid(
                "table_format.table_type must not contain quotes".to_string(),
            ));
        }
        Ok(())
    }
}

/// Spark session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Spark application name.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Directory holding dependency jars; a leading `~` means the home dir.
    #[serde(default = "default_jars_dir")]
    pub jars_dir: String,
    /// Required jar file names, in classpath order.
    #[serde(default = "default_jars")]
    pub jars: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            jars_dir: default_jars_dir(),
            jars: default_jars(),
        }
    }
}

impl EngineConfig {
    /// Validates engine settings.
    fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty("engine.app_name", &self.app_name)?;
        validate_path_string("engine.jars_dir", &self.jars_dir)?;
        if self.jars.is_empty() {
            return Err(ConfigError::Invalid("engine.jars must list at least one jar".to_string()));
        }
        if self.jars.len() > MAX_DEPENDENCY_JARS {
            return Err(ConfigError::Invalid("engine.jars exceeds max entries".to_string()));
        }
        let mut seen = BTreeSet::new();
        for jar in &self.jars {
            validate_jar_name(jar)?;
            if !seen.insert(jar.as_str()) {
                return Err(ConfigError::Invalid(format!("engine.jars contains duplicate {jar}")));
            }
        }
        Ok(())
    }
}

/// Cloud probe configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// Per-probe timeout in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
        }
    }
}

impl ProbeConfig {
    /// Validates probe settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PROBE_TIMEOUT_MS ..= MAX_PROBE_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "probes.timeout_ms must be between {MIN_PROBE_TIMEOUT_MS} and \
                 {MAX_PROBE_TIMEOUT_MS}"
            )));
        }
        Ok(())
    }
}

/// Audit logging configuration for validation checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Enables JSON-line audit events.
    #[serde(default)]
    pub enabled: bool,
    /// Optional audit log path (stderr when unset).
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AuditConfig {
    /// Validates audit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", &path.to_string_lossy())?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default AWS region.
fn default_region() -> String {
    "us-east-1".to_string()
}

/// Default warehouse prefix.
fn default_prefix() -> String {
    "catalogs/glue".to_string()
}

/// Default Spark catalog name.
fn default_catalog_name() -> String {
    "glue".to_string()
}

/// Default Glue database.
fn default_database_name() -> String {
    "prod".to_string()
}

/// Default table name.
fn default_table_name() -> String {
    "customer".to_string()
}

/// Default demo table columns.
fn default_columns() -> Vec<ColumnConfig> {
    vec![
        ColumnConfig::new("id", "string"),
        ColumnConfig::new("name", "string"),
        ColumnConfig::new("price", "decimal(10,2)"),
    ]
}

/// Default Iceberg format version.
fn default_format_version() -> String {
    "2".to_string()
}

/// Default Glue table type.
fn default_table_type() -> String {
    "ICEBERG".to_string()
}

/// Default Spark application name.
fn default_app_name() -> String {
    "Iceberg-Glue-Demo".to_string()
}

/// Default jar directory.
fn default_jars_dir() -> String {
    "~/iceberg/jars".to_string()
}

/// Default dependency jars for Spark 4.0 + Iceberg 1.10 + AWS SDK v2.
fn default_jars() -> Vec<String> {
    [
        "bundle-2.31.63.jar",
        "url-connection-client-2.31.63.jar",
        "glue-2.31.63.jar",
        "iceberg-aws-1.10.0.jar",
        "iceberg-spark-runtime-4.0_2.13-1.10.0.jar",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

/// Default probe timeout.
const fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Rejects empty or whitespace-only values.
fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    Ok(())
}

/// Rejects values that cannot be spliced into a dotted SQL identifier.
fn require_identifier(field: &str, value: &str) -> Result<(), ConfigError> {
    require_non_empty(field, value)?;
    if value.contains(['.', '`', '\'', '"']) || value.contains(char::is_whitespace) {
        return Err(ConfigError::Invalid(format!(
            "{field} must not contain dots, quotes, or whitespace"
        )));
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates an S3 bucket name.
fn validate_bucket_name(value: &str) -> Result<(), ConfigError> {
    require_non_empty("storage.bucket", value)?;
    if !(MIN_BUCKET_NAME_LENGTH ..= MAX_BUCKET_NAME_LENGTH).contains(&value.len()) {
        return Err(ConfigError::Invalid(format!(
            "storage.bucket must be {MIN_BUCKET_NAME_LENGTH} to {MAX_BUCKET_NAME_LENGTH} \
             characters"
        )));
    }
    if !value.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '.')
    {
        return Err(ConfigError::Invalid(
            "storage.bucket may only contain lowercase letters, digits, '.' and '-'".to_string(),
        ));
    }
    let edges_ok = value
        .chars()
        .next()
        .zip(value.chars().last())
        .is_some_and(|(first, last)| first.is_ascii_alphanumeric() && last.is_ascii_alphanumeric());
    if !edges_ok {
        return Err(ConfigError::Invalid(
            "storage.bucket must start and end with a letter or digit".to_string(),
        ));
    }
    Ok(())
}

/// Validates the warehouse prefix inside the bucket.
fn validate_warehouse_prefix(value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if trimmed.contains('\\') {
        return Err(ConfigError::Invalid(
            "storage.prefix must not contain backslashes".to_string(),
        ));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("storage.prefix exceeds max length".to_string()));
    }
    if trimmed.starts_with('/') {
        return Err(ConfigError::Invalid("storage.prefix must be relative".to_string()));
    }
    let normalized = trimmed.strip_suffix('/').unwrap_or(trimmed);
    for segment in normalized.split('/') {
        if segment.is_empty() {
            return Err(ConfigError::Invalid(
                "storage.prefix must not contain empty segments".to_string(),
            ));
        }
        if segment == "." || segment == ".." {
            return Err(ConfigError::Invalid(
                "storage.prefix must not contain relative segments".to_string(),
            ));
        }
        if segment.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("storage.prefix segment too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a jar entry is a bare file name.
fn validate_jar_name(value: &str) -> Result<(), ConfigError> {
    require_non_empty("engine.jars entry", value)?;
    let mut components = Path::new(value).components();
    let is_bare = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
        && !value.contains(['/', '\\']);
    if !is_bare {
        return Err(ConfigError::Invalid(format!(
            "engine.jars entry {value} must be a file name without directories"
        )));
    }
    if value.len() > MAX_PATH_COMPONENT_LENGTH {
        return Err(ConfigError::Invalid(format!("engine.jars entry {value} is too long")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

// crates/lakehouse-config/src/paths.rs
// ============================================================================
// Module: Derived Locations
// Description: Warehouse paths, table identifiers, and jar locations.
// Purpose: Recompute every dependent value from settings on each read.
// Dependencies: dirs, thiserror
// ============================================================================

//! ## Overview
//! Derived values are never stored next to their inputs. Each accessor in
//! this module recomputes from the current [`LakehouseConfig`], so changing a
//! setting changes exactly the values that depend on it.
//!
//! ## Invariants
//! - `table_location(t) == warehouse_path() + "/" + t + "/"` for every `t`,
//!   including the empty string.
//! - Table names are not validated here; any string is echoed into the path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::LakehouseConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// URI scheme of the warehouse object store.
pub const WAREHOUSE_SCHEME: &str = "s3://";
/// Environment variable read by AWS clients for the active profile.
pub const AWS_PROFILE_ENV: &str = "AWS_PROFILE";
/// Environment variable read by AWS clients for the default region.
pub const AWS_DEFAULT_REGION_ENV: &str = "AWS_DEFAULT_REGION";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while deriving values that touch the host environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeriveError {
    /// A `~` path was configured but no home directory is known.
    #[error("cannot resolve home directory for {path}")]
    HomeUnavailable {
        /// Configured path that needed expansion.
        path: String,
    },
}

// ============================================================================
// SECTION: Credential Environment
// ============================================================================

/// Credential settings a caller may export for external AWS clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialEnvironment {
    /// Named credential profile.
    pub profile: String,
    /// Default region.
    pub region: String,
}

impl CredentialEnvironment {
    /// Returns the environment variable pairs in export order.
    #[must_use]
    pub fn pairs(&self) -> [(&'static str, &str); 2] {
        [(AWS_PROFILE_ENV, self.profile.as_str()), (AWS_DEFAULT_REGION_ENV, self.region.as_str())]
    }

    /// Renders POSIX shell `export` lines.
    #[must_use]
    pub fn shell_exports(&self) -> Vec<String> {
        self.pairs()
            .iter()
            .map(|(key, value)| format!("export {key}={}", shell_quote(value)))
            .collect()
    }

    /// Returns the pairs whose current process value differs from the
    /// configured one, given a lookup for the current environment.
    pub fn drift<F>(&self, lookup: F) -> Vec<&'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.pairs()
            .iter()
            .filter(|(key, value)| lookup(key).as_deref() != Some(*value))
            .map(|(key, _)| *key)
            .collect()
    }
}

/// Quotes a value for POSIX shells when it carries special characters.
pub(crate) fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value.chars().all(|ch| ch.is_ascii_alphanumeric() || "-_./:@=,".contains(ch));
    if plain { value.to_string() } else { format!("'{}'", value.replace('\'', r"'\''")) }
}

// ============================================================================
// SECTION: Derivations
// ============================================================================

impl LakehouseConfig {
    /// Returns the warehouse root, `s3://<bucket>/<prefix>`.
    #[must_use]
    pub fn warehouse_path(&self) -> String {
        let bucket = self.storage.bucket.trim();
        let prefix = self.storage.prefix.trim().trim_end_matches('/');
        if prefix.is_empty() {
            format!("{WAREHOUSE_SCHEME}{bucket}")
        } else {
            format!("{WAREHOUSE_SCHEME}{bucket}/{prefix}")
        }
    }

    /// Returns `<catalog>.<database>`.
    #[must_use]
    pub fn database_identifier(&self) -> String {
        format!("{}.{}", self.catalog.name.trim(), self.catalog.database.trim())
    }

    /// Returns `<catalog>.<database>.<table>` for the default table.
    #[must_use]
    pub fn full_table_name(&self) -> String {
        self.qualified_table_name(self.catalog.table.trim())
    }

    /// Returns `<catalog>.<database>.<table_name>`.
    #[must_use]
    pub fn qualified_table_name(&self, table_name: &str) -> String {
        format!("{}.{table_name}", self.database_identifier())
    }

    /// Returns the storage location of `table_name` under the warehouse.
    #[must_use]
    pub fn table_location(&self, table_name: &str) -> String {
        format!("{}/{table_name}/", self.warehouse_path())
    }

    /// Returns the storage location of the default table.
    #[must_use]
    pub fn default_table_location(&self) -> String {
        self.table_location(self.catalog.table.trim())
    }

    /// Resolves the jar directory against the current user's home.
    ///
    /// # Errors
    ///
    /// Returns [`DeriveError::HomeUnavailable`] when `~` cannot be resolved.
    pub fn resolved_jars_dir(&self) -> Result<PathBuf, DeriveError> {
        self.resolved_jars_dir_with_home(dirs::home_dir().as_deref())
    }

    /// Resolves the jar directory against an explicit home directory.
    ///
    /// # Errors
    ///
    /// Returns [`DeriveError::HomeUnavailable`] when `~` is used and `home`
    /// is `None`.
    pub fn resolved_jars_dir_with_home(&self, home: Option<&Path>) -> Result<PathBuf, DeriveError> {
        expand_home(self.engine.jars_dir.trim(), home)
    }

    /// Joins every configured jar onto `jars_dir`, preserving order.
    #[must_use]
    pub fn jar_paths_in(&self, jars_dir: &Path) -> Vec<PathBuf> {
        self.engine.jars.iter().map(|jar| jars_dir.join(jar)).collect()
    }

    /// Returns the credential environment the caller may export.
    #[must_use]
    pub fn credential_environment(&self) -> CredentialEnvironment {
        CredentialEnvironment {
            profile: self.aws.profile.trim().to_string(),
            region: self.aws.region.trim().to_string(),
        }
    }
}

/// Expands a leading `~` (alone or followed by `/`) to `home`.
///
/// Paths without a leading `~` are returned unchanged.
///
/// # Errors
///
/// Returns [`DeriveError::HomeUnavailable`] when expansion is needed and
/// `home` is `None`.
pub fn expand_home(path: &str, home: Option<&Path>) -> Result<PathBuf, DeriveError> {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\"))
    };
    let Some(rest) = rest else {
        return Ok(PathBuf::from(path));
    };
    let home = home.ok_or_else(|| DeriveError::HomeUnavailable {
        path: path.to_string(),
    })?;
    if rest.is_empty() { Ok(home.to_path_buf()) } else { Ok(home.join(rest)) }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, reason = "Test-only assertions.")]

    use super::*;

    #[test]
    fn expand_home_handles_bare_and_nested_tilde() {
        let home = Path::new("/home/tarun");
        assert_eq!(expand_home("~", Some(home)).unwrap(), PathBuf::from("/home/tarun"));
        assert_eq!(
            expand_home("~/iceberg/jars", Some(home)).unwrap(),
            PathBuf::from("/home/tarun/iceberg/jars")
        );
        assert_eq!(expand_home("/opt/jars", None).unwrap(), PathBuf::from("/opt/jars"));
        assert_eq!(expand_home("~other/jars", None).unwrap(), PathBuf::from("~other/jars"));
    }

    #[test]
    fn expand_home_without_home_fails() {
        let err = expand_home("~/iceberg/jars", None).unwrap_err();
        assert_eq!(
            err,
            DeriveError::HomeUnavailable {
                path: "~/iceberg/jars".to_string()
            }
        );
    }

    #[test]
    fn shell_quote_wraps_special_values() {
        assert_eq!(shell_quote("tarun_student"), "tarun_student");
        assert_eq!(shell_quote("two words"), "'two words'");
        assert_eq!(shell_quote("spark.a=x,y"), "spark.a=x,y");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn drift_reports_only_mismatched_variables() {
        let env = CredentialEnvironment {
            profile: "dev".to_string(),
            region: "us-east-1".to_string(),
        };
        let lookup = |key: &str| match key {
            AWS_PROFILE_ENV => Some("dev".to_string()),
            _ => Some("eu-west-1".to_string()),
        };
        assert_eq!(env.drift(lookup), vec![AWS_DEFAULT_REGION_ENV]);
        assert_eq!(env.drift(|_| None), vec![AWS_PROFILE_ENV, AWS_DEFAULT_REGION_ENV]);
    }
}

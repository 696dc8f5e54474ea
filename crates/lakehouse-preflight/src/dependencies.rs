// crates/lakehouse-preflight/src/dependencies.rs
// ============================================================================
// Module: Dependency Checks
// Description: Existence checks for the jars a Spark session needs.
// Purpose: Report exactly which dependency artifacts are absent.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Read-only existence checks for the dependency jars a Spark session needs.

use std::path::Path;

/// Returns the jars from `jars` that do not exist under `jars_dir`, in order.
///
/// Read-only: nothing is created or modified.
#[must_use]
pub fn missing_dependencies<S: AsRef<str>>(jars_dir: &Path, jars: &[S]) -> Vec<String> {
    jars.iter()
        .map(AsRef::as_ref)
        .filter(|jar| !jars_dir.join(jar).exists())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "Test-only assertions.")]

    use std::fs;

    use super::*;

    #[test]
    fn reports_only_absent_jars() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("a.jar"), b"").expect("write");
        fs::write(dir.path().join("c.jar"), b"").expect("write");
        let missing = missing_dependencies(dir.path(), &["a.jar", "b.jar", "c.jar", "d.jar"]);
        assert_eq!(missing, vec!["b.jar".to_string(), "d.jar".to_string()]);
    }

    #[test]
    fn missing_directory_reports_everything() {
        let dir = tempfile::tempdir().expect("tempdir");
        let absent = dir.path().join("nope");
        assert_eq!(missing_dependencies(&absent, &["a.jar"]), vec!["a.jar".to_string()]);
    }
}

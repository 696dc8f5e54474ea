// crates/lakehouse-config/src/summary.rs
// ============================================================================
// Module: Configuration Summary
// Description: Fixed-width banner listing settings and derived values.
// Purpose: Give operators a one-glance view before a session starts.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The summary is pure formatting over a validated config and cannot fail.
//! Callers decide where the text goes.

use std::fmt::Write as _;

use crate::config::LakehouseConfig;

/// Width of the banner rule.
pub const BANNER_WIDTH: usize = 70;
/// Banner title.
pub const SUMMARY_TITLE: &str = "ICEBERG + GLUE CONFIGURATION";
/// Column width for labels.
const LABEL_WIDTH: usize = 20;

/// Returns the `=` rule used above and below banners.
#[must_use]
pub fn banner_rule() -> String {
    "=".repeat(BANNER_WIDTH)
}

/// Renders the configuration summary, one setting per line.
#[must_use]
pub fn render_summary(config: &LakehouseConfig) -> String {
    let rows = [
        ("AWS Profile:", config.aws.profile.clone()),
        ("AWS Region:", config.aws.region.clone()),
        ("S3 Bucket:", config.storage.bucket.clone()),
        ("S3 Prefix:", config.storage.prefix.clone()),
        ("Warehouse Path:", config.warehouse_path()),
        ("Catalog:", config.catalog.name.clone()),
        ("Database:", config.catalog.database.clone()),
        ("Table:", config.catalog.table.clone()),
        ("Full Table Name:", config.full_table_name()),
        ("Table Location:", config.default_table_location()),
        ("JARs Directory:", config.engine.jars_dir.clone()),
    ];
    let rule = banner_rule();
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{SUMMARY_TITLE}");
    let _ = writeln!(out, "{rule}");
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<LABEL_WIDTH$}{value}");
    }
    let _ = writeln!(out, "{rule}");
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "Test-only assertions.")]

    use super::*;

    #[test]
    fn summary_aligns_values_at_label_width() {
        let config = LakehouseConfig::parse(
            "[aws]\nprofile = \"dev\"\n[storage]\nbucket = \"tarun-lakehouse-bucket\"\n",
        )
        .expect("config");
        let summary = render_summary(&config);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "=".repeat(BANNER_WIDTH));
        assert_eq!(lines[1], SUMMARY_TITLE);
        assert_eq!(lines[3], "AWS Profile:        dev");
        assert!(lines.contains(&"Warehouse Path:     s3://tarun-lakehouse-bucket/catalogs/glue"));
        assert!(lines.contains(&"Full Table Name:    glue.prod.customer"));
        assert_eq!(lines.last().copied(), Some("=".repeat(BANNER_WIDTH).as_str()));
        assert_eq!(lines.len(), 15);
    }
}

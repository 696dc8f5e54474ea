// crates/lakehouse-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical lakehouse.toml example.
// Purpose: Give operators a starting point that always passes validation.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The example mirrors the built-in defaults and only fills the two settings
//! that have none (profile and bucket) with placeholders.

/// Returns a commented example `lakehouse.toml`.
#[must_use]
pub fn config_toml_example() -> String {
    r#"# lakehouse.toml
# Settings for a Spark session backed by an AWS Glue catalog and Iceberg on S3.
# Keep real profiles and bucket names out of version control.

[aws]
# Named credential profile (required).
profile = "default"
region = "us-east-1"

[storage]
# Bucket holding the warehouse (required).
bucket = "my-lakehouse-bucket"
# Key prefix inside the bucket; warehouse = s3://<bucket>/<prefix>.
prefix = "catalogs/glue"

[catalog]
name = "glue"
database = "prod"
table = "customer"
columns = [
    { name = "id", type = "string" },
    { name = "name", type = "string" },
    { name = "price", type = "decimal(10,2)" },
]

[table_format]
format_version = "2"
table_type = "ICEBERG"
vectorization = false

[engine]
app_name = "Iceberg-Glue-Demo"
# A leading ~ resolves to the current user's home directory.
jars_dir = "~/iceberg/jars"
jars = [
    "bundle-2.31.63.jar",
    "url-connection-client-2.31.63.jar",
    "glue-2.31.63.jar",
    "iceberg-aws-1.10.0.jar",
    "iceberg-spark-runtime-4.0_2.13-1.10.0.jar",
]

[probes]
timeout_ms = 10000

[audit]
enabled = false
# path = "lakehouse-audit.jsonl"
"#
    .to_string()
}

// crates/lakehouse-config/src/lib.rs
// ============================================================================
// Module: Lakehouse Config Library
// Description: Canonical settings model, validation, and derived values.
// Purpose: Single source of truth for lakehouse.toml semantics.
// Dependencies: dirs, serde, serde_json, toml
// ============================================================================

//! ## Overview
//! `lakehouse-config` defines the settings that wire a Spark session to an
//! AWS Glue catalog and Iceberg tables stored on S3. Settings are loaded once
//! into an immutable [`LakehouseConfig`] and every dependent value (warehouse
//! path, table locations, engine options, SQL text) is derived on read so it
//! can never drift from its inputs.
//!
//! Config inputs are untrusted; loading is strict and fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod engine;
pub mod examples;
pub mod paths;
pub mod sql;
pub mod summary;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use engine::EngineOptions;
pub use engine::required_engine_keys;
pub use examples::config_toml_example;
pub use paths::CredentialEnvironment;
pub use paths::DeriveError;
pub use paths::expand_home;
pub use sql::SqlStatements;
pub use summary::render_summary;

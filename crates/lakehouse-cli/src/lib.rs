// crates/lakehouse-cli/src/lib.rs
// ============================================================================
// Module: Lakehouse CLI Library
// Description: Shared helpers for the lakehouse binary.
// Purpose: Expose i18n and report rendering for the binary and its tests.
// Dependencies: lakehouse-config, lakehouse-preflight
// ============================================================================

//! ## Overview
//! The `lakehouse` binary keeps command dispatch in `main.rs`; localized
//! strings and report rendering live here so integration tests can reach
//! them.

pub mod i18n;
pub mod render;

// crates/lakehouse-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings so every locale stays in step.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The lakehouse CLI stores user-facing strings in a small translation
//! catalog. All runtime output should be routed through the
//! [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - Variants are stable for CLI parsing and catalog lookup.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_', '.']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
/// - `value` is preformatted and should be safe for display.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "lakehouse {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load configuration: {error}"),
    ("config.validate.ok", "Config valid: {path}"),
    ("config.source.inline", "(inline)"),
    ("audit.init_failed", "Failed to open audit log: {error}"),
    ("engine.derive_failed", "Failed to build Spark config: {error}"),
    ("engine.render_failed", "Failed to render Spark config: {error}"),
    ("check.marker.pass", "✅"),
    ("check.marker.fail", "❌"),
    ("check.marker.skipped", "⏭️"),
    ("check.config_load.pass", "Configuration loaded from {path}"),
    ("check.config_load.fail", "Failed to load configuration: {error}"),
    ("check.fact.aws_profile", "AWS Profile: {value}"),
    ("check.fact.aws_region", "AWS Region: {value}"),
    ("check.fact.s3_bucket", "S3 Bucket: {value}"),
    ("check.fact.warehouse", "Warehouse: {value}"),
    ("check.fact.env_drift", "{value} is not exported in this shell; run `lakehouse env`"),
    ("check.fact.arn", "ARN: {value}"),
    ("check.fact.create_database", "Create DB SQL: {value}"),
    ("check.fact.drop_table", "Drop Table SQL: {value}"),
    ("check.fact.create_table", "Create Table SQL:\n{value}"),
    ("check.dependencies.pass", "All dependency jars present in {dir}"),
    ("check.dependencies.fail", "Missing dependency jars in {dir}: {jars}"),
    ("check.dependencies.error", "Could not resolve the jar directory: {error}"),
    ("check.identity.pass", "AWS identity resolved for account {account}"),
    ("check.identity.fail", "AWS identity check failed: {error}"),
    ("check.identity.skipped", "AWS identity check skipped: {reason}"),
    ("check.storage.pass", "S3 bucket accessible: {bucket}"),
    ("check.storage.fail", "S3 bucket check failed for {bucket}: {error}"),
    ("check.storage.skipped", "S3 bucket check skipped: {reason}"),
    ("check.engine_config.pass", "All required Spark config keys present ({count} entries)"),
    ("check.engine_config.fail", "Missing Spark config keys: {keys}"),
    ("check.engine_config.error", "Failed to generate Spark config: {error}"),
    ("check.sql_generation.pass", "SQL statements generated for {table}"),
    ("check.table_location.pass", "{table}: {location}"),
    ("check.table_location.fail", "{table}: expected {expected}, got {actual}"),
    ("validate.ok", "Environment validation passed."),
    ("validate.failed", "Environment validation found {count} failing check(s)."),
    ("selftest.title", "TESTING LAKEHOUSE CONFIGURATION"),
    ("selftest.step", "[Test {number}] {title}"),
    ("selftest.step.load_config", "Loading configuration..."),
    ("selftest.step.validate_environment", "Validating setup..."),
    ("selftest.step.engine_config", "Generating Spark configuration..."),
    ("selftest.step.sql_generation", "Testing SQL statement generation..."),
    ("selftest.step.table_locations", "Testing table location derivation..."),
    ("selftest.summary.title", "CONFIGURATION TEST SUMMARY"),
    ("selftest.summary.loads", "Configuration file loads correctly"),
    ("selftest.summary.settings", "All settings are set properly"),
    ("selftest.summary.engine", "Spark config generation works"),
    ("selftest.summary.sql", "SQL statements use configured names"),
    ("selftest.summary.locations", "Table locations derive from the warehouse path"),
    ("selftest.summary.ready", "Your session is ready to start."),
    ("selftest.summary.failed", "{count} check(s) failed; review the output above."),
    ("selftest.next.header", "Next steps:"),
    ("selftest.next.env", "1. Export the credential environment: eval \"$(lakehouse env)\""),
    ("selftest.next.engine", "2. Start Spark with: lakehouse engine-config --format args"),
    ("selftest.next.sql", "3. Bootstrap the catalog with: lakehouse sql"),
    ("selftest.next.edit", "To change bucket, profile or region, edit {path} only."),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Static Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "lakehouse {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("config.load_failed", "No s'ha pogut carregar la configuració: {error}"),
    ("config.validate.ok", "Configuració vàlida: {path}"),
    ("config.source.inline", "(en línia)"),
    ("audit.init_failed", "No s'ha pogut obrir el registre d'auditoria: {error}"),
    ("engine.derive_failed", "No s'ha pogut construir la configuració de Spark: {error}"),
    ("engine.render_failed", "No s'ha pogut mostrar la configuració de Spark: {error}"),
    ("check.marker.pass", "✅"),
    ("check.marker.fail", "❌"),
    ("check.marker.skipped", "⏭️"),
    ("check.config_load.pass", "Configuració carregada des de {path}"),
    ("check.config_load.fail", "No s'ha pogut carregar la configuració: {error}"),
    ("check.fact.aws_profile", "Perfil d'AWS: {value}"),
    ("check.fact.aws_region", "Regió d'AWS: {value}"),
    ("check.fact.s3_bucket", "Bucket d'S3: {value}"),
    ("check.fact.warehouse", "Magatzem: {value}"),
    (
        "check.fact.env_drift",
        "{value} no està exportada en aquest shell; executeu `lakehouse env`",
    ),
    ("check.fact.arn", "ARN: {value}"),
    ("check.fact.create_database", "SQL de creació de base de dades: {value}"),
    ("check.fact.drop_table", "SQL d'eliminació de taula: {value}"),
    ("check.fact.create_table", "SQL de creació de taula:\n{value}"),
    ("check.dependencies.pass", "Tots els jars de dependència són a {dir}"),
    ("check.dependencies.fail", "Falten jars de dependència a {dir}: {jars}"),
    ("check.dependencies.error", "No s'ha pogut resoldre el directori de jars: {error}"),
    ("check.identity.pass", "Identitat d'AWS resolta per al compte {account}"),
    ("check.identity.fail", "Ha fallat la comprovació d'identitat d'AWS: {error}"),
    ("check.identity.skipped", "Comprovació d'identitat d'AWS omesa: {reason}"),
    ("check.storage.pass", "Bucket d'S3 accessible: {bucket}"),
    ("check.storage.fail", "Ha fallat la comprovació del bucket d'S3 {bucket}: {error}"),
    ("check.storage.skipped", "Comprovació del bucket d'S3 omesa: {reason}"),
    (
        "check.engine_config.pass",
        "Hi ha totes les claus de configuració de Spark requerides ({count} entrades)",
    ),
    ("check.engine_config.fail", "Falten claus de configuració de Spark: {keys}"),
    ("check.engine_config.error", "No s'ha pogut generar la configuració de Spark: {error}"),
    ("check.sql_generation.pass", "Sentències SQL generades per a {table}"),
    ("check.table_location.pass", "{table}: {location}"),
    ("check.table_location.fail", "{table}: s'esperava {expected}, s'ha obtingut {actual}"),
    ("validate.ok", "La validació de l'entorn ha passat."),
    ("validate.failed", "La validació de l'entorn ha trobat {count} comprovació(ns) fallida(es)."),
    ("selftest.title", "PROVA DE LA CONFIGURACIÓ DEL LAKEHOUSE"),
    ("selftest.step", "[Prova {number}] {title}"),
    ("selftest.step.load_config", "Carregant la configuració..."),
    ("selftest.step.validate_environment", "Validant l'entorn..."),
    ("selftest.step.engine_config", "Generant la configuració de Spark..."),
    ("selftest.step.sql_generation", "Provant la generació de sentències SQL..."),
    ("selftest.step.table_locations", "Provant la derivació d'ubicacions de taules..."),
    ("selftest.summary.title", "RESUM DE LA PROVA DE CONFIGURACIÓ"),
    ("selftest.summary.loads", "El fitxer de configuració es carrega correctament"),
    ("selftest.summary.settings", "Tots els paràmetres estan ben definits"),
    ("selftest.summary.engine", "La generació de la configuració de Spark funciona"),
    ("selftest.summary.sql", "Les sentències SQL usen els noms configurats"),
    ("selftest.summary.locations", "Les ubicacions de taules deriven del camí del magatzem"),
    ("selftest.summary.ready", "La sessió està a punt per començar."),
    ("selftest.summary.failed", "{count} comprovació(ns) han fallat; reviseu la sortida anterior."),
    ("selftest.next.header", "Passos següents:"),
    ("selftest.next.env", "1. Exporteu l'entorn de credencials: eval \"$(lakehouse env)\""),
    ("selftest.next.engine", "2. Inicieu Spark amb: lakehouse engine-config --format args"),
    ("selftest.next.sql", "3. Prepareu el catàleg amb: lakehouse sql"),
    ("selftest.next.edit", "Per canviar el bucket, el perfil o la regió, editeu només {path}."),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

/// Returns the raw catalog entries for the requested locale.
#[cfg(test)]
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ca => CATALOG_CA,
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}

#[cfg(test)]
#[path = "tests/i18n.rs"]
mod tests;

// crates/lakehouse-cli/src/main.rs
// ============================================================================
// Module: Lakehouse CLI Entry Point
// Description: Command dispatcher for lakehouse configuration workflows.
// Purpose: Print derived settings, validate the environment, run the self-test.
// Dependencies: clap, lakehouse-config, lakehouse-preflight, thiserror, tokio.
// ============================================================================

//! ## Overview
//! The `lakehouse` CLI loads one `lakehouse.toml`, prints the values derived
//! from it, and checks the machine and AWS account are ready for a Spark
//! session against the Glue catalog. All user-facing strings are routed
//! through the i18n catalog. A settings-load failure is the only error that
//! ends a run early; check failures are reported and, with
//! `--fail-on-error`, turned into a failing exit code.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use lakehouse_cli::i18n::Locale;
use lakehouse_cli::i18n::set_locale;
use lakehouse_cli::render::self_test_lines;
use lakehouse_cli::render::self_test_load_failure_lines;
use lakehouse_cli::render::validation_lines;
use lakehouse_cli::t;
use lakehouse_config::DEFAULT_CONFIG_NAME;
use lakehouse_config::EngineOptions;
use lakehouse_config::LakehouseConfig;
use lakehouse_config::config_toml_example;
use lakehouse_config::render_summary;
use lakehouse_preflight::AwsCloudProbe;
use lakehouse_preflight::CloudProbe;
use lakehouse_preflight::Preflight;
use lakehouse_preflight::PreflightAuditSink;
use lakehouse_preflight::ProbeSource;
use lakehouse_preflight::SelfTest;
use lakehouse_preflight::audit_sink_from_config;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Environment variable selecting the output language.
const LANG_ENV: &str = "LAKEHOUSE_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "lakehouse", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `LAKEHOUSE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Config file path (defaults to `LAKEHOUSE_CONFIG`, then lakehouse.toml).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the configuration summary banner.
    Summary,
    /// Print the Spark session options.
    EngineConfig(EngineConfigCommand),
    /// Print the catalog bootstrap SQL statements.
    Sql,
    /// Print the storage location of one or more tables.
    TableLocation(TableLocationCommand),
    /// Print shell exports for the credential environment.
    Env,
    /// Print the summary and validate dependencies, identity, and storage.
    Validate(CheckArgs),
    /// Run the five-step configuration self-test.
    Selftest(CheckArgs),
    /// Config file utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate the configuration file.
    Validate,
    /// Print an example configuration file.
    Example,
}

/// Arguments for the engine-config command.
#[derive(Args, Debug)]
struct EngineConfigCommand {
    /// Output format.
    #[arg(long, value_enum, default_value_t = EngineFormat::Json)]
    format: EngineFormat,
}

/// Engine option output formats.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum EngineFormat {
    /// Pretty JSON object.
    Json,
    /// `spark-defaults.conf` lines.
    Properties,
    /// `--conf key=value` pairs, one per line.
    Args,
}

/// Arguments for the table-location command.
#[derive(Args, Debug)]
struct TableLocationCommand {
    /// Table names; each is echoed into its location without validation.
    #[arg(required = true, value_name = "NAME")]
    names: Vec<String>,
}

/// Arguments shared by validate and selftest.
#[derive(Args, Debug, Clone, Copy)]
struct CheckArgs {
    /// Skip the AWS identity and bucket probes.
    #[arg(long)]
    skip_cloud: bool,
    /// Exit with a failure code when any check fails.
    #[arg(long)]
    fail_on_error: bool,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let config_path = cli.config.as_deref();
    match command {
        Commands::Summary => command_summary(config_path),
        Commands::EngineConfig(command) => command_engine_config(config_path, &command),
        Commands::Sql => command_sql(config_path),
        Commands::TableLocation(command) => command_table_location(config_path, &command),
        Commands::Env => command_env(config_path),
        Commands::Validate(args) => command_validate(config_path, args).await,
        Commands::Selftest(args) => command_selftest(config_path, args).await,
        Commands::Config {
            command,
        } => command_config(config_path, &command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Derivation Commands
// ============================================================================

/// Loads settings, mapping failures to a localized error.
fn load_config(path: Option<&Path>) -> CliResult<LakehouseConfig> {
    LakehouseConfig::load(path).map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Executes the `summary` command.
fn command_summary(path: Option<&Path>) -> CliResult<ExitCode> {
    let config = load_config(path)?;
    write_stdout_text(&render_summary(&config))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `engine-config` command.
fn command_engine_config(
    path: Option<&Path>,
    command: &EngineConfigCommand,
) -> CliResult<ExitCode> {
    let config = load_config(path)?;
    let options = config
        .engine_config()
        .map_err(|err| CliError::new(t!("engine.derive_failed", error = err)))?;
    write_stdout_text(&render_engine_options(&options, command.format)?)?;
    Ok(ExitCode::SUCCESS)
}

/// Renders engine options in the requested format.
fn render_engine_options(options: &EngineOptions, format: EngineFormat) -> CliResult<String> {
    match format {
        EngineFormat::Json => options
            .to_json_pretty()
            .map_err(|err| CliError::new(t!("engine.render_failed", error = err))),
        EngineFormat::Properties => Ok(options.to_properties()),
        EngineFormat::Args => Ok(options.to_shell_args().join("\n")),
    }
}

/// Executes the `sql` command.
fn command_sql(path: Option<&Path>) -> CliResult<ExitCode> {
    let config = load_config(path)?;
    let statements = config.sql_statements();
    let rendered: Vec<String> =
        statements.labeled().iter().map(|(_, statement)| format!("{statement};")).collect();
    write_stdout_text(&rendered.join("\n\n"))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `table-location` command.
fn command_table_location(
    path: Option<&Path>,
    command: &TableLocationCommand,
) -> CliResult<ExitCode> {
    let config = load_config(path)?;
    for name in &command.names {
        write_stdout_line(&config.table_location(name))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `env` command.
fn command_env(path: Option<&Path>) -> CliResult<ExitCode> {
    let config = load_config(path)?;
    for line in config.credential_environment().shell_exports() {
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Check Commands
// ============================================================================

/// Builds the audit sink configured by `[audit]`.
fn audit_sink(config: &LakehouseConfig) -> CliResult<Box<dyn PreflightAuditSink>> {
    audit_sink_from_config(&config.audit)
        .map_err(|err| CliError::new(t!("audit.init_failed", error = err)))
}

/// Maps a failure count to the exit code selected by `--fail-on-error`.
fn check_exit_code(args: CheckArgs, failures: usize) -> ExitCode {
    if args.fail_on_error && failures > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

/// Returns the config file operators should edit.
fn config_display_path(config: &LakehouseConfig) -> String {
    config
        .source_path
        .as_ref()
        .map_or_else(|| DEFAULT_CONFIG_NAME.to_string(), |path| path.display().to_string())
}

/// Executes the `validate` command.
async fn command_validate(path: Option<&Path>, args: CheckArgs) -> CliResult<ExitCode> {
    let config = load_config(path)?;
    write_stdout_text(&render_summary(&config))?;
    let audit = audit_sink(&config)?;
    let aws_probe = if args.skip_cloud {
        None
    } else {
        Some(AwsCloudProbe::connect(&config.credential_environment()).await)
    };
    let report = Preflight::new(&config, audit.as_ref())
        .with_probe(aws_probe.as_ref().map(|probe| probe as &dyn CloudProbe))
        .validate_environment()
        .await;
    write_stdout_lines(&validation_lines(&report))?;
    Ok(check_exit_code(args, report.failures().count()))
}

/// Executes the `selftest` command.
///
/// The audit sink depends on the loaded `[audit]` section, so settings are
/// loaded here. A load failure is printed as a failed step 1 and exits 1;
/// otherwise [`SelfTest::run_loaded`] runs every step.
async fn command_selftest(path: Option<&Path>, args: CheckArgs) -> CliResult<ExitCode> {
    let config = match LakehouseConfig::load(path) {
        Ok(config) => config,
        Err(err) => {
            write_stdout_lines(&self_test_load_failure_lines(&err.to_string()))?;
            return Ok(ExitCode::FAILURE);
        }
    };
    let audit = audit_sink(&config)?;
    let probes = if args.skip_cloud { ProbeSource::Disabled } else { ProbeSource::Aws };
    let report = SelfTest::new(audit.as_ref()).with_probes(probes).run_loaded(&config).await;
    write_stdout_lines(&self_test_lines(&report, &config_display_path(&config)))?;
    Ok(check_exit_code(args, report.failures().count()))
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(path: Option<&Path>, command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate => command_config_validate(path),
        ConfigCommand::Example => {
            write_stdout_text(&config_toml_example())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the config validation command.
fn command_config_validate(path: Option<&Path>) -> CliResult<ExitCode> {
    let config = load_config(path)?;
    write_stdout_line(&t!("config.validate.ok", path = config_display_path(&config)))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes multi-line text to stdout with exactly one trailing newline.
fn write_stdout_text(text: &str) -> CliResult<()> {
    write_stdout_line(text.trim_end_matches('\n'))
        .map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes each line to stdout through one locked handle.
fn write_stdout_lines(lines: &[String]) -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    for line in lines {
        writeln!(&mut stdout, "{line}")
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(())
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

// crates/content-gate-cli/src/main.rs
// ============================================================================
// Module: Content Gate CLI Entry Point
// Description: Command dispatcher for site content audits.
// Purpose: Run manifest-driven page checks and report pass/fail results.
// Dependencies: clap, content-gate-core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The Content Gate CLI loads an audit manifest, checks every listed page for
//! existence and required markers, and prints a text or JSON report. The exit
//! code is zero only when every page passes. Manifest inputs are untrusted
//! and validated fail-closed before any page is read.

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
use content_gate_core::AuditManifest;
use content_gate_core::AuditReport;
use content_gate_core::CheckerConfig;
use content_gate_core::ContentChecker;
use content_gate_core::PageReport;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "content-gate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs every page check in an audit manifest.
    Check(CheckCommand),
    /// Validates an audit manifest without reading pages.
    Validate(ValidateCommand),
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Path to the audit manifest.
    #[arg(long)]
    manifest: PathBuf,

    /// Site root override; defaults to the manifest's root setting.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Report output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Page size limit override in bytes.
    #[arg(long)]
    max_page_bytes: Option<u64>,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Path to the audit manifest.
    #[arg(long)]
    manifest: PathBuf,
}

/// Report output formats.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable line-per-page output.
    Text,
    /// Pretty-printed JSON report.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
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
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("content-gate {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Check(command) => command_check(&command),
        Commands::Validate(command) => command_validate(&command),
    }
}

// ============================================================================
// SECTION: Check Command
// ============================================================================

/// Executes the `check` command.
fn command_check(command: &CheckCommand) -> CliResult<ExitCode> {
    let report = execute_check(
        &command.manifest,
        command.root.as_deref(),
        command.max_page_bytes,
    )?;
    render_report(&report, command.format)?;
    Ok(audit_exit_code(&report))
}

/// Loads the manifest and runs the audit against the resolved site root.
fn execute_check(
    manifest_path: &Path,
    root_override: Option<&Path>,
    max_page_bytes: Option<u64>,
) -> CliResult<AuditReport> {
    let manifest = AuditManifest::load(manifest_path)
        .map_err(|err| CliError::new(format!("manifest load failed: {err}")))?;
    let manifest_dir = manifest_path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let root = root_override
        .map_or_else(|| manifest.site_root(&manifest_dir), Path::to_path_buf);

    let mut config = CheckerConfig::default();
    if let Some(limit) = max_page_bytes {
        config.max_page_bytes = limit;
    }
    let checker = ContentChecker::new(config);
    Ok(checker.run_audit(&root, &manifest))
}

/// Maps an audit report onto the process exit code.
fn audit_exit_code(report: &AuditReport) -> ExitCode {
    if report.passed { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Renders the audit report in the requested format.
fn render_report(report: &AuditReport, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => render_json(report),
    }
}

/// Renders a line-per-page text report plus a summary line.
fn render_text(report: &AuditReport) -> CliResult<()> {
    for page in &report.pages {
        let line = page_line(page);
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    let total = report.pages.len();
    let failed = report.pages.iter().filter(|page| !page.passed()).count();
    let summary = if report.passed {
        format!("audit passed: {total} page(s)")
    } else {
        format!("audit failed: {failed} of {total} page(s)")
    };
    write_stdout_line(&summary).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

/// Formats a single page report line.
fn page_line(page: &PageReport) -> String {
    if page.passed() {
        return format!("pass {}", page.path);
    }
    if let Some(error) = &page.error {
        return format!("fail {} (error: {error})", page.path);
    }
    format!("fail {} (missing: {})", page.path, page.missing.join(", "))
}

/// Renders the audit report as pretty-printed JSON.
fn render_json(report: &AuditReport) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(report)
        .map_err(|err| CliError::new(format!("report serialization failed: {err}")))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Validate Command
// ============================================================================

/// Executes the `validate` command.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let manifest = AuditManifest::load(&command.manifest)
        .map_err(|err| CliError::new(format!("manifest invalid: {err}")))?;
    let pages = manifest.pages.len();
    write_stdout_line(&format!("manifest ok: {pages} page(s)"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Prints top-level help when no subcommand is provided.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

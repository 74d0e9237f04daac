//! CSP Guardian CLI - command-line interface for CSP compliance scanning
//!
//! Architecture: Application Layer - the CLI translates user commands to
//! domain operations and owns external concerns: process exit codes,
//! terminal output, logging setup.

use clap::{Parser, Subcommand, ValueEnum};
use csp_guardian::{
    builtin_rules, find_project_root, project_kind, CspResult, CspValidator, OutputFormat,
    ScanOptions,
};
use std::path::PathBuf;
use std::process;

/// CSP Guardian - Content-Security-Policy compliance scanning
#[derive(Parser)]
#[command(name = "csp-guardian")]
#[command(version = "0.1.0")]
#[command(about = "Content-Security-Policy compliance scanning for packaged web apps and extensions")]
#[command(
    long_about = "CSP Guardian scans a project's JavaScript and HTML sources against a fixed catalog of Content-Security-Policy rules and reports every violation with its file and line."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a project for CSP violations
    Check {
        /// Path to start from (defaults to the current directory)
        path: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormatArg,

        /// Rule categories to disable for this scan
        #[arg(long, action = clap::ArgAction::Append)]
        disable_category: Vec<String>,

        /// Abort on the first unreadable file instead of skipping it
        #[arg(long)]
        fail_fast: bool,

        /// Treat PATH itself as the project root instead of searching
        /// parent directories for a manifest
        #[arg(long)]
        no_detect: bool,
    },

    /// List the builtin rule catalog
    Rules {
        /// Only show rules in this category
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Copy, Clone, ValueEnum, PartialEq)]
enum OutputFormatArg {
    Text,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run_command(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run_command(cli: Cli) -> CspResult<i32> {
    match cli.command {
        Commands::Check { path, format, disable_category, fail_fast, no_detect } => {
            run_check(path, format, disable_category, fail_fast, no_detect)
        }
        Commands::Rules { category } => run_list_rules(category),
    }
}

fn run_check(
    path: Option<PathBuf>,
    format: OutputFormatArg,
    disable_category: Vec<String>,
    fail_fast: bool,
    no_detect: bool,
) -> CspResult<i32> {
    let start = path.unwrap_or_else(|| PathBuf::from("."));

    let root = if no_detect {
        start
    } else {
        match find_project_root(&start) {
            Some(root) => root,
            None => {
                // Not an error: there is simply nothing to scan here.
                println!(
                    "No app or extension project found near {} (missing manifest.json)",
                    start.display()
                );
                return Ok(0);
            }
        }
    };

    if let Some(kind) = project_kind(&root) {
        tracing::debug!("Project at {} looks like: {}", root.display(), kind.as_str());
    }

    let validator = CspValidator::with_options(ScanOptions {
        disabled_categories: disable_category,
        fail_fast,
    })?;

    let report = validator.validate_project(&root)?;
    let rendered = validator.format_report(&root, &report, format.into())?;
    println!("{rendered}");

    for diagnostic in &report.diagnostics {
        eprintln!("warning: skipped {}: {}", diagnostic.file_path.display(), diagnostic.message);
    }

    if report.has_violations() {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn run_list_rules(category: Option<String>) -> CspResult<i32> {
    for rule in builtin_rules() {
        if let Some(wanted) = &category {
            if rule.category != Some(wanted.as_str()) {
                continue;
            }
        }

        let tag = rule.category.map(|c| format!(" [{c}]")).unwrap_or_default();
        println!("{}{}\n    {}\n", rule.id, tag, rule.message);
    }

    Ok(0)
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();
}

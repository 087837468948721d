//! use-literals - CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use use_literals::util::config;
use use_literals::util::diagnostic::{max_severity, EmitterConfig, JsonEmitter, RuleDescriptor, TextEmitter};
use use_literals::util::logger;
use use_literals::{check_paths, Analyzer, Diagnostic, NAME, VERSION};

/// Suggest `const` for static readonly fields initialized to compile-time constants
#[derive(Parser, Debug)]
#[command(name = "use-literals")]
#[command(author = "YaoXiang Team")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check semantic-model snapshots (JSON files or directories)
    Check {
        /// Snapshot files or directories
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Configuration file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Evaluate fields on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// List the rules and their default levels
    Rules,

    /// Print version information
    Version,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logger::init_cli(args.verbose);

    match args.command {
        Commands::Check {
            paths,
            format,
            config,
            no_color,
            sequential,
        } => check(&paths, format, config, no_color, sequential),
        Commands::Rules => {
            for rule in RuleDescriptor::all() {
                println!(
                    "{}  {:<26} {:<6} {}",
                    rule.code,
                    rule.name,
                    rule.default_level.as_str(),
                    rule.title
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check(
    paths: &[PathBuf],
    format: Format,
    config_path: Option<PathBuf>,
    no_color: bool,
    sequential: bool,
) -> Result<ExitCode> {
    let mut lint_config =
        config::discover(config_path.as_deref()).context("Failed to load configuration")?;
    if sequential {
        lint_config.analysis.parallel = false;
    }
    let analyzer = Analyzer::new(lint_config);
    let reports = check_paths(&analyzer, paths)?;

    match format {
        Format::Text => {
            let emitter = TextEmitter::with_config(EmitterConfig {
                use_colors: !no_color,
                ..Default::default()
            });
            for report in &reports {
                print!("{}", emitter.render_all(&report.diagnostics, report.source.as_ref()));
            }
        }
        Format::Json => {
            let all: Vec<Diagnostic> = reports
                .iter()
                .flat_map(|report| report.diagnostics.iter().cloned())
                .collect();
            println!("{}", JsonEmitter::render_all(&all));
        }
    }

    let diagnostics = reports.iter().flat_map(|report| &report.diagnostics);
    let worst = max_severity(diagnostics);
    debug!("Checked {} file(s), worst severity {:?}", reports.len(), worst);
    if worst.is_some_and(|severity| severity.is_error()) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

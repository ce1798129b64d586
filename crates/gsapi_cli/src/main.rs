//! Command-line interface for the Game Script API checker.
//!
//! Provides `gsapi update` to refresh the documentation cache, `gsapi check`
//! to validate `.nut` scripts against it, and `gsapi show` to list the cached
//! methods of a class.

#![warn(missing_docs)]

mod check;
mod pipeline;
mod show;
mod update;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Log filter used with `--verbose` when `RUST_LOG` is unset.
const VERBOSE_FILTER: &str =
    "warn,gsapi=debug,gsapi_cache=debug,gsapi_docs=debug,gsapi_lint=debug";

/// OpenTTD Game Script API documentation cache and call checker.
#[derive(Parser, Debug)]
#[command(name = "gsapi", version, about = "OpenTTD Game Script API checker")]
pub struct Cli {
    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `gsapi.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Documentation cache directory (overrides `GS_DOC_CACHE_DIR`).
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Refresh the API documentation cache.
    Update(UpdateArgs),
    /// Check Game Script sources against the cached documentation.
    Check(CheckArgs),
    /// List the cached methods of one API class.
    Show(ShowArgs),
}

/// Arguments for the `gsapi update` subcommand.
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Refresh every class without checking freshness first.
    #[arg(short, long)]
    pub force: bool,

    /// Continue with the remaining classes when one fails.
    #[arg(long)]
    pub keep_going: bool,
}

/// Arguments for the `gsapi check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Files or directories to check (default: the project directory).
    pub paths: Vec<PathBuf>,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Refresh the documentation cache before checking.
    #[arg(long)]
    pub update: bool,

    /// Rule names to suppress (e.g., `--allow docs-unavailable`).
    #[arg(long)]
    pub allow: Vec<String>,

    /// Rule names to promote to errors.
    #[arg(long)]
    pub deny: Vec<String>,
}

/// Arguments for the `gsapi show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// The API class to list (e.g., `GSGoal`).
    pub class: String,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Lint harness JSON, keyed by file.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
    /// Optional cache directory override.
    pub cache_dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        verbose: cli.verbose,
        color,
        config: cli.config,
        cache_dir: cli.cache_dir,
    };

    let result = match cli.command {
        Command::Update(ref args) => update::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
        Command::Show(ref args) => show::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

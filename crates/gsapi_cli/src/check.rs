//! `gsapi check`: validates Game Script sources against the documentation cache.
//!
//! The full pipeline:
//!
//! 1. Load settings and resolve the cache directory
//! 2. Optionally refresh the cache (`--update`)
//! 3. Discover `.nut` files under the given paths
//! 4. Check every file in parallel against a shared method catalog
//! 5. Render diagnostics as terminal text or lint harness JSON

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use gsapi_config::LintConfig;
use gsapi_diagnostics::{
    lint_messages, Diagnostic, DiagnosticRenderer, LintMessage, TerminalRenderer,
};
use gsapi_docs::RefreshOptions;
use gsapi_lint::{LintEngine, MethodCatalog, Readiness};
use rayon::prelude::*;

use crate::pipeline::{discover_scripts, load_session};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// The diagnostics of one checked file.
struct FileReport {
    path: PathBuf,
    diagnostics: Vec<Diagnostic>,
}

/// Runs the `gsapi check` command.
///
/// Returns exit code 0 if no errors were found, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let session = load_session(global)?;

    if args.update {
        let maintainer = session.maintainer()?;
        if let Err(e) = maintainer.update_all(RefreshOptions::default()) {
            eprintln!("warning: cache update failed: {e}");
        }
    }

    let roots = if args.paths.is_empty() {
        vec![session.project_dir.clone()]
    } else {
        args.paths.clone()
    };
    let files = discover_scripts(&roots)?;
    tracing::debug!(files = files.len(), "discovered scripts");

    let catalog = MethodCatalog::new(session.store());
    match catalog.warm() {
        Readiness::Ready => {}
        Readiness::Partial { missing } => {
            tracing::debug!(missing = ?missing, "documentation cache is incomplete");
        }
        Readiness::Empty => {
            if !files.is_empty() {
                eprintln!(
                    "warning: documentation cache at {} is empty; run `gsapi update`",
                    session.cache.path.display()
                );
            }
        }
    }

    let lint_config = merge_lint_config(&session.settings.lint, args);
    let engine = LintEngine::new(&lint_config);
    for name in unknown_rule_names(&engine, &lint_config) {
        eprintln!("warning: unknown lint rule '{name}' in allow/deny list");
    }

    let reports = files
        .par_iter()
        .map(|path| check_file(&engine, &catalog, path))
        .collect::<Result<Vec<_>, String>>()?;

    let error_count = reports
        .iter()
        .flat_map(|r| &r.diagnostics)
        .filter(|d| d.severity.is_error())
        .count();

    match args.format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for report in &reports {
                for diag in &report.diagnostics {
                    eprintln!("{}", renderer.render(diag, &report.path));
                }
            }
            if error_count > 0 {
                eprintln!("Found {error_count} API usage errors");
            } else {
                println!("GS API usage looks OK");
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json_report(&reports))?);
        }
    }

    Ok(if error_count > 0 { 1 } else { 0 })
}

fn check_file(
    engine: &LintEngine,
    catalog: &MethodCatalog,
    path: &Path,
) -> Result<FileReport, String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    tracing::debug!(file = %path.display(), "checking");
    Ok(FileReport {
        path: path.to_path_buf(),
        diagnostics: engine.check_source(&source, catalog),
    })
}

/// Groups lint harness messages by file path. Every checked file is present.
fn json_report(reports: &[FileReport]) -> BTreeMap<String, Vec<LintMessage>> {
    reports
        .iter()
        .map(|r| (r.path.display().to_string(), lint_messages(&r.diagnostics)))
        .collect()
}

/// Returns the allow/deny entries that name no registered rule.
fn unknown_rule_names<'a>(engine: &LintEngine, config: &'a LintConfig) -> Vec<&'a str> {
    let known = engine.rule_names();
    config
        .allow
        .iter()
        .chain(&config.deny)
        .map(String::as_str)
        .filter(|name| !known.contains(name))
        .collect()
}

/// Merges CLI `--allow`/`--deny` flags with the settings file's lint section.
///
/// CLI flags take precedence: a rule allowed on the command line is removed
/// from the configured deny list and vice versa.
fn merge_lint_config(config: &LintConfig, args: &CheckArgs) -> LintConfig {
    let mut merged = config.clone();
    for rule in &args.allow {
        merged.deny.retain(|r| r != rule);
        if !merged.allow.contains(rule) {
            merged.allow.push(rule.clone());
        }
    }
    for rule in &args.deny {
        merged.allow.retain(|r| r != rule);
        if !merged.deny.contains(rule) {
            merged.deny.push(rule.clone());
        }
    }
    merged
}

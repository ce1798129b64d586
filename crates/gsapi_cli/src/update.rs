//! `gsapi update`: refreshes the documentation cache.

use gsapi_docs::{ClassOutcome, RefreshOptions, RefreshOutcome};

use crate::pipeline::load_session;
use crate::{GlobalArgs, UpdateArgs};

/// Runs the `gsapi update` command.
///
/// By default the run stops at the first class that fails. With
/// `--keep-going` every class is attempted and one line per class is printed.
/// Returns exit code 0 on success, 1 if any class failed.
pub fn run(args: &UpdateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let session = load_session(global)?;
    let maintainer = session.maintainer()?;
    let options = RefreshOptions { force: args.force };

    if args.keep_going {
        let outcomes = maintainer.update_each(options);
        for line in outcomes.iter().map(describe) {
            println!("{line}");
        }
        let failed = outcomes.iter().filter(|(_, r)| r.is_err()).count();
        if failed > 0 {
            eprintln!(
                "❌ Failed to update GS API cache: {failed} of {} classes failed",
                outcomes.len()
            );
            return Ok(1);
        }
    } else if let Err(e) = maintainer.update_all(options) {
        eprintln!("❌ Failed to update GS API cache: {e}");
        return Ok(1);
    }

    println!("✅ GS API cache updated successfully");
    Ok(0)
}

/// Formats one class result of an isolated run.
fn describe((class, outcome): &ClassOutcome) -> String {
    match outcome {
        Ok(RefreshOutcome::Reused(methods)) => {
            format!("  {class}: up to date ({} methods)", methods.len())
        }
        Ok(RefreshOutcome::Fetched { methods, persisted: true }) => {
            format!("  {class}: refreshed ({} methods)", methods.len())
        }
        Ok(RefreshOutcome::Fetched { methods, persisted: false }) => {
            format!("  {class}: fetched ({} methods), not cached", methods.len())
        }
        Err(e) => format!("  {class}: failed: {e}"),
    }
}

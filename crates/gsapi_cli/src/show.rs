//! `gsapi show`: lists the cached methods of one API class.

use std::collections::BTreeSet;

use gsapi_cache::CacheEntry;
use gsapi_common::{find_class, tracked_classes};

use crate::pipeline::load_session;
use crate::{GlobalArgs, ShowArgs};

/// Runs the `gsapi show` command.
///
/// Prints one `Name(a/b)` line per documented method. Returns exit code 1
/// when the class has no usable cache entry.
pub fn run(args: &ShowArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let class = find_class(&args.class).ok_or_else(|| {
        let known: Vec<&str> = tracked_classes().iter().map(|c| c.name).collect();
        format!(
            "'{}' is not a tracked API class (known: {})",
            args.class,
            known.join(", ")
        )
    })?;

    let session = load_session(global)?;
    let store = session.store();
    let Some(entry) = store.read(class.name).filter(CacheEntry::is_usable) else {
        eprintln!(
            "API documentation not available for {} (cache may not be initialized)",
            class.name
        );
        return Ok(1);
    };

    println!("{}:", class.name);
    for (name, arities) in entry.methods.iter() {
        println!("  - {}", format_method(name, arities));
    }

    if global.verbose {
        eprintln!("   Cache file: {}", store.path_for(class.name).display());
        if let Some(cached_at) = entry.cached_at {
            eprintln!("   Cached at: {}", cached_at.to_rfc3339());
        }
        if let Some(etag) = entry.headers.as_ref().and_then(|h| h.etag.as_deref()) {
            eprintln!("   ETag: {etag}");
        }
    }
    Ok(0)
}

/// Formats a method as `Name(a/b/c)` with ascending arities.
fn format_method(name: &str, arities: &BTreeSet<usize>) -> String {
    let listing: Vec<String> = arities.iter().map(usize::to_string).collect();
    format!("{name}({})", listing.join("/"))
}

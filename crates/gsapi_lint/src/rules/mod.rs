//! Built-in call-site rules.

mod e001;
mod e002;
mod w001;

pub use e001::UnknownMethod;
pub use e002::ArityMismatch;
pub use w001::DocsUnavailable;

use gsapi_config::LintConfig;

use crate::LintEngine;

/// Registers the three built-in rules, configuring suggestions from `config`.
pub fn register_builtin_rules(engine: &mut LintEngine, config: &LintConfig) {
    engine.register(Box::new(DocsUnavailable));
    engine.register(Box::new(UnknownMethod::new(
        config.max_suggestions,
        config.similarity_threshold,
    )));
    engine.register(Box::new(ArityMismatch));
}

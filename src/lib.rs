pub mod analyzer;
pub mod conventional;
pub mod decision;
pub mod error;
pub mod filter;
pub mod input;
pub mod module_config;
pub mod rules;
pub mod settings;
pub mod ui;
pub mod warnings;

pub use decision::{aggregate, BumpDecision};
pub use error::{ConfigError, Result, RuleError, ScopeReleaseError};
pub use module_config::{resolve_module_config, ModuleConfig, ModuleConfigResolver};

/// Install the stderr `tracing` subscriber used by the binaries.
///
/// Honors `RUST_LOG`, defaulting to `warn` so stdout stays machine-readable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

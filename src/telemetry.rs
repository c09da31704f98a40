//! Tracing subscriber setup for the demo binaries.
//!
//! Events go to stderr so stdout carries only the demo output. `RUST_LOG`
//! takes precedence over the default directive.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_DIRECTIVE: &str = "llm_building_blocks=info";

/// Builds the env filter, preferring `RUST_LOG` over `default_directive`.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Installs the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init_tracing(default_directive: &str) {
    let result = tracing_subscriber::registry()
        .with(env_filter(default_directive))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::CapturedLogs;
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        init_tracing("llm_building_blocks=debug");
        init_tracing(DEFAULT_LOG_DIRECTIVE);
    }

    #[test]
    fn captured_logs_record_level_and_fields() {
        let logs = CapturedLogs::default();
        {
            let _guard = logs.install();
            tracing::warn!(field = %"age", "fallback used");
        }

        let output = logs.contents();
        assert!(output.contains("WARN"));
        assert!(output.contains("fallback used"));
        assert!(output.contains("field=age"));
    }
}

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// Log lines go to stderr; stdout is reserved for the JSON document.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(build_filter(log_level))
        .with(subscriber)
        .try_init()?;

    Ok(())
}

/// `RUST_LOG` wins when it is set and valid, then `log_level`, then `"warn"`.
fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_uses_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(build_filter("debug").to_string(), "debug");
        assert_eq!(build_filter("error").to_string(), "error");
    }
}

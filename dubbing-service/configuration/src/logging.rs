use tracing_subscriber::EnvFilter;

use crate::DubbingConfig;

/// Installs the global fmt subscriber. `RUST_LOG` wins over `logging.level`.
pub fn setup_logging(config: &DubbingConfig) {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), &config.logging.level);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // Tests and embedding binaries may already have installed a subscriber.
    let installed = if config.logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(err) = installed {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
}

fn build_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::build_filter;

    #[test]
    fn rust_log_takes_precedence() {
        assert_eq!(build_filter(Some("debug"), "warn").to_string(), "debug");
    }

    #[test]
    fn configured_level_applies_without_rust_log() {
        assert_eq!(build_filter(None, "warn").to_string(), "warn");
        assert_eq!(build_filter(Some("  "), "error").to_string(), "error");
    }
}

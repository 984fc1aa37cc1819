use tracing_subscriber::EnvFilter;

/// Logging configuration for the `generate-logs` binary.
///
/// **Fields**
/// - `default_directive`: filter used when `RUST_LOG` is unset or invalid.
/// - `with_target`: print the emitting module next to each line.
/// - `ansi`: colorize output.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub default_directive: String,
    pub with_target: bool,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_directive: "info".to_string(),
            with_target: false,
            ansi: true,
        }
    }
}

impl LoggingConfig {
    pub fn verbose() -> Self {
        Self {
            default_directive: "debug".to_string(),
            with_target: true,
            ..Self::default()
        }
    }

    /// `RUST_LOG` when it parses, `default_directive` otherwise.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_directive))
    }
}

/// Install the global `tracing` subscriber.
///
/// **Errors**
///
/// Fails if a global subscriber has already been installed.
pub fn init_tracing_with_config(
    config: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .try_init()
}

/// Initialize tracing with [`LoggingConfig::default`].
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing_with_config(&LoggingConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_error() {
        // Only one global subscriber per process; whichever call comes
        // second must surface an error rather than pass silently.
        let _first = init_tracing();
        let second = init_tracing();
        assert!(second.is_err());
        assert!(!second.unwrap_err().to_string().is_empty());
    }

    #[test]
    fn test_verbose_config() {
        let cfg = LoggingConfig::verbose();
        assert_eq!(cfg.default_directive, "debug");
        assert!(cfg.with_target);
        assert!(cfg.ansi);
    }
}

//! Diagnostic logging bootstrap
//!
//! Services and storage emit through the `log` facade; the binary installs
//! an `env_logger` backend writing to stderr so stdout stays reserved for
//! reports and exports. `RUST_LOG`, when set, takes precedence over the
//! configured level.

use log::LevelFilter;

use crate::error::{AdhesionError, AdhesionResult};

/// Parse a configured level name
pub fn parse_level(level: &str) -> AdhesionResult<LevelFilter> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        other => Err(AdhesionError::Config(format!(
            "Unsupported log level '{}'; expected off|error|warn|info|debug|trace",
            other
        ))),
    }
}

/// Install the stderr logger
///
/// Calling this more than once is harmless; later calls keep the first
/// logger.
pub fn init_logging(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .format_timestamp_millis();

    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_levels() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level(" warning ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
    }

    #[test]
    fn test_parse_rejects_unknown_level() {
        let err = parse_level("loud").unwrap_err();
        assert!(matches!(err, AdhesionError::Config(_)));
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_logging(LevelFilter::Warn);
        init_logging(LevelFilter::Debug);
    }
}

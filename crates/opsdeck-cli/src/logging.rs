// Logging and verbosity control

use tracing::Level;

/// Pick the max log level from CLI flags, falling back to the configured level
///
/// `--quiet` wins over `--verbose`. Unknown configured levels fall back to info.
pub fn resolve_level(verbose: bool, quiet: bool, configured: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }
    if verbose {
        return Level::DEBUG;
    }
    match configured.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global tracing subscriber writing to stderr
///
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(verbose: bool, quiet: bool, configured: &str) {
    use tracing_subscriber::fmt;

    let level = resolve_level(verbose, quiet, configured);
    let _ = fmt()
        .with_max_level(level)
        .with_target(verbose)
        .with_file(verbose)
        .with_line_number(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        assert_eq!(resolve_level(false, true, "trace"), Level::ERROR);
        assert_eq!(resolve_level(true, true, "info"), Level::ERROR);
        assert_eq!(resolve_level(true, false, "warn"), Level::DEBUG);
    }

    #[test]
    fn test_configured_level() {
        assert_eq!(resolve_level(false, false, "WARN"), Level::WARN);
        assert_eq!(resolve_level(false, false, "nonsense"), Level::INFO);
    }
}

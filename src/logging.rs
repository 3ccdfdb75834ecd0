use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit log filter, e.g. `ARC_LOG=arc_runner=trace`.
pub const LOG_ENV: &str = "ARC_LOG";

/// Filter used when `ARC_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "arc_runner=debug,warn"
    } else {
        "arc_runner=warn,error"
    }
}

/// Install the stderr subscriber. Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert!(default_filter(true).contains("arc_runner=debug"));
        assert!(default_filter(false).contains("arc_runner=warn"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}

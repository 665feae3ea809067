// Verbosity levels mapped onto tracing filters
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 0=quiet (warnings and errors), 1=basic, 2=full
pub fn filter_for_level(level: u8) -> &'static str {
    match level {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the verbosity level.
pub fn init_logging(level: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_for_level(level)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_filters() {
        assert_eq!(filter_for_level(0), "warn");
        assert_eq!(filter_for_level(1), "info");
        assert_eq!(filter_for_level(2), "debug");
        assert_eq!(filter_for_level(9), "debug");
    }
}

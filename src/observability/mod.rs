//! Logging setup for the binary.
//!
//! Diagnostics go to stderr so that stdout carries only the report (or the
//! JSON document). `RUST_LOG` takes precedence over the `-v` count.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a given `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "mh2graph=warn",
        1 => "mh2graph=info",
        2 => "mh2graph=debug",
        _ => "mh2graph=trace",
    }
}

/// Install the global subscriber; a second call is a no-op
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_directives() {
        assert_eq!(default_directive(0), "mh2graph=warn");
        assert_eq!(default_directive(2), "mh2graph=debug");
        assert_eq!(default_directive(9), "mh2graph=trace");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_tracing(0);
        init_tracing(3);
    }
}

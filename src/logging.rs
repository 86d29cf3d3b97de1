//! Tracing subscriber setup shared by the binaries

/// Install the global fmt subscriber.
///
/// `RUST_LOG` overrides `default_filter`. A second call is a no-op.
pub fn init(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .try_init();
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; `level` is the fallback directive.
/// Safe to call once per process; embedding callers that install their
/// own subscriber should skip this.
pub fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .init();
}

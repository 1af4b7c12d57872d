use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
///
/// The GPU stack is very chatty at `info`, so it is capped at `warn`.
pub const DEFAULT_FILTER: &str = "info,trip_atlas=debug,wgpu_core=warn,wgpu_hal=warn,naga=warn";

pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Install the fmt subscriber, preferring `RUST_LOG` over `default_directives`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_with_filter(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

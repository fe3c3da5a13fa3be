use tracing_subscriber::EnvFilter;

/// Initialise logging. Called once by the embedding application at startup;
/// the library itself only emits events. The default level is `info`; passing
/// `debug` raises it and allows the `RUST_LOG` environment variable to
/// override the filter.
pub fn init(debug: bool) {
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        // Force `info` regardless of `RUST_LOG` to prevent accidental verbose
        // output if the variable happens to be set in the host environment.
        EnvFilter::new(level)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_logging() -> Result<(), TryInitError> {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(true)
        .json();

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
}

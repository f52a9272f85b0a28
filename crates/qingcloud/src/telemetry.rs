use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the process-wide subscriber for the CLI.
///
/// `RUST_LOG` picks the level (`warn` when unset). Output goes to stderr in
/// compact form because stdout is reserved for API replies. A second call
/// leaves the first subscriber in place.
pub fn init() {
    let _ = LogTracer::init();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

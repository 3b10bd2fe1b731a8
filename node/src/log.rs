use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log filtering follows `RUST_LOG`, defaulting to `info`.
pub fn configure() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .compact()
        .with_filter(filter);
    tracing_subscriber::registry().with(fmt_layer).init();
}

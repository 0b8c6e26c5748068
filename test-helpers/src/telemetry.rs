//! Subscriber setup shared by the integration tests and the dev-server.

use tracing::Subscriber;
use tracing::subscriber::set_global_default;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Log an error using the alternate selector, which emits the error chain.
pub fn log_error(e: impl Into<anyhow::Error>) {
    let e: anyhow::Error = e.into();
    tracing::error!("{e:#}");
}

/// Build a stderr subscriber. `RUST_LOG` overrides `default_filter`.
///
/// Tests use the pretty multi-line format with span close events so that
/// each resource operation shows up with its timing; the dev-server uses the
/// compact format.
pub fn get_subscriber(
    default_filter: &str,
    pretty: bool,
) -> Box<dyn Subscriber + Sync + Send> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    if pretty {
        let stderr = fmt::Layer::new()
            .with_writer(std::io::stderr)
            .pretty()
            .with_span_events(fmt::format::FmtSpan::CLOSE);
        Box::new(Registry::default().with(env_filter).with(stderr))
    } else {
        let stderr = fmt::Layer::new()
            .with_writer(std::io::stderr)
            .compact()
            .with_target(false);
        Box::new(Registry::default().with(env_filter).with(stderr))
    }
}

/// Register a subscriber as global default to process span data.
///
/// It should only be called once!
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send + 'static) {
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}

/// Install a subscriber if none is set yet. Safe to call from every test.
pub fn try_init_subscriber(subscriber: impl Subscriber + Sync + Send + 'static) {
    let _ = LogTracer::init();
    let _ = set_global_default(subscriber);
}

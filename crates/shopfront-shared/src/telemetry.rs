//! Telemetry setup

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Logs are emitted as JSON to stdout; when `LOG_DIR` is set, a daily-rolled
/// file appender is added as well. The returned guard must be held for the
/// lifetime of the process so buffered file output is flushed on shutdown.
pub fn init_telemetry(service_name: &str) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    match std::env::var("LOG_DIR") {
        Ok(dir) => {
            let file_appender =
                tracing_appender::rolling::daily(dir, format!("{}.log", service_name));
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .with(fmt::layer().json().with_ansi(false).with_writer(file_writer))
                .init();
            Some(guard)
        }
        Err(_) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
            None
        }
    }
}

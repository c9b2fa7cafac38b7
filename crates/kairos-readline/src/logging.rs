use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use kairos_infrastructure::KairosPaths;

const DEFAULT_FILTER: &str = "warn,kairos=info";

/// Sends tracing output to a daily log file so it never interleaves with the
/// REPL. Keep the returned guard alive until exit to flush buffered lines.
pub fn init() -> Result<WorkerGuard> {
    let log_dir = KairosPaths::log_dir()?;
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::daily(&log_dir, "kairos.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    std::panic::set_hook(Box::new(|info| {
        tracing::error!("[Panic] {}", info);
    }));

    Ok(guard)
}

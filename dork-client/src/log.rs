use std::{fs::File, path::Path, sync::OnceLock};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Level used when `DORKGENIUS_LOG` is unset or unparsable.
const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

pub fn setup_logger(log_dir: &str, _ep: &str) -> Result<(), Box<dyn std::error::Error>> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    let file = File::create(Path::new(log_dir).join("dorkgenius.log"))?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file);

    let level = std::env::var("DORKGENIUS_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(DEFAULT_LEVEL);

    let file_layer = fmt::layer()
        .with_line_number(true)
        .with_writer(non_blocking_writer)
        .with_filter(level);

    LOG_GUARD.set(guard).ok();

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .ok();

    Ok(())
}

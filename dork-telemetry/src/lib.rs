use opentelemetry_semantic_conventions::{
    resource::{SERVICE_NAME, SERVICE_VERSION},
    SCHEMA_URL,
};
use std::{
    fs::File,
    path::Path,
    sync::{mpsc, OnceLock},
};
use tracing::level_filters::LevelFilter;

use opentelemetry::{trace::TracerProvider, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    trace::{Sampler, SdkTracerProvider},
    Resource,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

const SERVICE: &str = "dorkgenius.nvim";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();
static WORKER_HANDLE: OnceLock<std::thread::JoinHandle<()>> = OnceLock::new();

fn resource() -> Resource {
    Resource::builder()
        .with_schema_url(
            [
                KeyValue::new(SERVICE_NAME, SERVICE),
                KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
            ],
            SCHEMA_URL,
        )
        .with_service_name(SERVICE)
        .build()
}

fn init_tracer_provider(ep: &str) -> Result<SdkTracerProvider, String> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(ep)
        .build()
        .map_err(|e| format!("otlp exporter: {e}"))?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
            1.0,
        ))))
        .with_resource(resource())
        .with_batch_exporter(exporter)
        .build())
}

/// File logger plus OTLP span export to `endpoint`. Repeated calls are no-ops.
pub fn setup_logger(log_dir: &str, endpoint: &str) -> Result<(), BoxError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    // Open the log file before spawning anything so a bad directory leaves
    // no worker behind and a later call can retry.
    let file = File::create(Path::new(log_dir).join("dorkgenius.log"))?;

    // The exporter needs a live runtime, so it is built on a worker thread
    // that keeps the runtime parked for the life of the process.
    let (tx, rx) = mpsc::sync_channel(1);
    let endpoint_owned = endpoint.to_owned();

    let handle = std::thread::Builder::new()
        .name("otel-worker".into())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .worker_threads(2)
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    tx.send(Err(format!("tokio runtime: {e}"))).ok();
                    return;
                }
            };

            rt.block_on(async move {
                let provider = init_tracer_provider(&endpoint_owned);
                let ok = provider.is_ok();
                tx.send(provider).ok();
                if ok {
                    std::future::pending::<()>().await;
                }
            });
        })?;

    let provider = rx.recv()??;

    let level = std::env::var("DORKGENIUS_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::INFO);

    let (writer, guard) = tracing_appender::non_blocking(file);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_writer(writer)
        .with_filter(level);

    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE));

    tracing_subscriber::registry()
        .with(LevelFilter::TRACE)
        .with(file_layer)
        .with(otel_layer)
        .try_init()
        .ok();

    LOG_GUARD.set(guard).ok();
    TRACER_PROVIDER.set(provider).ok();
    WORKER_HANDLE.set(handle).ok();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_log_dir_leaves_logger_unset() {
        let err = setup_logger("/nonexistent/dorkgenius", "http://localhost:4317");
        assert!(err.is_err());
        assert!(LOG_GUARD.get().is_none());
        assert!(TRACER_PROVIDER.get().is_none());
    }
}

use std::time::Duration;

use opentelemetry::global::{self};
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{MetricExporter, WithExportConfig};
use opentelemetry_sdk::{
    metrics::{PeriodicReader, SdkMeterProvider},
    trace::{Sampler, SdkTracerProvider},
    Resource,
};
use tracing_log::LogTracer;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

use crate::config::{Settings, TelemetryConfig};
use crate::utils::blocking_task_guard::init_blocking_tasks_metric;
use crate::utils::measure_metrics::init_memory_metrics;
use crate::utils::APP_NAME;

use super::StartupError;

fn env_filter(telemetry: &TelemetryConfig) -> Result<EnvFilter, StartupError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&telemetry.log_filter)?),
    }
}

fn tracer_provider(telemetry: &TelemetryConfig) -> Result<SdkTracerProvider, StartupError> {
    let otlp_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&telemetry.tracing_endpoint)
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(otlp_exporter)
        .with_resource(Resource::builder().with_service_name(APP_NAME).build())
        .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
            telemetry.tracing_sampling_rate,
        ))))
        .build())
}

/// Installs the global subscriber: env filter, stdout formatting and, when
/// enabled, OTLP span export. Returns the tracer provider to shut down on exit.
pub fn init_tracing(settings: &Settings) -> Result<Option<SdkTracerProvider>, StartupError> {
    let telemetry = &settings.telemetry;

    LogTracer::init()?;

    let provider = settings
        .tracing_enabled()
        .then(|| tracer_provider(telemetry))
        .transpose()?;

    let telemetry_layer = provider
        .as_ref()
        .map(|provider| OpenTelemetryLayer::new(provider.tracer(APP_NAME)));

    let pretty_layer = telemetry.stdout_pretty.then(|| {
        fmt::layer()
            .pretty()
            .with_thread_ids(true)
            .with_thread_names(true)
    });
    let compact_layer = (!telemetry.stdout_pretty).then(|| fmt::layer().compact().with_target(true));

    let subscriber = Registry::default()
        .with(env_filter(telemetry)?)
        .with(telemetry_layer)
        .with(pretty_layer)
        .with(compact_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(provider) = &provider {
        global::set_tracer_provider(provider.clone());
    }

    Ok(provider)
}

pub fn init_metrics_provider(settings: &Settings) -> Result<SdkMeterProvider, StartupError> {
    let exporter = MetricExporter::builder()
        .with_tonic()
        .with_endpoint(&settings.telemetry.metrics_endpoint)
        .build()?;

    let provider = SdkMeterProvider::builder()
        .with_resource(Resource::builder().with_service_name(APP_NAME).build())
        .with_reader(
            PeriodicReader::builder(exporter)
                .with_interval(Duration::from_secs(10))
                .build(),
        )
        .build();

    global::set_meter_provider(provider.clone());

    init_memory_metrics();
    init_blocking_tasks_metric();

    Ok(provider)
}

mod observability;
mod storage;

use crate::storage::SledStartupError;
use thiserror::Error;

pub use observability::{init_metrics_provider, init_tracing};
pub use storage::init_storage;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to open sled storage")]
    OpenSledStorage(#[from] SledStartupError),

    #[error("Failed to load configs")]
    LoadConfig(#[from] config::ConfigError),

    #[error("Invalid log filter")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Failed to init tracing")]
    InitTracing(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("Failed to set global tracing provider")]
    SetGlobalTracingProvider(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("Failed to set logger")]
    SetLogger(#[from] tracing_log::log::SetLoggerError),
}

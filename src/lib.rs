mod app;
mod config;
pub(crate) mod handlers;
mod init;
pub(crate) mod middleware;
pub(crate) mod service;
pub(crate) mod storage;
pub(crate) mod utils;

mod docs;

pub use config::Settings;
pub use handlers::error::AppError;
pub use init::StartupError;
pub use utils::ShutdownTrigger;

use axum::Router;
use opentelemetry_sdk::{metrics::SdkMeterProvider, trace::SdkTracerProvider};

#[cfg(feature = "integration_tests")]
pub use app::build_app;

#[cfg(feature = "integration_tests")]
pub use storage::{Todo, TodoId};

#[cfg(feature = "integration_tests")]
pub use service::{DatabaseState, Service};

#[cfg(feature = "integration_tests")]
pub use storage::test_util::TestStorageBuilder;

#[cfg(feature = "integration_tests")]
pub use handlers::types::DeletedTodoResponse;

use tracing::{info, instrument};

/// Keeps the global subscriber's span exporter alive; flushes it on drop.
pub struct TracingProviderGuard {
    provider: Option<SdkTracerProvider>,
}

impl TracingProviderGuard {
    pub fn new(settings: &Settings) -> Result<Self, StartupError> {
        Ok(Self {
            provider: init::init_tracing(settings)?,
        })
    }
}

impl Drop for TracingProviderGuard {
    fn drop(&mut self) {
        if let Some(provider) = &self.provider {
            let _ = provider.shutdown();
        }
    }
}

pub struct MetricsProviderGuard {
    provider: SdkMeterProvider,
}

impl MetricsProviderGuard {
    pub fn new(settings: &Settings) -> Result<Self, StartupError> {
        Ok(Self {
            provider: init::init_metrics_provider(settings)?,
        })
    }
}

impl Drop for MetricsProviderGuard {
    fn drop(&mut self) {
        let _ = self.provider.shutdown();
    }
}

/// Opens the store and builds the router around it.
///
/// The returned service is the same one the router holds, so the caller can
/// close the store after the server has drained.
#[instrument(name = "init_app", skip_all)]
pub fn init_app(
    settings: Settings,
    shutdown: ShutdownTrigger,
) -> Result<(Router, service::Service), StartupError> {
    info!(settings = ?settings, "init_app with settings");

    let service = init::init_storage(&settings)?;

    Ok((app::build_app(service.clone(), settings, shutdown), service))
}

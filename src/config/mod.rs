pub(crate) mod types;

use std::{net::SocketAddr, time::Duration};

use config::{Config, Environment, File};
use serde::Deserialize;
use types::{AdminSettings, RateLimiterSettings, ServerConfig, StorageSettings};
pub(crate) use types::{Limits, SledConfig, TelemetryConfig};

use crate::{init::StartupError, trace_err};

/// Plain environment variables honoured on top of the `APP__*` layer.
const PORT_ENV: &str = "PORT";
const DATABASE_PATH_ENV: &str = "DATABASE_PATH";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub(crate) server: ServerConfig,
    pub(crate) storage: StorageSettings,
    pub(crate) telemetry: TelemetryConfig,
    pub(crate) rate_limiter: RateLimiterSettings,
    pub(crate) admin: AdminSettings,
}

impl Settings {
    pub fn new() -> Result<Self, StartupError> {
        dotenv::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or("development".into());

        Settings::from_file(&run_mode)
    }

    pub fn from_file(file_name: &str) -> Result<Self, StartupError> {
        trace_err!(
            Config::builder()
                .add_source(File::with_name("config/default"))
                .add_source(File::with_name(&format!("config/{file_name}")).required(false))
                .add_source(Environment::with_prefix("APP").separator("__"))
                .set_override_option("server.port", std::env::var(PORT_ENV).ok())?
                .set_override_option("storage.sled.path", std::env::var(DATABASE_PATH_ENV).ok())?
                .build()?
                .try_deserialize(),
            "failed to build app settings"
        )
        .map_err(Into::into)
    }

    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }

    pub fn tracing_enabled(&self) -> bool {
        self.telemetry.tracing
    }

    pub fn metrics_enabled(&self) -> bool {
        self.telemetry.metrics
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.admin.restart_delay_ms)
    }

    #[cfg(feature = "integration_tests")]
    pub fn with_storage_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.storage.sled.path = path.into();
        self
    }
}

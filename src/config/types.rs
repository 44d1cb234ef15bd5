use std::{net::IpAddr, num::NonZeroU32, path::PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub sled: SledConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SledConfig {
    pub path: PathBuf,
    /// Background flush period; sled's own default is used when unset.
    pub flush_every_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub log_filter: String,
    pub stdout_pretty: bool,
    pub tracing: bool,
    pub tracing_endpoint: String,
    pub tracing_sampling_rate: f64,
    pub metrics: bool,
    pub metrics_endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Limits {
    pub cells_per_second: NonZeroU32,
    pub burst_per_second: NonZeroU32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimits {
    pub global: Limits,
    pub per_ip: Limits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimiterSettings {
    pub x_forwarded_for: bool,
    pub read: RateLimits,
    pub write: RateLimits,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminSettings {
    pub restart_enabled: bool,
    pub restart_delay_ms: u64,
}

use std::net::SocketAddr;

use todo_service::{
    MetricsProviderGuard, Settings, ShutdownTrigger, StartupError, TracingProviderGuard,
};

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};

#[derive(Debug, Error)]
enum TodoServiceError {
    #[error("Startup error")]
    Startup(#[from] StartupError),

    #[error("Io error")]
    Io(#[from] std::io::Error),
}

fn main() -> Result<(), TodoServiceError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .max_blocking_threads(num_cpus::get() * 2)
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn shutdown_signal(trigger: ShutdownTrigger) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received"),
        _ = terminate => info!("SIGTERM received"),
        _ = trigger.requested() => info!("restart requested"),
    }
}

async fn async_main() -> Result<(), TodoServiceError> {
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("failed to load settings: {e:?}");
            return Err(e.into());
        }
    };

    let _tracing_provider_guard = TracingProviderGuard::new(&settings)?;

    let _metrics_provider_guard = settings
        .metrics_enabled()
        .then(|| MetricsProviderGuard::new(&settings))
        .transpose()?;

    let server_addr = settings.server_addr();
    let restart_delay = settings.restart_delay();
    let shutdown = ShutdownTrigger::new();

    let (app, service) = todo_service::init_app(settings, shutdown.clone())?;

    let listener = TcpListener::bind(&server_addr).await?;
    info!(addr = %server_addr, "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
    .await?;

    if let Err(e) = service.close_storage().await {
        warn!(error = %e, "failed to close storage on shutdown");
    }

    if shutdown.is_fired() {
        info!(delay = ?restart_delay, "exiting for restart");
        tokio::time::sleep(restart_delay).await;
    }

    Ok(())
}

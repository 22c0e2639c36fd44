// Framework bootstrap for the session server runtime.

use crate::frameworks::config::{CliArgs, ServerConfig};
use crate::interface_adapters::client_log::FileClientLogSink;
use crate::interface_adapters::file_store::FileSessionStore;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::AppState;
use std::{io::Result, sync::Arc};

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, config: ServerConfig) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(config);

    tracing::info!(
        %address,
        sessions_dir = %state.sessions.sessions_dir().display(),
        logs_dir = %state.client_logs.logs_dir().display(),
        static_dir = %state.static_dir.display(),
        "listening"
    );

    // Each accepted connection is served on its own task.
    let app = routes::app(state);

    // Serve app and report errors rather than panicking
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, "server error");
        })
}

pub async fn run_with_config(args: CliArgs) -> Result<()> {
    init_runtime();

    let config = ServerConfig::load(&args).inspect_err(|e| {
        tracing::error!(error = %e, "failed to load configuration");
    })?;

    let (host, port) = (config.host.clone(), config.port);

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .inspect_err(|e| {
            tracing::error!(%host, port, error = %e, "failed to bind");
        })?;

    run(listener, config).await
}

fn build_state(config: ServerConfig) -> Arc<AppState> {
    Arc::new(AppState {
        sessions: FileSessionStore::new(config.sessions_dir),
        client_logs: FileClientLogSink::new(config.logs_dir),
        static_dir: config.static_dir,
        max_body_bytes: config.max_body_bytes,
    })
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {},
                    _ = wait_for_ctrl_c() => {},
                }
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                wait_for_ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        wait_for_ctrl_c().await;
    }

    tracing::info!("shutting down");
}

async fn wait_for_ctrl_c() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        // Without a handler the server can only be stopped externally.
        tracing::warn!(%error, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

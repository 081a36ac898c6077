use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpListener;
use tower::Layer;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use server::AppState;
use server::handlers::http::routes::build_api_router;
use server::tower_middle::TimeoutLayer;
use shared::config::load_config;

#[derive(Parser, Debug)]
#[command(name = "server", version, about = "Token-authenticated item API server")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Lower the default log filter from info to debug
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = load_config(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;

    let addr: SocketAddr = config
        .server
        .addr()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.addr()))?;

    let state = AppState::new(config).context("Failed to build application state")?;
    let router = Arc::new(build_api_router());

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);

    let serve = {
        let state = state.clone();
        let router = Arc::clone(&router);
        async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                        continue;
                    }
                };
                let io = TokioIo::new(stream);

                let timeout =
                    Duration::from_secs(state.config.read().await.server.request_timeout_secs);
                let state = state.clone();
                let router = Arc::clone(&router);

                tokio::task::spawn(async move {
                    // Every request on this connection goes through the
                    // timeout layer and into the router.
                    let service =
                        tower::service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                            let state = state.clone();
                            let router = Arc::clone(&router);
                            async move { router.route(req, state).await }
                        });
                    let service = TimeoutLayer::new(timeout).layer(service);

                    if let Err(err) = http1::Builder::new()
                        .timer(TokioTimer::new())
                        .serve_connection(io, TowerToHyperService::new(service))
                        .await
                    {
                        warn!("Error serving connection: {:?}", err);
                    }
                });
            }
        }
    };

    let reload = reload_on_sighup(state, args.config.clone());

    tokio::select! {
        _ = serve => {}
        _ = reload => {}
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    Ok(())
}

/// Re-read the config file on SIGHUP and swap it into the live handle.
///
/// The JWT secret is intentionally not re-read — rotating it requires a
/// restart (see `AuthConfig::jwt_secret`).
#[cfg(unix)]
async fn reload_on_sighup(state: AppState, config_path: String) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hup = match signal(SignalKind::hangup()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to install SIGHUP handler: {}", e);
            return;
        }
    };

    while hup.recv().await.is_some() {
        match load_config(&config_path) {
            Ok(new) => {
                state.config.reload(new).await;
                info!("Configuration reloaded from {}", config_path);
            }
            Err(e) => error!("Config reload failed, keeping previous config: {}", e),
        }
    }
}

#[cfg(not(unix))]
async fn reload_on_sighup(_state: AppState, _config_path: String) {
    std::future::pending::<()>().await;
}

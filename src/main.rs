//! Rerank gateway server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use reqwest::{Method, StatusCode};
use tokio::net::TcpListener;
use tokio::signal;

use rerank_bridge::config::Config;
use rerank_bridge::constants::RERANK_ENDPOINT_PATH;
use rerank_bridge::gateway::{HandlerState, create_router_with_state};
use rerank_bridge::inference::{
    InferenceBackend, MockInferenceBackend, WorkersAiBackend, WorkersAiConfig,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        model = %config.model,
        max_body_bytes = config.max_body_bytes,
        "Rerank gateway starting"
    );

    let backend: Arc<dyn InferenceBackend> = if config.mock_inference {
        tracing::warn!("RERANK_MOCK_INFERENCE set, serving scores from the in-process mock");
        Arc::new(MockInferenceBackend::new())
    } else {
        let workers_ai = WorkersAiConfig::from_config(&config)?;
        Arc::new(WorkersAiBackend::new(workers_ai)?)
    };

    let state = HandlerState::from_config(&config, backend);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Rerank gateway shutdown complete");
    Ok(())
}

/// Probes the local endpoint with a preflight request, which needs neither
/// credentials nor an upstream call. Exits 0 on `204`.
fn run_health_check() -> i32 {
    let port = std::env::var("RERANK_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}{}", port, RERANK_ENDPOINT_PATH);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.request(Method::OPTIONS, &url).send().await {
            Ok(res) if res.status() == StatusCode::NO_CONTENT => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

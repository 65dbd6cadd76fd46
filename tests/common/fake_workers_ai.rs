//! In-process stand-in for the Cloudflare Workers AI REST API.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::post,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A request the fake upstream received.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub account: String,
    pub model: String,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

/// What the fake upstream answers with.
#[derive(Debug, Clone)]
pub enum UpstreamReply {
    /// `200` with the given JSON body.
    Json(serde_json::Value),
    /// An arbitrary status with a text body.
    Status(u16, String),
    /// Sleeps before answering `200` with the body.
    Delayed(Duration, serde_json::Value),
}

impl UpstreamReply {
    /// Wraps model output in a successful REST envelope.
    pub fn success(response: serde_json::Value) -> Self {
        Self::Json(serde_json::json!({
            "result": { "response": response },
            "success": true,
            "errors": [],
            "messages": []
        }))
    }
}

#[derive(Clone)]
struct FakeState {
    reply: UpstreamReply,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

pub struct FakeWorkersAi {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl FakeWorkersAi {
    /// Base URL to hand to `WorkersAiConfig::with_base_url`.
    pub fn base_url(&self) -> String {
        format!("http://{}/client/v4", self.addr)
    }

    pub fn captured(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

impl Drop for FakeWorkersAi {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn run_model(
    State(state): State<FakeState>,
    Path((account, model)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.captured.lock().unwrap().push(CapturedRequest {
        account,
        model: model.trim_start_matches('/').to_string(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    match state.reply {
        UpstreamReply::Json(value) => (StatusCode::OK, Json(value)).into_response(),
        UpstreamReply::Status(code, text) => (
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            text,
        )
            .into_response(),
        UpstreamReply::Delayed(delay, value) => {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, Json(value)).into_response()
        }
    }
}

pub async fn spawn_fake_workers_ai(reply: UpstreamReply) -> FakeWorkersAi {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = FakeState {
        reply,
        captured: captured.clone(),
    };

    let app = Router::new()
        .route(
            "/client/v4/accounts/{account}/ai/run/{*model}",
            post(run_model),
        )
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    FakeWorkersAi {
        addr,
        captured,
        shutdown_tx: Some(shutdown_tx),
    }
}

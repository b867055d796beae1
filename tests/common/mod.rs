//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use inference_gateway::{GatewayConfig, GatewayServer, ShutdownHandle};
use serde_json::Value;
use tokio::net::TcpListener;

/// What the mock backend answers with.
#[derive(Clone)]
pub struct MockReply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl MockReply {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Requests seen by the mock backend: headers and decoded JSON body.
pub type Received = Arc<Mutex<Vec<(HeaderMap, Value)>>>;

#[derive(Clone)]
struct MockState {
    reply: MockReply,
    received: Received,
}

/// A running mock inference backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    pub received: Received,
}

impl MockBackend {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Start a mock backend serving `POST /v1/chat/completions` with a fixed reply.
pub async fn start_mock_backend(reply: MockReply) -> MockBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received: Received = Arc::default();

    let state = MockState {
        reply,
        received: received.clone(),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(mock_completion))
        .with_state(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockBackend { addr, received }
}

async fn mock_completion(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    state.received.lock().unwrap().push((headers, body));
    if !state.reply.delay.is_zero() {
        tokio::time::sleep(state.reply.delay).await;
    }
    (state.reply.status, state.reply.body.clone())
}

/// Start the gateway on an ephemeral port.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, ShutdownHandle) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = ShutdownHandle::new();
    let server = GatewayServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// An address with nothing listening on it.
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub fn completions_url(addr: SocketAddr) -> String {
    format!("http://{}/v1/chat/completions", addr)
}

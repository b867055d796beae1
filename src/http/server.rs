//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router for `/v1/chat/completions`
//! - Wire up middleware (tracing, request ID, body limit)
//! - Dispatch each request to the completion mode chosen at startup
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Extension, Router,
    extract::{DefaultBodyLimit, Request, State},
    middleware,
    response::{IntoResponse, Response},
    routing::any,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::completion::{CompletionMode, TransportError};
use crate::config::GatewayConfig;
use crate::http::error::GatewayError;
use crate::http::middleware::request_id_middleware;
use crate::http::request::{RequestId, parse_chat_request};
use crate::http::response::assemble_response;
use crate::observability::metrics;

/// Route served by the gateway.
pub const CHAT_COMPLETIONS_ROUTE: &str = "/v1/chat/completions";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub mode: Arc<CompletionMode>,
}

/// HTTP server for the inference gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
    mode_name: &'static str,
}

impl GatewayServer {
    /// Create a server whose mode is derived from `config.backend`.
    pub fn new(config: GatewayConfig) -> Result<Self, TransportError> {
        let mode = CompletionMode::from_config(&config.backend)?;
        Ok(Self::with_mode(config, mode))
    }

    /// Create a server with an explicitly constructed completion mode.
    pub fn with_mode(config: GatewayConfig, mode: CompletionMode) -> Self {
        let mode_name = mode.name();
        let state = AppState {
            mode: Arc::new(mode),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            mode_name,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let body_limit = match config.limits.max_body_bytes {
            Some(max) => DefaultBodyLimit::max(max),
            None => DefaultBodyLimit::disable(),
        };

        Router::new()
            .route(CHAT_COMPLETIONS_ROUTE, any(chat_completions_handler))
            .with_state(state)
            .layer(body_limit)
            .layer(middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = self.mode_name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Chat completions handler.
/// Parses the request, runs the configured mode, and assembles the reply.
async fn chat_completions_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    request: Request,
) -> Response {
    let start_time = Instant::now();
    let mode = state.mode.name();

    let response = match handle_chat_completion(&state, &request_id, request).await {
        Ok(response) => response,
        Err(e) => {
            if let GatewayError::Backend(cause) = &e {
                metrics::record_backend_error(cause.kind());
            }
            e.into_response()
        }
    };

    metrics::record_request(mode, response.status().as_u16(), start_time);
    response
}

async fn handle_chat_completion(
    state: &AppState,
    request_id: &RequestId,
    request: Request,
) -> Result<Response, GatewayError> {
    let chat = parse_chat_request(request).await?;

    tracing::debug!(
        messages = chat.messages.len(),
        stream = chat.stream,
        mode = state.mode.name(),
        "Chat completion request"
    );

    let completion = state.mode.complete(chat, request_id.as_str()).await?;
    Ok(assemble_response(completion, request_id))
}

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::handlers;
use crate::health;
use crate::service::TodoService;

/// Shared application state passed to Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TodoService>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(service: TodoService) -> Self {
        Self {
            service: Arc::new(service),
            start_time: Instant::now(),
        }
    }
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(health_handler))
        .route("/todos", post(handlers::create_list))
        .route(
            "/todos/{list_id}",
            get(handlers::list_view)
                .post(handlers::create_todo)
                .put(handlers::complete_all)
                .delete(handlers::delete_list),
        )
        .route(
            "/todos/{list_id}/{todo_id}",
            patch(handlers::update_todo).delete(handlers::delete_todo),
        )
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
}

/// Bind the listener and serve in the background. Returns a handle to shut it down.
pub async fn start(config: ServerConfig, service: TodoService) -> Result<ServerHandle, std::io::Error> {
    let router = build_router(AppState::new(service));
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    let local_addr = listener.local_addr()?;

    let token = CancellationToken::new();
    let shutdown = token.clone();
    let server = tokio::spawn(async move {
        let result = axum::serve(listener, router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await;
        if let Err(e) = result {
            tracing::error!(error = %e, "server stopped with error");
        }
    });

    tracing::info!(addr = %local_addr, "todos server started");

    Ok(ServerHandle {
        port: local_addr.port(),
        token,
        server,
    })
}

/// Handle returned by `start()`.
pub struct ServerHandle {
    pub port: u16,
    token: CancellationToken,
    server: JoinHandle<()>,
}

impl ServerHandle {
    /// Stop accepting connections, let in-flight requests finish, and wait.
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.server.await {
            tracing::warn!(error = %e, "server task did not exit cleanly");
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let lists = state.service.list_count().ok();
    let resp = health::health_check(state.start_time, lists);
    let status = if resp.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(resp))
}

use crate::app::dto::{ApiErrorBody, HealthResponse};
use crate::app::engine::ViewerEngine;
use anyhow::{Context as _, Result};
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse},
    routing::{get, post},
};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::spawn_blocking;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Viewer page compiled into the binary
const INDEX_HTML: &str = include_str!("../../frontend/index.html");

#[derive(Clone)]
pub struct HttpState {
    pub engine: ViewerEngine,
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> impl IntoResponse {
    (status, Json(ApiErrorBody { error: msg.into() }))
}

/// Routes: `/data` (graph payload), `/health`, `/reload`; everything else is
/// the front end, either bundled or served from `assets`.
pub fn build_router(engine: ViewerEngine, assets: Option<PathBuf>) -> Router {
    let state = Arc::new(HttpState { engine });

    let router = Router::new()
        .route("/data", get(data))
        .route("/health", get(health))
        .route("/reload", post(reload))
        .with_state(state);

    let router = match assets {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.fallback(index),
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn bind(addr: &str) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to listen on {addr}"))
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(app: Router, listener: TcpListener, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;
    Ok(())
}

async fn data(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let snapshot = state.engine.snapshot();
    (
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        snapshot.json.clone(),
    )
}

async fn health(State(state): State<Arc<HttpState>>) -> Json<HealthResponse> {
    Json(state.engine.health())
}

async fn reload(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let engine = state.engine.clone();
    match spawn_blocking(move || engine.reload()).await {
        Ok(Ok(res)) => Json(res).into_response(),
        Ok(Err(e)) => {
            api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")).into_response()
        }
        Err(e) => api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("task join error: {e}"),
        )
        .into_response(),
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

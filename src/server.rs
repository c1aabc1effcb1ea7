//! Local HTTP control surface.
//!
//! Serves the HTML page and bridges the JSON endpoints to an
//! [`InputCapability`]. Every bridge failure is reported as
//! `{"success": false, "error": ...}` with status 200.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::bridge::{InputCapability, ProcessCapability};
use crate::config::ServerConfig;
use crate::error::BridgeError;
use crate::event::ClickRequest;

/// Largest accepted `POST /api/click` body.
pub const CLICK_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone)]
pub struct ServerState {
    capability: Arc<dyn InputCapability>,
    /// Serialises bridge calls so two commands never run at once.
    gate: Arc<Mutex<()>>,
    html_path: PathBuf,
}

impl ServerState {
    pub fn new(capability: Arc<dyn InputCapability>, html_path: PathBuf) -> Self {
        Self {
            capability,
            gate: Arc::new(Mutex::new(())),
            html_path,
        }
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(page_handler).fallback(not_found))
        .route("/gui.html", get(page_handler).fallback(not_found))
        .route("/api/position", get(position_handler).fallback(not_found))
        .route(
            "/api/click",
            post(click_handler)
                .fallback(not_found)
                .layer(DefaultBodyLimit::max(CLICK_BODY_LIMIT)),
        )
        .fallback(not_found)
        .with_state(state)
}

/// Starts the server described by `config` and runs until Ctrl-C.
/// `config_file` is handed to every spawned command.
pub async fn serve(config: ServerConfig, config_file: Option<PathBuf>) -> anyhow::Result<()> {
    let base_dir = config.resolve_base_dir()?;
    let capability =
        ProcessCapability::from_config(&config, &base_dir)?.with_config_file(config_file);
    let state = ServerState::new(Arc::new(capability), base_dir.join(&config.html_file));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    log::info!("Serving {} from {}", config.html_file, base_dir.display());
    println!("Mouse Click Simulator Web GUI");
    println!(
        "Server running at http://localhost:{}/{}",
        local_addr.port(),
        config.html_file
    );
    println!("Open this URL in your web browser");
    println!("Press Ctrl+C to stop");

    serve_on(listener, state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
        }
    })
    .await?;

    println!("\nServer stopped");
    Ok(())
}

pub async fn serve_on<F>(listener: TcpListener, state: ServerState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn page_handler(State(state): State<ServerState>) -> Response {
    match tokio::fs::read(&state.html_path).await {
        Ok(content) => Html(content).into_response(),
        Err(e) => {
            log::warn!("Cannot read {}: {}", state.html_path.display(), e);
            not_found().await
        }
    }
}

async fn position_handler(State(state): State<ServerState>) -> Response {
    let result = {
        let _guard = state.gate.lock().await;
        state.capability.pointer_position().await
    };
    match result {
        Ok(position) => json_response(json!({
            "success": true,
            "x": position.x,
            "y": position.y,
        })),
        Err(e) => failure(e),
    }
}

async fn click_handler(
    State(state): State<ServerState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            return failure(BridgeError::MalformedRequest(format!(
                "invalid click request: {}",
                rejection.body_text()
            )))
        }
    };
    let request = match parse_click_request(&body) {
        Ok(request) => request,
        Err(e) => return failure(e),
    };

    let result = {
        let _guard = state.gate.lock().await;
        state.capability.click(&request).await
    };
    match result {
        Ok(()) => json_response(json!({
            "success": true,
            "position": request.position_label(),
        })),
        Err(e) => failure(e),
    }
}

fn parse_click_request(body: &[u8]) -> Result<ClickRequest, BridgeError> {
    let request: ClickRequest = serde_json::from_slice(body)?;
    request.validate()?;
    Ok(request)
}

fn failure(err: BridgeError) -> Response {
    log::warn!("Bridge request failed: {}", err);
    json_response(json!({
        "success": false,
        "error": err.to_string(),
    }))
}

fn json_response(body: Value) -> Response {
    (
        StatusCode::OK,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(body),
    )
        .into_response()
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

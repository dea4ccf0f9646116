//! HTTP transport: every POST body is a JSON-RPC payload.

use std::future::Future;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, info};

use crate::rpc::{handle_body, Reply};
use crate::service::SessionService;

/// Largest request body accepted (64 KiB)
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the router. Any path accepts POST; other methods get 405.
pub fn create_router(service: SessionService) -> Router {
    Router::new()
        .route("/", post(handle_rpc))
        .route("/*path", post(handle_rpc))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(
    listener: TcpListener,
    service: SessionService,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "JSON-RPC server listening");

    axum::serve(listener, create_router(service))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn handle_rpc(
    State(service): State<SessionService>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !is_json(&headers) {
        debug!(content_type = ?headers.get(header::CONTENT_TYPE), "rejected non-JSON body");
        return StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
    }

    match handle_body(&service, &body) {
        Reply::Empty => StatusCode::NO_CONTENT.into_response(),
        reply => Json(reply).into_response(),
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

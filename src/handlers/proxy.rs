use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde_json::json;
use crate::state::AppState;

pub const PROXY_PREFIX: &str = "/api/proxy";

fn upstream_path(uri: &Uri) -> String {
    let path = uri.path().strip_prefix(PROXY_PREFIX).unwrap_or(uri.path());
    match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    }
}

fn proxy_error(e: reqwest::Error) -> Response {
    tracing::error!("Proxy error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Proxy server error" })),
    )
        .into_response()
}

/// Relays browser calls to the backend; CORS headers come from the router's layer.
pub async fn proxy_request(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = upstream_path(&uri);

    let upstream = match state.upstream.forward(method, &path, headers, body).await {
        Ok(upstream) => upstream,
        Err(e) => return proxy_error(e),
    };

    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
    match upstream.bytes().await {
        Ok(bytes) => {
            let mut response = (status, bytes).into_response();
            if let Some(content_type) = content_type {
                response.headers_mut().insert(CONTENT_TYPE, content_type);
            }
            response
        }
        Err(e) => proxy_error(e),
    }
}

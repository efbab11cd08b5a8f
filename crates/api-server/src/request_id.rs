use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extension carrying the request ID through handlers.
#[derive(Clone, Debug)]
#[allow(dead_code)]
pub struct RequestId(pub String);

/// Tags every request with an `X-Request-Id`.
///
/// An incoming header (set by a reverse proxy) wins; otherwise a fresh UUID
/// v4 is generated. The ID is echoed on the response so clients can quote it
/// when reporting problems.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    tracing::Span::current().record("request_id", id.as_str());
    request.extensions_mut().insert(RequestId(id.clone()));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

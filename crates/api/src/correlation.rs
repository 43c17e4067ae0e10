//! Correlation id middleware.
//!
//! Every request gets a correlation id: the inbound `X-Correlation-ID`
//! header when present and non-empty, a freshly generated one otherwise.
//! Handlers receive it as an `Extension<CorrelationId>` and pass it on
//! explicitly; the response echoes the id so callers can stitch their own
//! logs to ours.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use common::CorrelationId;

/// Reads or generates the correlation id, exposes it to the handler and
/// echoes it on the response.
pub async fn propagate(mut request: Request, next: Next) -> Response {
    let correlation = request
        .headers()
        .get(CorrelationId::HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(CorrelationId::from)
        .unwrap_or_else(CorrelationId::generate);

    request.extensions_mut().insert(correlation.clone());
    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(correlation.as_str()) {
        response.headers_mut().insert(CorrelationId::HEADER, value);
    }
    response
}

//! Liveness endpoint.
//!
//! Answers without touching GitHub or the command map, so it reports only
//! that the process is up and serving HTTP.

use axum::http::StatusCode;

/// Returns 200 with the text "OK".
///
/// ```text
/// GET /health HTTP/1.1
///
/// HTTP/1.1 200 OK
///
/// OK
/// ```
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health_handler().await, (StatusCode::OK, "OK"));
    }
}

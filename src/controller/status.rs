use axum::http::StatusCode;

/// Check the status of the service
///
/// If the service is up and running correctly, it will return a 204.
pub(super) async fn handler() -> StatusCode {
    metrics::counter!("status_check").increment(1);
    StatusCode::NO_CONTENT
}

pub(crate) mod metrics;
pub(crate) mod status;

use crate::error::ServerError;
use axum::routing::{get, head, Router};

async fn fallback() -> ServerError {
    ServerError::not_found()
}

pub(crate) fn create() -> Router {
    Router::new()
        .route("/status", head(status::handler))
        .route("/metrics", get(metrics::handler))
        .fallback(fallback)
}

use axum::extract::Extension;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Renders the counters of the service, served and failed documents included,
/// using the prometheus format.
pub(super) async fn handler(Extension(handle): Extension<Arc<PrometheusHandle>>) -> String {
    handle.render()
}

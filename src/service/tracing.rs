use axum::http::Request;
use tower_http::trace::{MakeSpan, TraceLayer};
use tracing::{Level, Span};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl From<SpanLevel> for Level {
    fn from(value: SpanLevel) -> Self {
        match value {
            SpanLevel::Trace => Level::TRACE,
            SpanLevel::Debug => Level::DEBUG,
            SpanLevel::Info => Level::INFO,
            SpanLevel::Warn => Level::WARN,
            SpanLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Configuration {
    /// Header carrying the identifier of the trace, recorded on the request span.
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub level: SpanLevel,
}

impl Configuration {
    pub fn add_layer(&self, router: axum::Router) -> axum::Router {
        router.layer(TraceLayer::new_for_http().make_span_with(RequestSpan {
            header: self.header.clone(),
            level: self.level,
        }))
    }
}

#[derive(Clone, Debug)]
pub struct RequestSpan {
    header: Option<String>,
    level: SpanLevel,
}

// the level of a span is part of its static metadata
macro_rules! request_span {
    ($level:expr, $request:expr, $trace_id:expr) => {
        tracing::span!(
            $level,
            "request",
            method = %$request.method(),
            uri = %$request.uri(),
            version = ?$request.version(),
            trace_id = $trace_id,
        )
    };
}

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let trace_id = self
            .header
            .as_ref()
            .and_then(|name| request.headers().get(name.as_str()))
            .and_then(|value| value.to_str().ok());

        match self.level {
            SpanLevel::Trace => request_span!(Level::TRACE, request, trace_id),
            SpanLevel::Debug => request_span!(Level::DEBUG, request, trace_id),
            SpanLevel::Info => request_span!(Level::INFO, request, trace_id),
            SpanLevel::Warn => request_span!(Level::WARN, request, trace_id),
            SpanLevel::Error => request_span!(Level::ERROR, request, trace_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Configuration, SpanLevel};

    #[test]
    fn should_deserialize_defaults() {
        let config: Configuration = serde_json::from_str("{}").unwrap();
        assert!(config.header.is_none());
        assert_eq!(config.level, SpanLevel::Debug);
    }

    #[test]
    fn should_deserialize_header_and_level() {
        let config: Configuration =
            serde_json::from_str(r#"{ "header": "x-request-id", "level": "info" }"#).unwrap();
        assert_eq!(config.header.as_deref(), Some("x-request-id"));
        assert_eq!(tracing::Level::from(config.level), tracing::Level::INFO);
    }
}

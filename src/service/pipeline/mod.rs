//! Serves the documents of a [`DocumentProvider`] on the requests matching a route template.

pub mod filter;
pub mod template;

pub use filter::PreSerializeFilter;

use axum::extract::OriginalUri;
use axum::http::header::{HeaderName, InvalidHeaderName, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use docket_engine::{provider, BoxError, DocumentProvider};
use std::sync::Arc;
use template::RouteTemplate;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid route template: {0}")]
    Template(#[from] matchit::InsertError),
    #[error("invalid host header: {0}")]
    HostHeader(#[from] InvalidHeaderName),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Provider(#[from] provider::Error),
    #[error("pre-serialize filter #{index} failed: {source}")]
    Filter {
        index: usize,
        #[source]
        source: BoxError,
    },
    #[error("unable to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    fn reason(&self) -> &'static str {
        match self {
            Self::Provider(provider::Error::UnknownDocument { .. }) => "unknown_document",
            Self::Provider(_) => "provider",
            Self::Filter { .. } => "filter",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Prefix removed from the request path by the routers wrapping the application.
fn base_path(parts: &Parts) -> Option<String> {
    let original = parts.extensions.get::<OriginalUri>()?;
    let prefix = original.path().strip_suffix(parts.uri.path())?;
    (!prefix.is_empty()).then(|| prefix.to_string())
}

pub struct DocumentPipeline {
    template: RouteTemplate,
    provider: Arc<dyn DocumentProvider>,
    filters: Vec<Box<dyn PreSerializeFilter>>,
    host_header: Option<HeaderName>,
}

impl std::fmt::Debug for DocumentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentPipeline")
            .field("template", &self.template.as_str())
            .field("filters", &self.filters.len())
            .field("host_header", &self.host_header)
            .finish()
    }
}

impl DocumentPipeline {
    pub fn builder(provider: Arc<dyn DocumentProvider>) -> DocumentPipelineBuilder {
        DocumentPipelineBuilder {
            template: template::DEFAULT_TEMPLATE.to_string(),
            provider,
            filters: Vec::new(),
            host_header: None,
        }
    }

    /// Name of the requested document when the request should be handled by the pipeline.
    pub fn requested_document(&self, method: &Method, path: &str) -> Option<String> {
        if method != Method::GET {
            return None;
        }
        self.template.document_name(path)
    }

    fn host<'p>(&self, parts: &'p Parts) -> Option<&'p str> {
        self.host_header
            .as_ref()
            .and_then(|name| parts.headers.get(name))
            .and_then(|value| value.to_str().ok())
    }

    fn render(&self, name: &str, parts: &Parts) -> Result<Response, Error> {
        let base_path = base_path(parts);
        let mut document =
            self.provider
                .get_document(name, self.host(parts), base_path.as_deref())?;
        for (index, filter) in self.filters.iter().enumerate() {
            filter
                .apply(&mut document, parts)
                .map_err(|source| Error::Filter { index, source })?;
        }
        // the whole body is serialized before the response exists
        let body = serde_json::to_vec(&document)?;
        Ok((StatusCode::OK, [(CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response())
    }

    /// Builds the requested document and writes it as json.
    ///
    /// Failures are logged and returned to the caller, which decides how to answer.
    pub fn serve(&self, name: &str, parts: &Parts) -> Result<Response, Error> {
        tracing::debug!("serving document {name:?}");
        let result = self.render(name, parts);
        match result {
            Ok(_) => {
                metrics::counter!("document_served", "document" => name.to_string()).increment(1);
            }
            Err(ref err) => {
                metrics::counter!("document_error", "reason" => err.reason()).increment(1);
                tracing::error!(
                    document = name,
                    path = parts.uri.path(),
                    "unable to serve document: {err:?}"
                );
            }
        }
        result
    }
}

pub struct DocumentPipelineBuilder {
    template: String,
    provider: Arc<dyn DocumentProvider>,
    filters: Vec<Box<dyn PreSerializeFilter>>,
    host_header: Option<String>,
}

impl DocumentPipelineBuilder {
    pub fn route_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Header providing the host exposed to the clients, when behind a reverse proxy.
    pub fn host_header(mut self, name: impl Into<String>) -> Self {
        self.host_header = Some(name.into());
        self
    }

    /// Adds a filter, applied after the ones registered before.
    pub fn filter<F: PreSerializeFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn build(self) -> Result<DocumentPipeline, BuildError> {
        let host_header = self
            .host_header
            .map(|name| HeaderName::try_from(name.as_str()))
            .transpose()?;
        Ok(DocumentPipeline {
            template: RouteTemplate::parse(&self.template)?,
            provider: self.provider,
            filters: self.filters,
            host_header,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{base_path, DocumentPipeline, Error, JSON_CONTENT_TYPE};
    use axum::extract::OriginalUri;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::request::Parts;
    use axum::http::{Method, Request, StatusCode};
    use docket_engine::{provider, BoxError, DocumentProvider};
    use docket_prelude::{Document, Info, Operation};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct StaticProvider {
        calls: AtomicUsize,
        received: Mutex<Vec<(String, Option<String>, Option<String>)>>,
    }

    impl DocumentProvider for StaticProvider {
        fn get_document(
            &self,
            name: &str,
            host: Option<&str>,
            base_path: Option<&str>,
        ) -> Result<Document, provider::Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.received.lock().unwrap().push((
                name.to_string(),
                host.map(String::from),
                base_path.map(String::from),
            ));
            if name != "v1" {
                return Err(provider::Error::UnknownDocument {
                    name: name.to_string(),
                });
            }
            let mut doc = Document::new(Info {
                title: "Test".into(),
                version: "1".into(),
                description: None,
            });
            doc.insert_operation("/pets", "get", Operation::default());
            Ok(doc)
        }
    }

    fn parts(method: Method, uri: &str) -> Parts {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("x-forwarded-host", "public.example.com")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[test]
    fn should_only_handle_get_requests() {
        let pipeline = DocumentPipeline::builder(Arc::new(StaticProvider::default()))
            .build()
            .unwrap();
        assert_eq!(
            pipeline
                .requested_document(&Method::GET, "/swagger/v1/swagger.json")
                .as_deref(),
            Some("v1")
        );
        assert_eq!(
            pipeline.requested_document(&Method::POST, "/swagger/v1/swagger.json"),
            None
        );
        assert_eq!(pipeline.requested_document(&Method::GET, "/pets"), None);
    }

    #[test]
    fn should_serve_json_document() {
        crate::try_init_logs();
        let provider = Arc::new(StaticProvider::default());
        let pipeline = DocumentPipeline::builder(provider.clone()).build().unwrap();
        let res = pipeline
            .serve("v1", &parts(Method::GET, "/swagger/v1/swagger.json"))
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get(CONTENT_TYPE).unwrap(), JSON_CONTENT_TYPE);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn should_propagate_unknown_document() {
        crate::try_init_logs();
        let pipeline = DocumentPipeline::builder(Arc::new(StaticProvider::default()))
            .build()
            .unwrap();
        let err = pipeline
            .serve("nonexistent", &parts(Method::GET, "/swagger/nonexistent/swagger.json"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Provider(provider::Error::UnknownDocument { .. })
        ));
    }

    #[test]
    fn should_thread_host_header() {
        let provider = Arc::new(StaticProvider::default());
        let pipeline = DocumentPipeline::builder(provider.clone())
            .host_header("x-forwarded-host")
            .build()
            .unwrap();
        pipeline
            .serve("v1", &parts(Method::GET, "/swagger/v1/swagger.json"))
            .unwrap();
        let received = provider.received.lock().unwrap();
        assert_eq!(
            received[0],
            ("v1".to_string(), Some("public.example.com".to_string()), None)
        );
    }

    #[test]
    fn should_read_base_path_from_original_uri() {
        let mut req = parts(Method::GET, "/swagger/v1/swagger.json");
        assert_eq!(base_path(&req), None);
        req.extensions.insert(OriginalUri(
            "/api/swagger/v1/swagger.json".parse().unwrap(),
        ));
        assert_eq!(base_path(&req).as_deref(), Some("/api"));
    }

    #[test]
    fn should_apply_filters_in_order() {
        let first = |doc: &mut Document, _: &Parts| -> Result<(), BoxError> {
            doc.info.title = "first".into();
            Ok(())
        };
        let second = |doc: &mut Document, req: &Parts| -> Result<(), BoxError> {
            doc.info.title = format!("{} then second on {}", doc.info.title, req.uri.path());
            Ok(())
        };
        let pipeline = DocumentPipeline::builder(Arc::new(StaticProvider::default()))
            .filter(first)
            .filter(second)
            .build()
            .unwrap();
        let req = parts(Method::GET, "/swagger/v1/swagger.json");
        let mut doc = pipeline.provider.get_document("v1", None, None).unwrap();
        for filter in pipeline.filters.iter() {
            filter.apply(&mut doc, &req).unwrap();
        }
        assert_eq!(doc.info.title, "first then second on /swagger/v1/swagger.json");
    }

    #[test]
    fn should_abort_when_filter_fails() {
        let failing =
            |_: &mut Document, _: &Parts| -> Result<(), BoxError> { Err("forbidden".into()) };
        let pipeline = DocumentPipeline::builder(Arc::new(StaticProvider::default()))
            .filter(failing)
            .build()
            .unwrap();
        let err = pipeline
            .serve("v1", &parts(Method::GET, "/swagger/v1/swagger.json"))
            .unwrap_err();
        assert!(matches!(err, Error::Filter { index: 0, .. }));
    }

    #[test]
    fn should_reject_invalid_host_header() {
        let err = DocumentPipeline::builder(Arc::new(StaticProvider::default()))
            .host_header("not a header")
            .build()
            .unwrap_err();
        assert!(matches!(err, super::BuildError::HostHeader(_)));
    }
}

use crate::error::ServerError;
use crate::service::pipeline::DocumentPipeline;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Answers the document requests and forwards every other request to the inner service.
#[derive(Clone, Debug)]
pub struct DocumentLayer {
    pipeline: Arc<DocumentPipeline>,
}

impl DocumentLayer {
    pub fn new(pipeline: DocumentPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

impl<S> Layer<S> for DocumentLayer {
    type Service = DocumentMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DocumentMiddleware {
            pipeline: self.pipeline.clone(),
            inner,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DocumentMiddleware<S> {
    pipeline: Arc<DocumentPipeline>,
    inner: S,
}

impl<S, B> Service<Request<B>> for DocumentMiddleware<S>
where
    S: Service<Request<B>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    B: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let Some(name) = self
            .pipeline
            .requested_document(req.method(), req.uri().path())
        else {
            // the clone is not ready, the original one is
            let clone = self.inner.clone();
            let mut inner = std::mem::replace(&mut self.inner, clone);
            return Box::pin(inner.call(req));
        };
        let (parts, _body) = req.into_parts();
        let response = match self.pipeline.serve(&name, &parts) {
            Ok(response) => response,
            Err(err) => ServerError::from(err).into_response(),
        };
        Box::pin(std::future::ready(Ok(response)))
    }
}

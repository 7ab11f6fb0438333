use docket_engine::BoxError;
use docket_prelude::Document;
use axum::http::request::Parts;

/// Last transformation of a document before it gets serialized, with access to the request.
pub trait PreSerializeFilter: Send + Sync {
    fn apply(&self, document: &mut Document, request: &Parts) -> Result<(), BoxError>;
}

impl<F> PreSerializeFilter for F
where
    F: Fn(&mut Document, &Parts) -> Result<(), BoxError> + Send + Sync,
{
    fn apply(&self, document: &mut Document, request: &Parts) -> Result<(), BoxError> {
        (self)(document, request)
    }
}

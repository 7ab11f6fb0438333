use crate::annotation::AnnotationRegistry;
use crate::registry::SchemaRegistry;
use crate::route::ApiRoute;
use crate::BoxError;
use docket_prelude::Operation;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("operation filter failed: {0}")]
    Filter(#[source] BoxError),
}

/// What an operation filter knows about the operation being built.
#[derive(Clone, Copy, Debug)]
pub struct OperationContext<'a> {
    pub route: &'a ApiRoute,
    pub annotations: &'a AnnotationRegistry,
    pub schemas: &'a SchemaRegistry,
}

/// Transformation applied on every operation while a document is built.
pub trait OperationFilter: Send + Sync {
    fn apply(&self, operation: &mut Operation, context: &OperationContext<'_>) -> Result<(), Error>;
}

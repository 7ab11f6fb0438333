pub mod annotation;
pub mod catalog;
pub mod loader;
pub mod merger;
pub mod operation;
pub mod provider;
pub mod registry;
pub mod route;

pub use annotation::{AnnotationRegistry, ResponseAnnotation};
pub use merger::ResponseMerger;
pub use operation::{OperationContext, OperationFilter};
pub use provider::{DocumentProvider, Generator};
pub use registry::{SchemaRegistry, TypeDescriptor};
pub use route::ApiRoute;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

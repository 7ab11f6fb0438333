use crate::annotation::ResponseAnnotation;
use crate::operation::{Error, OperationContext, OperationFilter};
use crate::registry::SchemaRegistry;
use docket_prelude::{Operation, Response};

/// Writes the fields provided by the annotation into the response.
///
/// Fields missing from the annotation, or empty descriptions, leave the response untouched.
pub fn merge_response(
    response: &mut Response,
    annotation: &ResponseAnnotation,
    schemas: &SchemaRegistry,
) {
    if let Some(description) = annotation.description.as_ref().filter(|d| !d.is_empty()) {
        response.description = Some(description.clone());
    }
    if let Some(ref body) = annotation.body {
        response.schema = Some(schemas.resolve(body));
    }
}

/// Merges the response annotations of a route, and of its group, into the operation.
///
/// Annotations are applied in order, so when several of them target the same
/// status, the group level ones win over the handler level ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseMerger;

impl OperationFilter for ResponseMerger {
    fn apply(&self, operation: &mut Operation, context: &OperationContext<'_>) -> Result<(), Error> {
        if context.route.id.is_empty() {
            return Err(Error::InvalidArgument(
                "operation context is not bound to a handler",
            ));
        }
        let mut annotations = context.annotations.annotations_for(context.route).peekable();
        if annotations.peek().is_none() {
            return Ok(());
        }
        let responses = operation.responses_mut();
        for annotation in annotations {
            let response = responses.entry(annotation.status_key()).or_default();
            merge_response(response, annotation, context.schemas);
        }
        Ok(())
    }
}

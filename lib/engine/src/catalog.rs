//! Conversion of a loaded catalog into a document generator.

use crate::annotation::{AnnotationRegistry, ResponseAnnotation};
use crate::provider::GeneratorBuilder;
use crate::registry::TypeDescriptor;
use crate::route::ApiRoute;
use docket_prelude::catalog::{Catalog, ResponseDefinition, RouteDefinition};
use http::{Method, StatusCode};

fn annotation(owner: &str, definition: ResponseDefinition) -> Option<ResponseAnnotation> {
    let Ok(status) = StatusCode::from_u16(definition.status) else {
        metrics::counter!("catalog_annotation_skipped", "reason" => "invalid_status").increment(1);
        tracing::warn!(
            "skipping response annotation of {owner}: invalid status code {}",
            definition.status
        );
        return None;
    };
    let mut result = ResponseAnnotation::new(status);
    result.description = definition.description;
    result.body = definition
        .body
        .map(|body| TypeDescriptor::new(body.name, body.schema));
    Some(result)
}

fn annotations(owner: &str, definitions: Vec<ResponseDefinition>) -> Vec<ResponseAnnotation> {
    definitions
        .into_iter()
        .filter_map(|definition| annotation(owner, definition))
        .collect()
}

fn route(definition: RouteDefinition) -> Option<(ApiRoute, Vec<ResponseDefinition>)> {
    let Ok(method) = Method::from_bytes(definition.method.to_ascii_uppercase().as_bytes()) else {
        metrics::counter!("catalog_route_skipped", "reason" => "invalid_method").increment(1);
        tracing::warn!(
            "skipping route {}: invalid method {:?}",
            definition.id,
            definition.method
        );
        return None;
    };
    let route = ApiRoute {
        id: definition.id,
        group: definition.group,
        document: definition.document,
        method,
        path: definition.path,
        summary: definition.summary,
        description: definition.description,
        tags: definition.tags,
        deprecated: definition.deprecated,
    };
    Some((route, definition.responses))
}

impl From<Catalog> for GeneratorBuilder {
    fn from(value: Catalog) -> Self {
        let mut registry = AnnotationRegistry::builder();
        for (name, group) in value.groups {
            let found = annotations(&name, group.responses);
            registry = registry.group(name, found);
        }

        let mut builder = GeneratorBuilder::default();
        for (api_route, responses) in value.routes.into_iter().filter_map(route) {
            let found = annotations(&api_route.id, responses);
            registry = registry.handler(api_route.id.clone(), found);
            builder = builder.route(api_route);
        }
        for (name, info) in value.documents {
            builder = builder.document(name, info);
        }
        builder.annotations(registry.build())
    }
}

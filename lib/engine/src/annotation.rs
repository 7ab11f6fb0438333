use crate::registry::TypeDescriptor;
use crate::route::ApiRoute;
use http::StatusCode;
use std::collections::HashMap;

/// Declares that a route may answer with the given status, description and body.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseAnnotation {
    pub status: StatusCode,
    pub description: Option<String>,
    pub body: Option<TypeDescriptor>,
}

impl ResponseAnnotation {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            description: None,
            body: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_body(mut self, body: TypeDescriptor) -> Self {
        self.body = Some(body);
        self
    }

    /// Key of the response in the operation's response map.
    pub fn status_key(&self) -> String {
        self.status.as_u16().to_string()
    }
}

/// Response annotations registered for handlers and for groups of handlers.
#[derive(Debug, Default)]
pub struct AnnotationRegistry {
    handlers: HashMap<String, Vec<ResponseAnnotation>>,
    groups: HashMap<String, Vec<ResponseAnnotation>>,
}

impl AnnotationRegistry {
    pub fn builder() -> AnnotationRegistryBuilder {
        AnnotationRegistryBuilder::default()
    }

    /// Annotations of the route's handler followed by the ones of its group.
    pub fn annotations_for(&self, route: &ApiRoute) -> impl Iterator<Item = &ResponseAnnotation> + '_ {
        let handler = self.handlers.get(&route.id).into_iter().flatten();
        let group = route
            .group
            .as_ref()
            .and_then(|name| self.groups.get(name))
            .into_iter()
            .flatten();
        handler.chain(group)
    }
}

#[derive(Debug, Default)]
pub struct AnnotationRegistryBuilder {
    inner: AnnotationRegistry,
}

impl AnnotationRegistryBuilder {
    pub fn handler<I>(mut self, id: impl Into<String>, annotations: I) -> Self
    where
        I: IntoIterator<Item = ResponseAnnotation>,
    {
        self.inner
            .handlers
            .entry(id.into())
            .or_default()
            .extend(annotations);
        self
    }

    pub fn group<I>(mut self, name: impl Into<String>, annotations: I) -> Self
    where
        I: IntoIterator<Item = ResponseAnnotation>,
    {
        self.inner
            .groups
            .entry(name.into())
            .or_default()
            .extend(annotations);
        self
    }

    pub fn build(self) -> AnnotationRegistry {
        self.inner
    }
}

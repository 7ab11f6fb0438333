use docket_prelude::Operation;
use http::Method;

/// An http operation exposed by the service.
#[derive(Clone, Debug)]
pub struct ApiRoute {
    /// Identifier of the handler serving the route.
    pub id: String,
    /// Group the handler belongs to, sharing its response annotations.
    pub group: Option<String>,
    /// Document the route is published in. Published in every document when `None`.
    pub document: Option<String>,
    pub method: Method,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
}

impl ApiRoute {
    pub fn new(id: impl Into<String>, method: Method, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            group: None,
            document: None,
            method,
            path: path.into(),
            summary: None,
            description: None,
            tags: Vec::new(),
            deprecated: false,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn belongs_to(&self, document: &str) -> bool {
        self.document.as_deref().map_or(true, |name| name == document)
    }

    pub(crate) fn operation(&self) -> Operation {
        Operation {
            operation_id: Some(self.id.clone()),
            summary: self.summary.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            deprecated: self.deprecated,
            responses: None,
        }
    }
}

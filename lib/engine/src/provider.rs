use crate::annotation::AnnotationRegistry;
use crate::merger::ResponseMerger;
use crate::operation::{OperationContext, OperationFilter};
use crate::registry::SchemaRegistry;
use crate::route::ApiRoute;
use docket_prelude::{Document, Info};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown document {name:?}")]
    UnknownDocument { name: String },
    #[error("unable to build operation {method} {path}: {source}")]
    Operation {
        method: String,
        path: String,
        #[source]
        source: crate::operation::Error,
    },
}

/// Builds the documents served by the application.
pub trait DocumentProvider: Send + Sync {
    fn get_document(
        &self,
        name: &str,
        host: Option<&str>,
        base_path: Option<&str>,
    ) -> Result<Document, Error>;
}

impl<P: DocumentProvider + ?Sized> DocumentProvider for Arc<P> {
    fn get_document(
        &self,
        name: &str,
        host: Option<&str>,
        base_path: Option<&str>,
    ) -> Result<Document, Error> {
        (**self).get_document(name, host, base_path)
    }
}

/// Provider assembling a new document, with its own schema registry, on every call.
pub struct Generator {
    documents: BTreeMap<String, Info>,
    routes: Vec<ApiRoute>,
    annotations: AnnotationRegistry,
    filters: Vec<Box<dyn OperationFilter>>,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("documents", &self.documents)
            .field("routes", &self.routes)
            .field("filters", &self.filters.len())
            .finish()
    }
}

impl Generator {
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::default()
    }

    pub fn document_names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }
}

impl DocumentProvider for Generator {
    fn get_document(
        &self,
        name: &str,
        host: Option<&str>,
        base_path: Option<&str>,
    ) -> Result<Document, Error> {
        let info = self.documents.get(name).ok_or_else(|| {
            tracing::debug!("document {name:?} not found");
            Error::UnknownDocument {
                name: name.to_string(),
            }
        })?;
        tracing::debug!("building document {name:?}");

        let schemas = SchemaRegistry::default();
        let mut document = Document::new(info.clone());
        document.host = host.map(String::from);
        document.base_path = base_path.map(String::from);

        for route in self.routes.iter().filter(|route| route.belongs_to(name)) {
            let context = OperationContext {
                route,
                annotations: &self.annotations,
                schemas: &schemas,
            };
            let mut operation = route.operation();
            for filter in self.filters.iter() {
                filter
                    .apply(&mut operation, &context)
                    .map_err(|source| Error::Operation {
                        method: route.method.to_string(),
                        path: route.path.clone(),
                        source,
                    })?;
            }
            document.insert_operation(&route.path, route.method.as_str(), operation);
        }

        document.definitions = schemas.definitions();
        Ok(document)
    }
}

pub struct GeneratorBuilder {
    documents: BTreeMap<String, Info>,
    routes: Vec<ApiRoute>,
    annotations: AnnotationRegistry,
    filters: Vec<Box<dyn OperationFilter>>,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self {
            documents: BTreeMap::new(),
            routes: Vec::new(),
            annotations: AnnotationRegistry::default(),
            filters: vec![Box::new(ResponseMerger)],
        }
    }
}

impl GeneratorBuilder {
    pub fn document(mut self, name: impl Into<String>, info: Info) -> Self {
        self.documents.insert(name.into(), info);
        self
    }

    pub fn route(mut self, route: ApiRoute) -> Self {
        self.routes.push(route);
        self
    }

    pub fn annotations(mut self, annotations: AnnotationRegistry) -> Self {
        self.annotations = annotations;
        self
    }

    /// Adds a filter, applied after the response merger and the filters registered before.
    pub fn filter<F: OperationFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn build(self) -> Generator {
        Generator {
            documents: self.documents,
            routes: self.routes,
            annotations: self.annotations,
            filters: self.filters,
        }
    }
}

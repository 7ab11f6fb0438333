use dashmap::DashMap;
use docket_prelude::SchemaRef;
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::collections::BTreeMap;

const COMPONENTS_PREFIX: &str = "#/components/schemas/";
const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// utoipa generates openapi 3 pointers, documents expect them under `definitions`.
fn rewrite_references(value: &mut JsonValue) {
    match value {
        JsonValue::Object(obj) => {
            if let Some(JsonValue::String(reference)) = obj.get_mut("$ref") {
                if let Some(name) = reference.strip_prefix(COMPONENTS_PREFIX) {
                    *reference = format!("{DEFINITIONS_PREFIX}{name}");
                }
            }
            for (_, item) in obj.iter_mut() {
                rewrite_references(item);
            }
        }
        JsonValue::Array(list) => {
            for item in list.iter_mut() {
                rewrite_references(item);
            }
        }
        _ => {}
    }
}

/// Describes a type that can be used as a response body: its name and its schema,
/// along with the schemas of the types it refers to.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDescriptor {
    name: Cow<'static, str>,
    schema: JsonValue,
    dependencies: Vec<(String, JsonValue)>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>, mut schema: JsonValue) -> Self {
        rewrite_references(&mut schema);
        Self {
            name: name.into(),
            schema,
            dependencies: Vec::new(),
        }
    }

    /// Builds the descriptor of a type deriving [`utoipa::ToSchema`].
    pub fn of<T: utoipa::ToSchema>() -> Result<Self, serde_json::Error> {
        let schema = serde_json::to_value(<T as utoipa::PartialSchema>::schema())?;
        let mut nested = Vec::new();
        T::schemas(&mut nested);
        let mut dependencies = Vec::with_capacity(nested.len());
        for (name, schema) in nested {
            let mut schema = serde_json::to_value(schema)?;
            rewrite_references(&mut schema);
            dependencies.push((name, schema));
        }
        Ok(Self {
            dependencies,
            ..Self::new(T::name(), schema)
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &JsonValue {
        &self.schema
    }
}

/// Definitions collected while building a document.
///
/// The first schema registered under a name is kept, later lookups of the same
/// name only return the reference.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    definitions: DashMap<String, JsonValue>,
}

impl SchemaRegistry {
    fn register(&self, name: &str, schema: &JsonValue) {
        if self.definitions.contains_key(name) {
            return;
        }
        self.definitions
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!("registering schema {name}");
                schema.clone()
            });
    }

    pub fn resolve(&self, descriptor: &TypeDescriptor) -> SchemaRef {
        for (name, schema) in descriptor.dependencies.iter() {
            self.register(name, schema);
        }
        self.register(descriptor.name(), descriptor.schema());
        SchemaRef::definition(descriptor.name())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn definitions(&self) -> BTreeMap<String, JsonValue> {
        self.definitions
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

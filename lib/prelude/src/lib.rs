pub mod catalog;

use std::collections::BTreeMap;

pub const SWAGGER_VERSION: &str = "2.0";

const DEFINITIONS_PREFIX: &str = "#/definitions/";

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Pointer to an entry of the `definitions` section of a document.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct SchemaRef {
    #[serde(rename = "$ref")]
    pub reference: String,
}

impl SchemaRef {
    pub fn definition(name: &str) -> Self {
        Self {
            reference: format!("{DEFINITIONS_PREFIX}{name}"),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.reference.strip_prefix(DEFINITIONS_PREFIX)
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,
}

impl Response {
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            schema: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Keyed by status code. Stays `None` until a response gets written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<BTreeMap<String, Response>>,
}

impl Operation {
    pub fn responses_mut(&mut self) -> &mut BTreeMap<String, Response> {
        self.responses.get_or_insert_with(BTreeMap::new)
    }
}

/// Operations of a single path, keyed by lowercase http verb.
pub type PathItem = BTreeMap<String, Operation>;

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub swagger: String,
    pub info: Info,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub definitions: BTreeMap<String, serde_json::Value>,
}

impl Document {
    pub fn new(info: Info) -> Self {
        Self {
            swagger: SWAGGER_VERSION.to_string(),
            info,
            host: None,
            base_path: None,
            paths: BTreeMap::new(),
            definitions: BTreeMap::new(),
        }
    }

    pub fn operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.paths
            .get(path)
            .and_then(|item| item.get(&method.to_ascii_lowercase()))
    }

    pub fn insert_operation(&mut self, path: &str, method: &str, operation: Operation) {
        self.paths
            .entry(path.to_string())
            .or_default()
            .insert(method.to_ascii_lowercase(), operation);
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, Info, Operation, Response, SchemaRef};

    fn info() -> Info {
        Info {
            title: "Pet store".into(),
            version: "1.0".into(),
            description: None,
        }
    }

    #[test]
    fn should_serialize_schema_ref_as_pointer() {
        let value = serde_json::to_value(SchemaRef::definition("Pet")).unwrap();
        assert_eq!(value, serde_json::json!({ "$ref": "#/definitions/Pet" }));
        assert_eq!(SchemaRef::definition("Pet").name(), Some("Pet"));
    }

    #[test]
    fn should_omit_missing_response_fields() {
        let value = serde_json::to_value(Response::with_description("ok")).unwrap();
        assert_eq!(value, serde_json::json!({ "description": "ok" }));
    }

    #[test]
    fn should_not_serialize_untouched_responses() {
        let value = serde_json::to_value(Operation::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));

        let mut operation = Operation::default();
        operation.responses_mut();
        let value = serde_json::to_value(operation).unwrap();
        assert_eq!(value, serde_json::json!({ "responses": {} }));
    }

    #[test]
    fn should_index_operations_by_lowercase_verb() {
        let mut doc = Document::new(info());
        doc.insert_operation("/pets", "GET", Operation::default());
        assert!(doc.operation("/pets", "get").is_some());
        assert!(doc.operation("/pets", "post").is_none());

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["swagger"], "2.0");
        assert!(value["paths"]["/pets"]["get"].is_object());
        assert!(value.get("basePath").is_none());
    }
}

//! File format describing the routes of a service and the responses they declare.

use crate::Info;
use std::collections::BTreeMap;

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct Catalog {
    #[serde(default)]
    pub documents: BTreeMap<String, Info>,
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
    #[serde(default)]
    pub groups: BTreeMap<String, GroupDefinition>,
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct RouteDefinition {
    /// Identifier of the handler serving the route.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Document publishing the route, every document when missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    pub method: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<ResponseDefinition>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct GroupDefinition {
    #[serde(default)]
    pub responses: Vec<ResponseDefinition>,
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct ResponseDefinition {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyDefinition>,
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct BodyDefinition {
    pub name: String,
    pub schema: serde_json::Value,
}

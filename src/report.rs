//! Render-stage payload: per-root type expressions plus the ordered import
//! set, serialized as the JSON a templating stage consumes.

use indexmap::IndexMap;
use serde::Serialize;

use crate::deps::DependencyRegistry;
use crate::model::{ModelArena, ModelKind};
use crate::options::CollectionType;
use crate::resolve::ResolvedTypes;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetReport {
    pub generated_at: String,
    pub collection_type: CollectionType,
    pub models: Vec<ModelReport>,
    pub imports: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelReport {
    pub name: String,
    #[serde(rename = "type")]
    pub type_expression: String,
    /// Present for object models: property name → resolved type expression,
    /// in document order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, String>>,
}

impl TargetReport {
    pub fn build(
        generated_at: String,
        collection_type: CollectionType,
        arena: &ModelArena,
        resolved: &ResolvedTypes,
        deps: DependencyRegistry,
    ) -> Self {
        let models = arena
            .roots()
            .iter()
            .map(|&root| {
                let node = &arena[root];
                let properties = match &node.kind {
                    ModelKind::Object { properties } => Some(
                        properties
                            .iter()
                            .map(|property| {
                                let ty = resolved
                                    .get(property.model)
                                    .unwrap_or_default()
                                    .to_string();
                                (property.name.clone(), ty)
                            })
                            .collect(),
                    ),
                    _ => None,
                };
                ModelReport {
                    name: node.name.clone(),
                    type_expression: resolved.get(root).unwrap_or_default().to_string(),
                    properties,
                }
            })
            .collect();

        Self {
            generated_at,
            collection_type,
            models,
            imports: deps.into_list(),
        }
    }
}

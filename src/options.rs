//! Generation options threaded through a whole run, immutable once built.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How ordered containers render: native fixed-size arrays (`Item[]`) or
/// generic collections (`List<Item>`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CollectionType {
    #[default]
    Array,
    List,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOptions {
    #[serde(default)]
    pub collection_type: CollectionType,

    /// Target-specific options (naming conventions, nullability policy, ...)
    /// accepted here but consumed by other stages.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl GeneratorOptions {
    pub fn with_collection_type(collection_type: CollectionType) -> Self {
        Self {
            collection_type,
            ..Self::default()
        }
    }
}

//! Serde-facing form of a constrained-model document.
//!
//! This is the shape the upstream constrainer exports: `kind`-tagged nodes,
//! an optional `originalInput` metadata bag, object properties in document
//! order. Interning into the arena lives in the parent module.

use indexmap::IndexMap;
use serde::Deserialize;

use super::{EnumLiteral, OriginalInput};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// A document is either a model set (`{"models": [...]}`) or a single model.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawDocument {
    Set { models: Vec<RawModel> },
    Single(Box<RawModel>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawModel {
    /// Constrained name; already made identifier-safe upstream.
    pub name: String,

    #[serde(default, rename = "originalInput")]
    pub original_input: Option<OriginalInput>,

    #[serde(flatten)]
    pub kind: RawKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RawKind {
    Object {
        #[serde(default)]
        properties: IndexMap<String, RawModel>,
    },
    /// Alias to another named model. `target` is the referenced model's
    /// constrained name; it is linked to a root after the whole document is
    /// interned, and may stay dangling without failing anything.
    Reference { target: String },
    Any,
    Float,
    Integer,
    String,
    Boolean,
    Array {
        item: Box<RawModel>,
    },
    Tuple {
        #[serde(default)]
        items: Vec<RawModel>,
    },
    Enum {
        #[serde(default)]
        values: Vec<RawEnumValue>,
    },
    Union {
        #[serde(default)]
        members: Vec<RawModel>,
    },
    Dictionary {
        key: Box<RawModel>,
        value: Box<RawModel>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEnumValue {
    pub name: String,
    pub value: EnumLiteral,
}

impl RawDocument {
    pub fn into_models(self) -> Vec<RawModel> {
        match self {
            RawDocument::Set { models } => models,
            RawDocument::Single(model) => vec![*model],
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ERRORS
// ————————————————————————————————————————————————————————————————————————————

/// Failures while getting a document off disk and into `RawDocument` form.
/// Everything after this point (resolution itself) is total and cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {message}")]
    Json { path: String, message: String },

    #[error("JSON pointer `{pointer}` selects nothing in {path}")]
    Pointer { path: String, pointer: String },

    #[error("invalid model document in {path}: {message}")]
    Document { path: String, message: String },
}

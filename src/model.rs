//! Arena-backed constrained model tree.
//!
//! Nodes live in a flat `ModelArena` and point at children through `ModelId`
//! handles, so a `Reference` can alias a sibling (including itself, through a
//! mutual cycle of named references) without creating an ownership cycle.
//! The tree is built once from the raw serde form and is read-only afterwards.

pub mod raw;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use ordered_float::OrderedFloat;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use raw::{RawKind, RawModel};

// ————————————————————————————————————————————————————————————————————————————
// NODES
// ————————————————————————————————————————————————————————————————————————————

/// Handle into a [`ModelArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModelId(u32);

impl ModelId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

#[derive(Debug, Clone)]
pub struct ModelNode {
    /// Constrained (identifier-safe) name. Always present.
    pub name: String,
    /// Metadata carried from the source schema, notably `format`.
    pub original_input: Option<OriginalInput>,
    pub kind: ModelKind,
}

/// Closed variant set. Every resolution table must handle all of these;
/// adding a variant breaks each table at compile time.
#[derive(Debug, Clone)]
pub enum ModelKind {
    Object {
        properties: Vec<Property>,
    },
    Reference {
        /// Constrained name of the referenced root model.
        target_name: String,
        /// Linked after interning; stays `None` when dangling. Type text
        /// never consults the target, so a dangling link costs nothing.
        target: Option<ModelId>,
    },
    Any,
    Float,
    Integer,
    String,
    Boolean,
    Array { item: ModelId },
    Tuple { items: Vec<ModelId> },
    Enum { values: Vec<EnumValue> },
    Union { members: Vec<ModelId> },
    Dictionary { key: ModelId, value: ModelId },
}

impl ModelKind {
    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::Object { .. } => "object",
            ModelKind::Reference { .. } => "reference",
            ModelKind::Any => "any",
            ModelKind::Float => "float",
            ModelKind::Integer => "integer",
            ModelKind::String => "string",
            ModelKind::Boolean => "boolean",
            ModelKind::Array { .. } => "array",
            ModelKind::Tuple { .. } => "tuple",
            ModelKind::Enum { .. } => "enum",
            ModelKind::Union { .. } => "union",
            ModelKind::Dictionary { .. } => "dictionary",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Property {
    pub name: String,
    pub model: ModelId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OriginalInput {
    #[serde(default)]
    pub format: Option<String>,

    /// Anything else the source schema carried; accepted, never consumed here.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ModelNode {
    pub fn new(name: impl Into<String>, kind: ModelKind) -> Self {
        Self {
            name: name.into(),
            original_input: None,
            kind,
        }
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.original_input
            .get_or_insert_with(OriginalInput::default)
            .format = Some(format.to_string());
        self
    }

    pub fn format(&self) -> Option<&str> {
        self.original_input.as_ref()?.format.as_deref()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ENUM LITERALS
// ————————————————————————————————————————————————————————————————————————————

/// Literal payload of one enum value, classified once at build time.
/// `Composite` catches object/array (and null) literals wholesale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumLiteral {
    Boolean(bool),
    Number(OrderedFloat<f64>),
    String(String),
    Composite(Value),
}

#[derive(Debug, Clone)]
pub struct EnumValue {
    pub name: String,
    pub value: EnumLiteral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralClass {
    String,
    Number,
    Boolean,
    Composite,
}

impl EnumLiteral {
    pub fn class(&self) -> LiteralClass {
        match self {
            EnumLiteral::String(_) => LiteralClass::String,
            EnumLiteral::Number(_) => LiteralClass::Number,
            EnumLiteral::Boolean(_) => LiteralClass::Boolean,
            EnumLiteral::Composite(_) => LiteralClass::Composite,
        }
    }

    /// True for numeric literals with no fractional component.
    pub fn is_integral(&self) -> bool {
        match self {
            EnumLiteral::Number(n) => n.0.fract() == 0.0,
            _ => false,
        }
    }
}

impl EnumValue {
    pub fn new(name: impl Into<String>, value: EnumLiteral) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ARENA
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Default)]
pub struct ModelArena {
    nodes: Vec<ModelNode>,
    roots: Vec<ModelId>,
}

impl ModelArena {
    pub fn alloc(&mut self, node: ModelNode) -> ModelId {
        let id = ModelId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Total lookup; out-of-range handles (erroneous upstream ids) yield `None`.
    pub fn get(&self, id: ModelId) -> Option<&ModelNode> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ModelId> {
        (0..self.nodes.len() as u32).map(ModelId)
    }

    /// Document-level models, in document order.
    pub fn roots(&self) -> &[ModelId] {
        &self.roots
    }

    pub fn mark_root(&mut self, id: ModelId) {
        self.roots.push(id);
    }
}

impl std::ops::Index<ModelId> for ModelArena {
    type Output = ModelNode;

    fn index(&self, id: ModelId) -> &ModelNode {
        &self.nodes[id.index()]
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNING (raw → arena)
// ————————————————————————————————————————————————————————————————————————————

pub struct InternedDocument {
    pub arena: ModelArena,
    /// Non-fatal diagnostics gathered while interning (bad identifiers,
    /// dangling reference targets). Resolution proceeds regardless.
    pub warnings: Vec<String>,
}

static JAVA_IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

pub fn is_valid_java_identifier(name: &str) -> bool {
    JAVA_IDENT.is_match(name)
}

/// Intern a document's models into a fresh arena, then link `Reference`
/// targets to roots by constrained name. Linking is best-effort: the
/// constrainer upstream owns correctness, this pass only records what it sees.
pub fn intern_document(models: Vec<RawModel>) -> InternedDocument {
    let mut arena = ModelArena::default();
    let mut warnings = Vec::new();
    let mut references = Vec::new();

    for raw in models {
        let id = intern_node(&mut arena, &mut warnings, &mut references, raw);
        arena.mark_root(id);
    }

    let mut by_name = BTreeMap::new();
    for &root in &arena.roots {
        // first root wins on duplicate names
        by_name.entry(arena[root].name.clone()).or_insert(root);
    }

    for id in references {
        let ModelKind::Reference { target_name, .. } = &arena.nodes[id.index()].kind else {
            continue;
        };
        let linked = by_name.get(target_name.as_str()).copied();
        if linked.is_none() {
            warnings.push(format!(
                "reference `{}` targets unknown model `{}`",
                arena[id].name, target_name
            ));
        }
        if let ModelKind::Reference { target, .. } = &mut arena.nodes[id.index()].kind {
            *target = linked;
        }
    }

    InternedDocument { arena, warnings }
}

fn intern_node(
    arena: &mut ModelArena,
    warnings: &mut Vec<String>,
    references: &mut Vec<ModelId>,
    raw: RawModel,
) -> ModelId {
    let RawModel {
        name,
        original_input,
        kind,
    } = raw;

    if !is_valid_java_identifier(&name) {
        warnings.push(format!(
            "model name `{name}` is not a valid Java identifier; emitting as-is"
        ));
    }

    let kind = match kind {
        RawKind::Object { properties } => ModelKind::Object {
            properties: properties
                .into_iter()
                .map(|(prop_name, model)| Property {
                    name: prop_name,
                    model: intern_node(arena, warnings, references, model),
                })
                .collect(),
        },
        RawKind::Reference { target } => ModelKind::Reference {
            target_name: target,
            target: None,
        },
        RawKind::Any => ModelKind::Any,
        RawKind::Float => ModelKind::Float,
        RawKind::Integer => ModelKind::Integer,
        RawKind::String => ModelKind::String,
        RawKind::Boolean => ModelKind::Boolean,
        RawKind::Array { item } => ModelKind::Array {
            item: intern_node(arena, warnings, references, *item),
        },
        RawKind::Tuple { items } => ModelKind::Tuple {
            items: items
                .into_iter()
                .map(|item| intern_node(arena, warnings, references, item))
                .collect(),
        },
        RawKind::Enum { values } => ModelKind::Enum {
            values: values
                .into_iter()
                .map(|v| EnumValue::new(v.name, v.value))
                .collect(),
        },
        RawKind::Union { members } => ModelKind::Union {
            members: members
                .into_iter()
                .map(|member| intern_node(arena, warnings, references, member))
                .collect(),
        },
        RawKind::Dictionary { key, value } => ModelKind::Dictionary {
            key: intern_node(arena, warnings, references, *key),
            value: intern_node(arena, warnings, references, *value),
        },
    };

    let is_reference = matches!(kind, ModelKind::Reference { .. });
    let id = arena.alloc(ModelNode {
        name,
        original_input,
        kind,
    });
    if is_reference {
        references.push(id);
    }
    id
}

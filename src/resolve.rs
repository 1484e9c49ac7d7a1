//! Resolver driver: walks the arena and dispatches each node into a
//! resolution table, recursing only where a rule needs a child's type text.

use crate::deps::DependencyRegistry;
use crate::model::{ModelArena, ModelId, ModelKind};
use crate::options::GeneratorOptions;
use crate::targets::TypeMapping;

/// Bound on composite nesting (array-of-array-of-dictionary, ...). Reference
/// resolution never expands the referenced structure, so no logical cycle can
/// recurse here; the guard only protects against pathological upstream trees.
/// Past it, resolution degrades to the target's top type instead of failing.
pub const MAX_RESOLVE_DEPTH: u32 = 128;

pub struct Resolver<'a> {
    arena: &'a ModelArena,
    mapping: &'a dyn TypeMapping,
    options: &'a GeneratorOptions,
    deps: DependencyRegistry,
    depth: u32,
}

/// Node-id → type-expression mapping, handed to the render stage together
/// with the registry contents.
#[derive(Debug, Clone)]
pub struct ResolvedTypes {
    types: Vec<String>,
}

impl ResolvedTypes {
    pub fn get(&self, id: ModelId) -> Option<&str> {
        self.types.get(id.index()).map(|ty| ty.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModelId, &str)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, ty)| (ModelId::from_index(index), ty.as_str()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<'a> Resolver<'a> {
    pub fn new(
        arena: &'a ModelArena,
        mapping: &'a dyn TypeMapping,
        options: &'a GeneratorOptions,
    ) -> Self {
        Self {
            arena,
            mapping,
            options,
            deps: DependencyRegistry::new(),
            depth: 0,
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        self.options
    }

    pub fn arena(&self) -> &'a ModelArena {
        self.arena
    }

    pub fn register(&mut self, dependency: impl Into<String>) {
        self.deps.register(dependency);
    }

    pub fn deps(&self) -> &DependencyRegistry {
        &self.deps
    }

    pub fn into_deps(self) -> DependencyRegistry {
        self.deps
    }

    /// Resolve one node to its type-expression string. Total: unknown handles
    /// and over-deep nesting come back as the target's top type.
    pub fn resolve(&mut self, id: ModelId) -> String {
        let arena = self.arena;
        let mapping = self.mapping;

        let Some(node) = arena.get(id) else {
            return mapping.top_type().to_string();
        };
        if self.depth >= MAX_RESOLVE_DEPTH {
            return mapping.top_type().to_string();
        }

        self.depth += 1;
        let ty = match &node.kind {
            ModelKind::Object { .. } => mapping.map_object(node, self),
            ModelKind::Reference { .. } => mapping.map_reference(node, self),
            ModelKind::Any => mapping.map_any(node, self),
            ModelKind::Float => mapping.map_float(node, self),
            ModelKind::Integer => mapping.map_integer(node, self),
            ModelKind::String => mapping.map_string(node, self),
            ModelKind::Boolean => mapping.map_boolean(node, self),
            ModelKind::Tuple { items } => mapping.map_tuple(node, items, self),
            ModelKind::Array { item } => mapping.map_array(node, *item, self),
            ModelKind::Enum { values } => mapping.map_enum(node, values, self),
            ModelKind::Union { members } => mapping.map_union(node, members, self),
            ModelKind::Dictionary { key, value } => {
                mapping.map_dictionary(node, *key, *value, self)
            }
        };
        self.depth -= 1;
        ty
    }

    /// Resolve every node in the arena, in handle order.
    pub fn resolve_all(&mut self) -> ResolvedTypes {
        let arena = self.arena;
        let mut types = Vec::with_capacity(arena.len());
        for id in arena.ids() {
            types.push(self.resolve(id));
        }
        ResolvedTypes { types }
    }
}

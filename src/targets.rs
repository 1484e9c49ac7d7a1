//! Per-target type-resolution tables.
//!
//! One implementation per output ecosystem. The trait carries one required
//! method per model variant and no defaults, so adding a `ModelKind` variant
//! refuses to compile until every table says what it does with it.

pub mod java;

use crate::model::{EnumValue, ModelId, ModelNode};
use crate::resolve::Resolver;

/// Every entry is total: any input, however malformed, yields a fallback
/// string. Resolution never blocks code generation; correctness problems in
/// the input belong to the constrainer phase, not here.
pub trait TypeMapping {
    /// The ecosystem's most general representable type, used by the driver
    /// whenever it must degrade (unknown handle, recursion bound).
    fn top_type(&self) -> &'static str;

    fn map_object(&self, node: &ModelNode, r: &mut Resolver<'_>) -> String;
    fn map_reference(&self, node: &ModelNode, r: &mut Resolver<'_>) -> String;
    fn map_any(&self, node: &ModelNode, r: &mut Resolver<'_>) -> String;
    fn map_float(&self, node: &ModelNode, r: &mut Resolver<'_>) -> String;
    fn map_integer(&self, node: &ModelNode, r: &mut Resolver<'_>) -> String;
    fn map_string(&self, node: &ModelNode, r: &mut Resolver<'_>) -> String;
    fn map_boolean(&self, node: &ModelNode, r: &mut Resolver<'_>) -> String;
    fn map_tuple(&self, node: &ModelNode, items: &[ModelId], r: &mut Resolver<'_>) -> String;
    fn map_array(&self, node: &ModelNode, item: ModelId, r: &mut Resolver<'_>) -> String;
    fn map_enum(&self, node: &ModelNode, values: &[EnumValue], r: &mut Resolver<'_>) -> String;
    fn map_union(&self, node: &ModelNode, members: &[ModelId], r: &mut Resolver<'_>) -> String;
    fn map_dictionary(
        &self,
        node: &ModelNode,
        key: ModelId,
        value: ModelId,
        r: &mut Resolver<'_>,
    ) -> String;
}

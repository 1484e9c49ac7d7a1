//! Java resolution table.
//!
//! Objects and references come back as their constrained names (their
//! declarations are emitted elsewhere; nothing is inlined here), scalars map
//! through `format`, containers follow the collection-type switch, and
//! anything the type system cannot express honestly falls back to `Object`.

use crate::model::{EnumValue, LiteralClass, ModelId, ModelNode};
use crate::options::CollectionType;
use crate::resolve::Resolver;
use crate::targets::TypeMapping;

const TOP_TYPE: &str = "Object";

const DEP_LIST: &str = "java.util.List";
const DEP_MAP: &str = "java.util.Map";
const DEP_LOCAL_DATE: &str = "java.time.LocalDate";
const DEP_OFFSET_TIME: &str = "java.time.OffsetTime";
const DEP_OFFSET_DATE_TIME: &str = "java.time.OffsetDateTime";

pub struct JavaTypeMapping;

impl TypeMapping for JavaTypeMapping {
    fn top_type(&self) -> &'static str {
        TOP_TYPE
    }

    // Objects are always emitted as their own named declaration.
    fn map_object(&self, node: &ModelNode, _r: &mut Resolver<'_>) -> String {
        node.name.clone()
    }

    // The alias name assigned during constraining, never the wrapped target:
    // type text stays decoupled from the referenced structure, so a reference
    // chain (or cycle) never re-expands.
    fn map_reference(&self, node: &ModelNode, _r: &mut Resolver<'_>) -> String {
        node.name.clone()
    }

    fn map_any(&self, _node: &ModelNode, _r: &mut Resolver<'_>) -> String {
        TOP_TYPE.to_string()
    }

    fn map_float(&self, node: &ModelNode, _r: &mut Resolver<'_>) -> String {
        match node.format() {
            Some("float") => "float".to_string(),
            _ => "Double".to_string(),
        }
    }

    fn map_integer(&self, node: &ModelNode, _r: &mut Resolver<'_>) -> String {
        match node.format() {
            Some("integer" | "int32") => "int".to_string(),
            Some("long" | "int64") => "long".to_string(),
            _ => "Integer".to_string(),
        }
    }

    fn map_string(&self, node: &ModelNode, r: &mut Resolver<'_>) -> String {
        match node.format() {
            Some("date") => {
                r.register(DEP_LOCAL_DATE);
                DEP_LOCAL_DATE.to_string()
            }
            Some("time") => {
                r.register(DEP_OFFSET_TIME);
                DEP_OFFSET_TIME.to_string()
            }
            Some("dateTime" | "date-time") => {
                r.register(DEP_OFFSET_DATE_TIME);
                DEP_OFFSET_DATE_TIME.to_string()
            }
            Some("binary") => "byte[]".to_string(),
            _ => "String".to_string(),
        }
    }

    fn map_boolean(&self, _node: &ModelNode, _r: &mut Resolver<'_>) -> String {
        "Boolean".to_string()
    }

    // Java has no structural tuples; collapse to a homogeneous container of
    // the top type.
    fn map_tuple(&self, _node: &ModelNode, _items: &[ModelId], r: &mut Resolver<'_>) -> String {
        match r.options().collection_type {
            CollectionType::Array => format!("{TOP_TYPE}[]"),
            CollectionType::List => {
                r.register(DEP_LIST);
                format!("List<{TOP_TYPE}>")
            }
        }
    }

    fn map_array(&self, _node: &ModelNode, item: ModelId, r: &mut Resolver<'_>) -> String {
        let item_type = r.resolve(item);
        match r.options().collection_type {
            CollectionType::Array => format!("{item_type}[]"),
            CollectionType::List => {
                r.register(DEP_LIST);
                format!("List<{item_type}>")
            }
        }
    }

    fn map_enum(&self, node: &ModelNode, values: &[EnumValue], _r: &mut Resolver<'_>) -> String {
        enum_backing_type(node, values).to_string()
    }

    // Java can't express the members; erased wholesale.
    fn map_union(&self, _node: &ModelNode, _members: &[ModelId], _r: &mut Resolver<'_>) -> String {
        TOP_TYPE.to_string()
    }

    fn map_dictionary(
        &self,
        _node: &ModelNode,
        key: ModelId,
        value: ModelId,
        r: &mut Resolver<'_>,
    ) -> String {
        let key_type = r.resolve(key);
        let value_type = r.resolve(value);
        r.register(DEP_MAP);
        format!("Map<{key_type}, {value_type}>")
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ENUM BACKING TYPE
// ————————————————————————————————————————————————————————————————————————————

/// Derive the single backing type for an enum's literal set. Deterministic
/// and order-independent: only the set of literal classes matters.
fn enum_backing_type(node: &ModelNode, values: &[EnumValue]) -> &'static str {
    let Some(class) = uniform_literal_class(values) else {
        // empty or mixed-kind sets widen to the top type
        return TOP_TYPE;
    };
    match class {
        LiteralClass::Composite => TOP_TYPE,
        LiteralClass::String => "String",
        LiteralClass::Boolean => "boolean",
        LiteralClass::Number => numeric_enum_type(node.format(), values),
    }
}

fn uniform_literal_class(values: &[EnumValue]) -> Option<LiteralClass> {
    let mut classes = values.iter().map(|v| v.value.class());
    let first = classes.next()?;
    classes.all(|class| class == first).then_some(first)
}

/// Format wins outright; without one, enum constants favor primitives:
/// all-integral sets back onto `int`, any fractional literal widens to
/// `double`. This intentionally differs from the standalone Float/Integer
/// rules, which default to boxed types.
fn numeric_enum_type(format: Option<&str>, values: &[EnumValue]) -> &'static str {
    match format {
        Some("integer" | "int32") => "int",
        Some("long" | "int64") => "long",
        Some("float") => "float",
        Some("double") => "double",
        _ => {
            if values.iter().all(|v| v.value.is_integral()) {
                "int"
            } else {
                "double"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumLiteral, ModelArena, ModelKind, ModelNode, Property};
    use crate::options::GeneratorOptions;
    use ordered_float::OrderedFloat;
    use serde_json::json;

    fn resolve_one(node: ModelNode) -> String {
        resolve_with(node, GeneratorOptions::default()).0
    }

    fn resolve_with(node: ModelNode, options: GeneratorOptions) -> (String, Vec<String>) {
        let mut arena = ModelArena::default();
        let id = arena.alloc(node);
        let mut r = Resolver::new(&arena, &JavaTypeMapping, &options);
        let ty = r.resolve(id);
        (ty, r.into_deps().into_list())
    }

    fn number(value: f64) -> EnumLiteral {
        EnumLiteral::Number(OrderedFloat(value))
    }

    fn enum_node(values: Vec<EnumLiteral>) -> ModelNode {
        let values = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| EnumValue::new(format!("V{index}"), value))
            .collect();
        ModelNode::new("Kind", ModelKind::Enum { values })
    }

    #[test]
    fn object_resolves_to_its_constrained_name() {
        let node = ModelNode::new("Person", ModelKind::Object { properties: vec![] });
        assert_eq!(resolve_one(node), "Person");
    }

    #[test]
    fn reference_resolves_to_the_alias_name_not_the_target() {
        let node = ModelNode::new(
            "PersonRef",
            ModelKind::Reference {
                target_name: "Person".into(),
                target: None,
            },
        );
        assert_eq!(resolve_one(node), "PersonRef");
    }

    #[test]
    fn any_resolves_to_object() {
        assert_eq!(resolve_one(ModelNode::new("anything", ModelKind::Any)), "Object");
    }

    #[test]
    fn float_defaults_boxed_and_narrows_on_format() {
        assert_eq!(resolve_one(ModelNode::new("ratio", ModelKind::Float)), "Double");
        assert_eq!(
            resolve_one(ModelNode::new("ratio", ModelKind::Float).with_format("float")),
            "float"
        );
        // unrecognized formats are silently ignored
        assert_eq!(
            resolve_one(ModelNode::new("ratio", ModelKind::Float).with_format("decimal128")),
            "Double"
        );
    }

    #[test]
    fn integer_formats_select_primitive_widths() {
        let node = |format: Option<&str>| {
            let n = ModelNode::new("count", ModelKind::Integer);
            match format {
                Some(f) => n.with_format(f),
                None => n,
            }
        };
        assert_eq!(resolve_one(node(None)), "Integer");
        assert_eq!(resolve_one(node(Some("integer"))), "int");
        assert_eq!(resolve_one(node(Some("int32"))), "int");
        assert_eq!(resolve_one(node(Some("long"))), "long");
        assert_eq!(resolve_one(node(Some("int64"))), "long");
    }

    #[test]
    fn string_formats_map_to_fixed_tokens() {
        let node = |format: &str| ModelNode::new("value", ModelKind::String).with_format(format);
        assert_eq!(resolve_one(ModelNode::new("value", ModelKind::String)), "String");
        assert_eq!(resolve_one(node("date")), "java.time.LocalDate");
        assert_eq!(resolve_one(node("time")), "java.time.OffsetTime");
        assert_eq!(resolve_one(node("dateTime")), "java.time.OffsetDateTime");
        assert_eq!(resolve_one(node("date-time")), "java.time.OffsetDateTime");
        assert_eq!(resolve_one(node("binary")), "byte[]");
        assert_eq!(resolve_one(node("password")), "String");
    }

    #[test]
    fn temporal_formats_register_their_dependency() {
        let (ty, deps) = resolve_with(
            ModelNode::new("when", ModelKind::String).with_format("date"),
            GeneratorOptions::default(),
        );
        assert_eq!(ty, "java.time.LocalDate");
        assert_eq!(deps, ["java.time.LocalDate"]);
    }

    #[test]
    fn boolean_is_always_boxed() {
        assert_eq!(resolve_one(ModelNode::new("flag", ModelKind::Boolean)), "Boolean");
        assert_eq!(
            resolve_one(ModelNode::new("flag", ModelKind::Boolean).with_format("bit")),
            "Boolean"
        );
    }

    #[test]
    fn tuple_collapses_to_object_container() {
        let tuple = |options| {
            resolve_with(
                ModelNode::new("pair", ModelKind::Tuple { items: vec![] }),
                GeneratorOptions::with_collection_type(options),
            )
        };

        let (ty, deps) = tuple(CollectionType::Array);
        assert_eq!(ty, "Object[]");
        assert!(deps.is_empty());

        let (ty, deps) = tuple(CollectionType::List);
        assert_eq!(ty, "List<Object>");
        assert_eq!(deps, ["java.util.List"]);
    }

    #[test]
    fn array_propagates_the_item_type() {
        let mut arena = ModelArena::default();
        let item = arena.alloc(ModelNode::new("item", ModelKind::String));
        let array = arena.alloc(ModelNode::new("tags", ModelKind::Array { item }));

        let options = GeneratorOptions::default();
        let mut r = Resolver::new(&arena, &JavaTypeMapping, &options);
        assert_eq!(r.resolve(array), "String[]");
        assert!(r.deps().is_empty());

        let options = GeneratorOptions::with_collection_type(CollectionType::List);
        let mut r = Resolver::new(&arena, &JavaTypeMapping, &options);
        assert_eq!(r.resolve(array), "List<String>");
        let deps: Vec<&str> = r.deps().list().collect();
        assert_eq!(deps, ["java.util.List"]);
    }

    #[test]
    fn string_enum_backs_onto_string() {
        let node = enum_node(vec![
            EnumLiteral::String("on".into()),
            EnumLiteral::String("off".into()),
        ]);
        assert_eq!(resolve_one(node), "String");
    }

    #[test]
    fn boolean_enum_backs_onto_primitive_boolean() {
        let node = enum_node(vec![EnumLiteral::Boolean(true), EnumLiteral::Boolean(false)]);
        assert_eq!(resolve_one(node), "boolean");
    }

    #[test]
    fn integral_enum_without_format_backs_onto_int() {
        let node = enum_node(vec![number(1.0), number(2.0), number(123.0)]);
        assert_eq!(resolve_one(node), "int");
    }

    #[test]
    fn numeric_enum_formats_win_outright() {
        let float_enum = enum_node(vec![number(12.0)]).with_format("float");
        assert_eq!(resolve_one(float_enum), "float");

        let double_enum = enum_node(vec![number(12.0)]).with_format("double");
        assert_eq!(resolve_one(double_enum), "double");

        // 64-bit regardless of magnitude
        let long_enum = enum_node(vec![number(123.0), number(7.0)]).with_format("long");
        assert_eq!(resolve_one(long_enum), "long");

        let int64_enum = enum_node(vec![number(5.0)]).with_format("int64");
        assert_eq!(resolve_one(int64_enum), "long");
    }

    #[test]
    fn mixed_integral_and_fractional_numbers_widen_to_double() {
        let node = enum_node(vec![number(123.0), number(123.12)]);
        assert_eq!(resolve_one(node), "double");
    }

    #[test]
    fn heterogeneous_enum_widens_to_object() {
        let node = enum_node(vec![
            EnumLiteral::String("text".into()),
            EnumLiteral::Boolean(true),
        ]);
        assert_eq!(resolve_one(node), "Object");
    }

    #[test]
    fn composite_enum_values_widen_to_object() {
        let node = enum_node(vec![EnumLiteral::Composite(json!({ "a": 1 }))]);
        assert_eq!(resolve_one(node), "Object");

        // composite poisons otherwise-uniform sets too
        let node = enum_node(vec![
            EnumLiteral::String("text".into()),
            EnumLiteral::Composite(json!([1, 2])),
        ]);
        assert_eq!(resolve_one(node), "Object");
    }

    #[test]
    fn empty_enum_widens_to_object() {
        assert_eq!(resolve_one(enum_node(vec![])), "Object");
    }

    #[test]
    fn union_erases_to_object_regardless_of_members() {
        let empty = ModelNode::new("either", ModelKind::Union { members: vec![] });
        assert_eq!(resolve_one(empty), "Object");

        let mut arena = ModelArena::default();
        let a = arena.alloc(ModelNode::new("a", ModelKind::String));
        let b = arena.alloc(ModelNode::new("b", ModelKind::Integer));
        let union = arena.alloc(ModelNode::new(
            "either",
            ModelKind::Union { members: vec![a, b] },
        ));
        let options = GeneratorOptions::default();
        let mut r = Resolver::new(&arena, &JavaTypeMapping, &options);
        assert_eq!(r.resolve(union), "Object");
    }

    #[test]
    fn dictionary_composes_key_and_value_types() {
        let mut arena = ModelArena::default();
        let key = arena.alloc(ModelNode::new("key", ModelKind::String));
        let string_value = arena.alloc(ModelNode::new("value", ModelKind::String));
        let integer_value = arena.alloc(ModelNode::new("value", ModelKind::Integer));
        let by_name = arena.alloc(ModelNode::new(
            "byName",
            ModelKind::Dictionary {
                key,
                value: string_value,
            },
        ));
        let counts = arena.alloc(ModelNode::new(
            "counts",
            ModelKind::Dictionary {
                key,
                value: integer_value,
            },
        ));

        let options = GeneratorOptions::default();
        let mut r = Resolver::new(&arena, &JavaTypeMapping, &options);
        assert_eq!(r.resolve(by_name), "Map<String, String>");
        assert_eq!(r.resolve(counts), "Map<String, Integer>");
        let deps: Vec<&str> = r.deps().list().collect();
        assert_eq!(deps, ["java.util.Map"]);
    }

    #[test]
    fn string_array_as_list_registers_exactly_one_dependency() {
        let mut arena = ModelArena::default();
        let item = arena.alloc(ModelNode::new("item", ModelKind::String));
        let array = arena.alloc(ModelNode::new("names", ModelKind::Array { item }));

        let options = GeneratorOptions::with_collection_type(CollectionType::List);
        let mut r = Resolver::new(&arena, &JavaTypeMapping, &options);
        assert_eq!(r.resolve(array), "List<String>");

        let deps = r.into_deps().into_list();
        assert_eq!(deps, ["java.util.List"]);
    }

    #[test]
    fn nested_containers_compose() {
        let mut arena = ModelArena::default();
        let leaf = arena.alloc(ModelNode::new("leaf", ModelKind::Integer).with_format("int64"));
        let inner = arena.alloc(ModelNode::new("inner", ModelKind::Array { item: leaf }));
        let key = arena.alloc(ModelNode::new("key", ModelKind::String));
        let dict = arena.alloc(ModelNode::new(
            "index",
            ModelKind::Dictionary { key, value: inner },
        ));

        let options = GeneratorOptions::with_collection_type(CollectionType::List);
        let mut r = Resolver::new(&arena, &JavaTypeMapping, &options);
        assert_eq!(r.resolve(dict), "Map<String, List<long>>");
        let deps: Vec<&str> = r.deps().list().collect();
        assert_eq!(deps, ["java.util.List", "java.util.Map"]);
    }

    #[test]
    fn object_properties_resolve_independently_of_the_object() {
        let mut arena = ModelArena::default();
        let created = arena.alloc(
            ModelNode::new("created", ModelKind::String).with_format("dateTime"),
        );
        let person = arena.alloc(ModelNode::new(
            "Person",
            ModelKind::Object {
                properties: vec![Property {
                    name: "created".into(),
                    model: created,
                }],
            },
        ));

        let options = GeneratorOptions::default();
        let mut r = Resolver::new(&arena, &JavaTypeMapping, &options);
        assert_eq!(r.resolve(person), "Person");
        // the object rule itself never descends; the property resolves on its own
        assert!(r.deps().is_empty());
        assert_eq!(r.resolve(created), "java.time.OffsetDateTime");
        let deps: Vec<&str> = r.deps().list().collect();
        assert_eq!(deps, ["java.time.OffsetDateTime"]);
    }
}

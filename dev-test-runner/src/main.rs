//! End-to-end fixture runner: feed realistic constrained-model documents
//! through the whole pipeline (raw → arena → Java resolution → report) under
//! both collection styles and check the emitted type text and imports.

use colored::Colorize;
use modelgen::model::intern_document;
use modelgen::model::raw::RawDocument;
use modelgen::options::{CollectionType, GeneratorOptions};
use modelgen::report::TargetReport;
use modelgen::resolve::Resolver;
use modelgen::targets::java::JavaTypeMapping;
use serde_json::json;

/// An order-service model set the way a constrainer would export it: scalar
/// formats, nested containers, a self-referential reference, enums of every
/// literal shape, and a union that Java erases.
fn realistic_document() -> serde_json::Value {
    json!({
        "models": [
            {
                "kind": "object",
                "name": "Order",
                "properties": {
                    "id": { "kind": "string", "name": "id" },
                    "placedAt": {
                        "kind": "string", "name": "placedAt",
                        "originalInput": { "format": "date-time" }
                    },
                    "quantity": {
                        "kind": "integer", "name": "quantity",
                        "originalInput": { "format": "int32" }
                    },
                    "total": { "kind": "float", "name": "total" },
                    "tags": {
                        "kind": "array", "name": "tags",
                        "item": { "kind": "string", "name": "tag" }
                    },
                    "attributes": {
                        "kind": "dictionary", "name": "attributes",
                        "key": { "kind": "string", "name": "key" },
                        "value": { "kind": "string", "name": "value" }
                    },
                    "status": {
                        "kind": "reference", "name": "OrderStatus",
                        "target": "OrderStatus"
                    },
                    "parent": {
                        "kind": "reference", "name": "Order",
                        "target": "Order"
                    },
                    "payload": {
                        "kind": "union", "name": "payload",
                        "members": [
                            { "kind": "string", "name": "note" },
                            { "kind": "integer", "name": "code" }
                        ]
                    },
                    "window": {
                        "kind": "tuple", "name": "window",
                        "items": [
                            { "kind": "string", "name": "from" },
                            { "kind": "string", "name": "to" }
                        ]
                    }
                }
            },
            {
                "kind": "enum",
                "name": "OrderStatus",
                "values": [
                    { "name": "Placed", "value": "placed" },
                    { "name": "Shipped", "value": "shipped" }
                ]
            },
            {
                "kind": "enum",
                "name": "RetryLimit",
                "values": [
                    { "name": "Low", "value": 3 },
                    { "name": "High", "value": 10 }
                ]
            }
        ]
    })
}

fn resolve_report(collection_type: CollectionType) -> TargetReport {
    let raw: RawDocument = serde_json::from_value(realistic_document())
        .expect("fixture document must parse");
    let doc = intern_document(raw.into_models());
    assert!(doc.warnings.is_empty(), "fixture warnings: {:?}", doc.warnings);

    let options = GeneratorOptions::with_collection_type(collection_type);
    let mut resolver = Resolver::new(&doc.arena, &JavaTypeMapping, &options);
    let resolved = resolver.resolve_all();
    let deps = resolver.into_deps();
    TargetReport::build(
        "dev-test-runner".into(),
        collection_type,
        &doc.arena,
        &resolved,
        deps,
    )
}

struct Harness {
    failures: u32,
}

impl Harness {
    fn check(&mut self, name: &str, actual: &str, expected: &str) {
        if actual == expected {
            eprintln!("{} {name}", "✅".green());
        } else {
            eprintln!(
                "{} {name}: expected `{expected}`, got `{actual}`",
                "❌".red()
            );
            self.failures += 1;
        }
    }
}

fn main() {
    let mut harness = Harness { failures: 0 };

    let list = resolve_report(CollectionType::List);
    let order = &list.models[0];
    let properties = order.properties.as_ref().expect("Order is an object");

    harness.check("object name", &order.name, "Order");
    harness.check("object type", &order.type_expression, "Order");
    harness.check("plain string", &properties["id"], "String");
    harness.check("date-time format", &properties["placedAt"], "java.time.OffsetDateTime");
    harness.check("int32 format", &properties["quantity"], "int");
    harness.check("float default", &properties["total"], "Double");
    harness.check("array as list", &properties["tags"], "List<String>");
    harness.check("dictionary", &properties["attributes"], "Map<String, String>");
    harness.check("reference alias", &properties["status"], "OrderStatus");
    harness.check("self reference", &properties["parent"], "Order");
    harness.check("union erasure", &properties["payload"], "Object");
    harness.check("tuple as list", &properties["window"], "List<Object>");
    harness.check("string enum", &list.models[1].type_expression, "String");
    harness.check("integral enum", &list.models[2].type_expression, "int");
    harness.check(
        "imports",
        &list.imports.join(", "),
        "java.time.OffsetDateTime, java.util.List, java.util.Map",
    );

    let array = resolve_report(CollectionType::Array);
    let properties = array.models[0].properties.as_ref().expect("Order is an object");
    harness.check("array as native array", &properties["tags"], "String[]");
    harness.check("tuple as native array", &properties["window"], "Object[]");
    harness.check(
        "imports without collections",
        &array.imports.join(", "),
        "java.time.OffsetDateTime, java.util.Map",
    );

    if harness.failures > 0 {
        eprintln!("{} {} check(s) failed", "❌".red(), harness.failures);
        std::process::exit(1);
    }
    eprintln!("{} all checks passed", "✅".green());
}

//! Tests for the node type registry

use super::fields::FieldKind;
use super::registry::NodeRegistry;

#[test]
fn registry_holds_all_pipeline_types() {
    let registry = NodeRegistry::global();
    let ids: Vec<&str> = registry.definitions().iter().map(|d| d.type_id).collect();

    assert_eq!(
        ids,
        [
            "InputNode",
            "TextNode",
            "LLMNode",
            "OutputNode",
            "MathNode",
            "PromptNode",
            "ImageNode",
            "FilterNode",
            "LoggerNode",
            "TranslationNode",
        ]
    );
}

#[test]
fn lookup_returns_registered_definition() {
    let definition = NodeRegistry::global().lookup("MathNode").unwrap();

    assert_eq!(definition.label, "Math Operation");
    assert_eq!(definition.inputs, ["value1", "value2"]);
    assert_eq!(definition.outputs, ["result"]);
}

#[test]
fn lookup_misses_unregistered_type() {
    assert!(NodeRegistry::global().lookup("CustomNode").is_none());
}

#[test]
fn filter_node_has_two_outputs() {
    let definition = NodeRegistry::global().lookup("FilterNode").unwrap();
    assert_eq!(definition.outputs, ["filtered", "rejected"]);
}

#[test]
fn source_and_sink_types_have_one_sided_ports() {
    let registry = NodeRegistry::global();

    let input = registry.lookup("InputNode").unwrap();
    assert!(input.inputs.is_empty());
    assert_eq!(input.outputs, ["output"]);

    let output = registry.lookup("OutputNode").unwrap();
    assert_eq!(output.inputs, ["input"]);
    assert!(output.outputs.is_empty());
}

#[test]
fn math_operations_cover_the_full_set() {
    let definition = NodeRegistry::global().lookup("MathNode").unwrap();
    let FieldKind::Select(options) = definition.fields[0].kind else {
        panic!("operation field should be a select");
    };

    let keys: Vec<&str> = options.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        keys,
        ["add", "subtract", "multiply", "divide", "power", "sqrt", "log", "mod"]
    );
}

#[test]
fn translation_defaults_to_spanish() {
    let definition = NodeRegistry::global().lookup("TranslationNode").unwrap();
    let field = &definition.fields[0];
    assert_eq!(field.key, "targetLanguage");
    assert_eq!(field.default, "es");
}

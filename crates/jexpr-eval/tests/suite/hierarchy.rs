use jexpr_eval::{CompletionKind, ObjectTreeNode, ParseExceptionKind, Settings};
use jexpr_types::{Type, Value};
use pretty_assertions::assert_eq;

use super::fixture::Fixture;

fn settings() -> Settings {
    let top = ObjectTreeNode::new("Top")
        .with_child(ObjectTreeNode::new("Leaf").with_value(Value::Int(5), Type::int()))
        .with_child(ObjectTreeNode::new("Other").with_value(Value::Boolean(true), Type::boolean()));
    Settings::default().with_custom_hierarchy(ObjectTreeNode::root(vec![top]))
}

#[test]
fn node_values_take_part_in_expressions() {
    let fx = Fixture::new();
    let settings = settings();
    let engine = fx.engine(&settings);
    assert_eq!(engine.evaluate("{Top#Leaf}", &fx.this).unwrap().value, Value::Int(5));
    assert_eq!(engine.evaluate("{Top#Leaf} + 1", &fx.this).unwrap().value, Value::Int(6));
    assert_eq!(engine.evaluate("{ Top # Leaf }", &fx.this).unwrap().value, Value::Int(5));
}

#[test]
fn groups_have_no_value() {
    let fx = Fixture::new();
    let settings = settings();
    let err = fx.engine(&settings).evaluate("{Top}", &fx.this).unwrap_err();
    assert_eq!(err.kind, ParseExceptionKind::Semantic);
}

#[test]
fn unknown_nodes_are_reported() {
    let fx = Fixture::new();
    let settings = settings();
    let err = fx.engine(&settings).evaluate("{Top#Missing}", &fx.this).unwrap_err();
    assert_eq!(err.kind, ParseExceptionKind::Semantic);
    assert_eq!(err.position, 5);
}

#[test]
fn children_are_completed() {
    let fx = Fixture::new();
    let settings = settings();
    let completions = fx.engine(&settings).completions("{Top#Lea", 8, &fx.this).unwrap();
    let names: Vec<&str> = completions.iter().map(|c| c.text_to_insert.as_str()).collect();
    assert_eq!(names, ["Leaf"]);
    assert_eq!(completions[0].kind, CompletionKind::ObjectTreeNode);
}

#[test]
fn without_a_hierarchy_braces_are_rejected() {
    let fx = Fixture::new();
    let settings = Settings::default();
    assert!(fx.engine(&settings).evaluate("{Top#Leaf}", &fx.this).is_err());
}

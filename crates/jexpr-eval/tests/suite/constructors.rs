use jexpr_eval::{ParseExceptionKind, Settings};
use jexpr_types::Value;
use pretty_assertions::assert_eq;

use super::fixture::{Fixture, FIXTURE};

#[test]
fn sized_arrays_are_default_initialized() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let info = fx.engine(&settings).evaluate("new int[3]", &fx.this).unwrap();
    let array = info.value.as_array().expect("an array");
    assert_eq!(array.elements(), vec![Value::Int(0); 3]);
}

#[test]
fn nested_dimensions_allocate_inner_arrays() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let engine = fx.engine(&settings);

    let matrix = engine.evaluate("new int[2][3]", &fx.this).unwrap();
    let rows = matrix.value.as_array().expect("an array").elements();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.as_array().expect("a row").len(), 3);
    }

    let unsized_inner = engine.evaluate("new String[2][]", &fx.this).unwrap();
    let elements = unsized_inner.value.as_array().expect("an array").elements();
    assert_eq!(elements, vec![Value::Null, Value::Null]);
}

#[test]
fn initializers_can_be_indexed() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let engine = fx.engine(&settings);
    let element = engine.evaluate("new int[]{1, 2, 3}[1]", &fx.this).unwrap();
    assert_eq!(element.value, Value::Int(2));
    let nested = engine.evaluate("new int[][]{{1}, {2, 3,}}[1][1]", &fx.this).unwrap();
    assert_eq!(nested.value, Value::Int(3));
}

#[test]
fn negative_size_throws() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let err = fx.engine(&settings).evaluate("new int[-1]", &fx.this).unwrap_err();
    assert_eq!(err.kind, ParseExceptionKind::Evaluation);
    assert_eq!(
        err.cause.map(|thrown| thrown.class_name),
        Some("java.lang.NegativeArraySizeException".to_owned())
    );
}

#[test]
fn array_size_must_be_integral() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let err = fx.engine(&settings).evaluate("new int[1.5]", &fx.this).unwrap_err();
    assert_eq!(err.kind, ParseExceptionKind::Semantic);
}

#[test]
fn constructors_are_resolved_and_invoked() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let engine = fx.engine(&settings);

    let created = engine.evaluate("new Fixture(5)", &fx.this).unwrap();
    assert_eq!(created.declared_type, fx.class_type(FIXTURE));
    let value = engine.evaluate("new Fixture(5).value", &fx.this).unwrap();
    assert_eq!(value.value, Value::Int(5));
    let default = engine.evaluate("new Fixture().value", &fx.this).unwrap();
    assert_eq!(default.value, Value::Int(0));
}

#[test]
fn interfaces_cannot_be_instantiated() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let engine = fx.engine(&settings);
    let err = engine.evaluate("new java.util.List()", &fx.this).unwrap_err();
    assert_eq!(err.kind, ParseExceptionKind::Semantic);

    let list = engine.evaluate("new java.util.ArrayList()", &fx.this).unwrap();
    assert!(list.value.as_object().is_some());
}

#[test]
fn constructor_arguments_must_match() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let err = fx
        .engine(&settings)
        .evaluate("new Fixture(\"five\")", &fx.this)
        .unwrap_err();
    assert_eq!(err.kind, ParseExceptionKind::Semantic);
}

#[test]
fn imports_make_simple_names_resolvable() {
    let fx = Fixture::new();
    let without = Settings::default();
    assert!(fx.engine(&without).evaluate("new HashSet()", &fx.this).is_err());

    let by_package = Settings::default().with_imported_package("java.util");
    let set = fx.engine(&by_package).evaluate("new HashSet()", &fx.this).unwrap();
    assert!(set.value.as_object().is_some());

    let by_class = Settings::default().with_imported_class("java.util.ArrayList");
    let engine = fx.engine(&by_class);
    assert!(engine.evaluate("new ArrayList()", &fx.this).is_ok());
    assert!(engine.evaluate("new HashSet()", &fx.this).is_err());
}

#[test]
fn sized_arrays_continue_into_a_member_tail() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let engine = fx.engine(&settings);
    let length = engine.evaluate("new int[2].length", &fx.this).unwrap();
    assert_eq!(length.value, Value::Int(2));
    let rows = engine.evaluate("new int[4][3].length + 1", &fx.this).unwrap();
    assert_eq!(rows.value, Value::Int(5));
}

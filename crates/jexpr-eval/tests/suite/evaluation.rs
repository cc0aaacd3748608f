use jexpr_eval::{ParseExceptionKind, Settings, Variable};
use jexpr_types::{PrimitiveType, Type, Value};
use pretty_assertions::assert_eq;

use super::fixture::Fixture;

fn evaluate(fx: &Fixture, settings: &Settings, text: &str) -> Value {
    fx.engine(settings)
        .evaluate(text, &fx.this)
        .unwrap_or_else(|err| panic!("{text}: {err}"))
        .value
}

#[test]
fn nothing_runs_when_a_later_argument_is_broken() {
    let fx = Fixture::new();
    let settings = Settings::default();
    assert!(fx.engine(&settings).evaluate("f(g(), s)", &fx.this).is_err());
    assert_eq!(fx.counter(), 0);
}

#[test]
fn nothing_runs_when_no_overload_accepts_the_arguments() {
    let fx = Fixture::new();
    let settings = Settings::default().with_variable(Variable::new(
        "s",
        fx.store.string_type(),
        Value::string("text"),
    ));
    let err = fx
        .engine(&settings)
        .evaluate("pick(g(), s)", &fx.this)
        .unwrap_err();
    assert_eq!(err.kind, ParseExceptionKind::Semantic);
    assert_eq!(fx.counter(), 0);

    assert_eq!(evaluate(&fx, &settings, "pick(g(), 1.5f)"), Value::Int(1));
    assert_eq!(fx.counter(), 1);
}

#[test]
fn a_call_is_not_mistaken_for_a_field_or_variable_of_the_same_name() {
    let fx = Fixture::new();
    let settings = Settings::default();
    assert_eq!(evaluate(&fx, &settings, "size"), Value::Int(0));
    assert_eq!(evaluate(&fx, &settings, "size()"), Value::Int(99));
    assert_eq!(evaluate(&fx, &settings, "this.size()"), Value::Int(99));
    assert_eq!(evaluate(&fx, &settings, "new Fixture().size() + size"), Value::Int(99));

    let with_x = Settings::default()
        .with_variable(Variable::new("x", Type::int(), Value::Int(3)))
        .with_variable(Variable::new("size", Type::int(), Value::Int(5)));
    assert_eq!(evaluate(&fx, &with_x, "x()"), Value::Int(6));
    assert_eq!(evaluate(&fx, &with_x, "x() + x"), Value::Int(9));
    assert_eq!(evaluate(&fx, &with_x, "size() + this.size()"), Value::Int(198));
}

#[test]
fn short_circuit_skips_the_right_operand() {
    let fx = Fixture::new();
    let settings = Settings::default();
    assert_eq!(
        evaluate(&fx, &settings, "reset().getCounter(FALSE() && TRUE())"),
        Value::Int(1)
    );
    assert_eq!(
        evaluate(&fx, &settings, "reset().getCounter(TRUE() && TRUE())"),
        Value::Int(2)
    );
    assert_eq!(
        evaluate(&fx, &settings, "reset().getCounter(TRUE() || FALSE())"),
        Value::Int(1)
    );
}

#[test]
fn each_call_runs_once() {
    let fx = Fixture::new();
    let settings = Settings::default();
    assert_eq!(
        evaluate(&fx, &settings, "f(getInt(), \"Test2\")"),
        Value::string("f7")
    );
    assert_eq!(fx.counter(), 1);
}

#[test]
fn dynamic_typing_looks_at_runtime_classes() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let set = evaluate(&fx, &settings, "new java.util.HashSet()");
    let collection = fx.store.class_id("java.util.Collection").unwrap();
    let collection_of_integer =
        Type::class(collection, vec![fx.store.boxed_type(PrimitiveType::Int)]);
    let with_collection = Settings::default().with_variable(Variable::new(
        "collection",
        collection_of_integer,
        set,
    ));

    let err = fx
        .engine(&with_collection)
        .evaluate("testSetInt(collection)", &fx.this)
        .unwrap_err();
    assert_eq!(err.kind, ParseExceptionKind::Semantic);

    let dynamic = with_collection.with_dynamic_typing(true);
    assert_eq!(
        evaluate(&fx, &dynamic, "testSetInt(collection)"),
        Value::Int(1)
    );
}

#[test]
fn variables_can_be_assigned() {
    let fx = Fixture::new();
    let settings = Settings::default()
        .with_variable(Variable::new("x", Type::int(), Value::Int(3)))
        .with_variable(Variable::new("limit", Type::int(), Value::Int(10)).make_final());
    let x = || settings.variable("x").unwrap().value();

    assert_eq!(evaluate(&fx, &settings, "x + limit"), Value::Int(13));
    assert_eq!(evaluate(&fx, &settings, "x += 2"), Value::Int(5));
    assert_eq!(x(), Value::Int(5));
    assert_eq!(evaluate(&fx, &settings, "x = 1"), Value::Int(1));
    assert_eq!(x(), Value::Int(1));

    let err = fx.engine(&settings).evaluate("limit = 1", &fx.this).unwrap_err();
    assert_eq!(err.kind, ParseExceptionKind::Semantic);
    assert_eq!(
        settings.variable("limit").unwrap().value(),
        Value::Int(10)
    );
}

#[test]
fn fields_of_this_can_be_assigned() {
    let fx = Fixture::new();
    let settings = Settings::default();
    assert_eq!(evaluate(&fx, &settings, "value = 4"), Value::Int(4));
    assert_eq!(evaluate(&fx, &settings, "value * 2"), Value::Int(8));
}

#[test]
fn variable_shadowing_a_field_is_ambiguous() {
    let fx = Fixture::new();
    let settings =
        Settings::default().with_variable(Variable::new("value", Type::int(), Value::Int(1)));
    let err = fx.engine(&settings).evaluate("value", &fx.this).unwrap_err();
    assert_eq!(err.kind, ParseExceptionKind::Ambiguous);
}

#[test]
fn boxing_in_different_positions_is_ambiguous() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let err = fx.engine(&settings).evaluate("m(1, 1)", &fx.this).unwrap_err();
    assert_eq!(err.kind, ParseExceptionKind::Ambiguous);
}

#[test]
fn static_members_and_varargs() {
    let fx = Fixture::new();
    let settings = Settings::default();
    assert_eq!(evaluate(&fx, &settings, "twice(3)"), Value::Int(6));
    assert_eq!(evaluate(&fx, &settings, "sum(1, 2, 3)"), Value::Int(6));
    assert_eq!(evaluate(&fx, &settings, "sum()"), Value::Int(0));
    assert_eq!(evaluate(&fx, &settings, "Fixture.CONSTANT"), Value::Int(42));
    assert_eq!(
        evaluate(&fx, &settings, "Fixture.Inner.NAME"),
        Value::string("inner")
    );
}

#[test]
fn class_literals() {
    let fx = Fixture::new();
    let settings = Settings::default();
    assert_eq!(
        evaluate(&fx, &settings, "String.class"),
        Value::Class(fx.store.string_type())
    );
}

#[test]
fn library_methods_are_invoked() {
    let fx = Fixture::new();
    let settings = Settings::default();
    assert_eq!(
        evaluate(&fx, &settings, "Integer.parseInt(\"12\") + 1"),
        Value::Int(13)
    );
    assert_eq!(
        evaluate(&fx, &settings, "String.valueOf(Integer.MAX_VALUE)"),
        Value::string("2147483647")
    );
}

#[test]
fn trailing_text_is_rejected() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let err = fx.engine(&settings).evaluate("1 2", &fx.this).unwrap_err();
    assert_eq!(err.kind, ParseExceptionKind::Syntax);
}

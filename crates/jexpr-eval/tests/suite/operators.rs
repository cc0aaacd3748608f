use jexpr_eval::{ParseExceptionKind, Settings};
use jexpr_types::Value;
use pretty_assertions::assert_eq;

use super::fixture::Fixture;

fn evaluate(text: &str) -> Value {
    let fx = Fixture::new();
    let settings = Settings::default();
    fx.engine(&settings)
        .evaluate(text, &fx.this)
        .unwrap_or_else(|err| panic!("{text}: {err}"))
        .value
}

#[test]
fn precedence_and_grouping() {
    assert_eq!(evaluate("1 + 2 * 3"), Value::Int(7));
    assert_eq!(evaluate("(1 + 2) * 3"), Value::Int(9));
    assert_eq!(evaluate("10 - 4 - 3"), Value::Int(3));
    assert_eq!(evaluate("1 < 2 == true"), Value::Boolean(true));
}

#[test]
fn integer_arithmetic_follows_java() {
    assert_eq!(evaluate("-7 % 3"), Value::Int(-1));
    assert_eq!(evaluate("-7 / 2"), Value::Int(-3));
    assert_eq!(evaluate("1 << 33"), Value::Int(2));
    assert_eq!(evaluate("-1 >>> 28"), Value::Int(15));
    assert_eq!(evaluate("2147483647 + 1"), Value::Int(i32::MIN));
    assert_eq!(evaluate("1 + 2L"), Value::Long(3));
}

#[test]
fn string_concatenation_formats_numbers() {
    assert_eq!(evaluate("\"x = \" + 1.5"), Value::string("x = 1.5"));
    assert_eq!(evaluate("1 + 2 + \"!\""), Value::string("3!"));
    assert_eq!(evaluate("\"a\" + null"), Value::string("anull"));
}

#[test]
fn division_by_zero_throws() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let err = fx.engine(&settings).evaluate("10 / 0", &fx.this).unwrap_err();
    assert_eq!(err.kind, ParseExceptionKind::Evaluation);
    assert_eq!(
        err.cause.map(|thrown| thrown.class_name),
        Some("java.lang.ArithmeticException".to_owned())
    );
}

#[test]
fn floating_division_by_zero_does_not_throw() {
    assert_eq!(evaluate("1.0 / 0"), Value::Double(f64::INFINITY));
}

#[test]
fn primitive_casts_narrow() {
    assert_eq!(evaluate("(byte) 300"), Value::Byte(44));
    assert_eq!(evaluate("(int) 3.9"), Value::Int(3));
    assert_eq!(evaluate("(char) 65"), Value::Char(65));
}

#[test]
fn short_circuit_does_not_evaluate_the_right_operand() {
    assert_eq!(evaluate("true || 1 / 0 == 0"), Value::Boolean(true));
    assert_eq!(evaluate("false && 1 / 0 == 0"), Value::Boolean(false));
}

#[test]
fn conditional_operands_must_be_boolean() {
    let fx = Fixture::new();
    let settings = Settings::default();
    let err = fx.engine(&settings).evaluate("1 && true", &fx.this).unwrap_err();
    assert_eq!(err.kind, ParseExceptionKind::Semantic);
}

#[test]
fn unary_operators() {
    assert_eq!(evaluate("!false"), Value::Boolean(true));
    assert_eq!(evaluate("~5"), Value::Int(-6));
    assert_eq!(evaluate("-(2 + 3)"), Value::Int(-5));
}

#[test]
fn instanceof_checks_runtime_class() {
    assert_eq!(evaluate("\"s\" instanceof String"), Value::Boolean(true));
    assert_eq!(evaluate("null instanceof String"), Value::Boolean(false));
}

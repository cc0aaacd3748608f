use jexpr_eval::{ParseExceptionKind, Settings};
use jexpr_types::Value;
use pretty_assertions::assert_eq;

use super::fixture::Fixture;

fn evaluate(text: &str) -> Result<Value, ParseExceptionKind> {
    let fx = Fixture::new();
    let settings = Settings::default();
    fx.engine(&settings)
        .evaluate(text, &fx.this)
        .map(|info| info.value)
        .map_err(|err| err.kind)
}

#[test]
fn character_literals() {
    assert_eq!(evaluate("'a'"), Ok(Value::Char(97)));
    assert_eq!(evaluate("'\\n'"), Ok(Value::Char(10)));
    assert_eq!(evaluate("'\\''"), Ok(Value::Char(39)));
}

#[test]
fn numeric_literals() {
    assert_eq!(evaluate("1.3e-7"), Ok(Value::Double(1.3e-7)));
    assert_eq!(evaluate("2.5f"), Ok(Value::Float(2.5)));
    assert_eq!(evaluate("123L"), Ok(Value::Long(123)));
    assert_eq!(evaluate("0x1F"), Ok(Value::Int(31)));
    assert_eq!(evaluate("2147483647"), Ok(Value::Int(i32::MAX)));
}

#[test]
fn string_literals_unescape() {
    assert_eq!(evaluate("\"a\\\"b\""), Ok(Value::string("a\"b")));
    assert_eq!(evaluate("\"tab\\there\""), Ok(Value::string("tab\there")));
    assert_eq!(evaluate("\"abc\".length()"), Ok(Value::Int(3)));
}

#[test]
fn keyword_literals() {
    assert_eq!(evaluate("true"), Ok(Value::Boolean(true)));
    assert_eq!(evaluate("null"), Ok(Value::Null));
}

#[test]
fn malformed_literals_are_syntax_errors() {
    for text in ["'ab'", "\"abc", "2147483648", "1.2.3"] {
        assert_eq!(evaluate(text), Err(ParseExceptionKind::Syntax), "{text}");
    }
}

#[test]
fn minimum_values_are_written_with_a_minus() {
    assert_eq!(evaluate("-2147483648"), Ok(Value::Int(i32::MIN)));
    assert_eq!(evaluate("- 2147483648 + 1"), Ok(Value::Int(i32::MIN + 1)));
    assert_eq!(evaluate("-9223372036854775808L"), Ok(Value::Long(i64::MIN)));
    assert_eq!(evaluate("-(2147483648)"), Err(ParseExceptionKind::Syntax));
    assert_eq!(evaluate("-2147483649"), Err(ParseExceptionKind::Syntax));
}

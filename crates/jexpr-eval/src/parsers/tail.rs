//! Postfix chains on objects: `.field`, `.method(...)` and `[index]`.

use jexpr_syntax::TokenStream;
use jexpr_types::{format_type, unary_numeric_promotion, PrimitiveType, Thrown, Type, Value};

use crate::expectation::Expectation;
use crate::object_info::{ObjectInfo, ValueSetter};
use crate::outcome::{ErrorPriority, ParseError, ParseResult, Parsed, TokenResultExt};
use crate::parsers::member::{FieldParser, MemberContext, MethodParser};
use crate::parsers::{expect_object, parse_expression};
use crate::toolbox::{merge, Toolbox};

/// Continues after `info` while a `.` or `[` follows. Each step parses the rest of the chain
/// itself, so the first result returned covers the whole tail.
pub(crate) fn parse_object_tail(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    info: ObjectInfo,
    expectation: &Expectation,
) -> Parsed<ParseResult> {
    match tokens.peek_char() {
        Some('.') => {
            tokens.read_char('.').or_fail(ErrorPriority::RightParser)?;
            let context = MemberContext::Instance {
                target: info,
                implicit: false,
            };
            merge(tb, tokens, &context, expectation, &[&FieldParser, &MethodParser])
        }
        Some('[') => {
            let element = parse_array_index(tb, tokens, info)?;
            parse_object_tail(tb, tokens, element, expectation)
        }
        _ => Ok(ParseResult::Object(info)),
    }
}

fn parse_array_index(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    array: ObjectInfo,
) -> Parsed<ObjectInfo> {
    let open = tokens.read_char('[').or_fail(ErrorPriority::RightParser)?;
    let array_type = tb.lookup_type(&array);
    let Some(component) = array_type.component_type().cloned() else {
        return Err(ParseError::semantic(
            open.begin,
            format!(
                "Array type expected; found {}",
                format_type(tb.store, &array_type)
            ),
            ErrorPriority::PotentiallyRightParser,
        )
        .into());
    };

    let start = tokens.position();
    let index = parse_expression(tb, tokens, &Expectation::object_of(vec![Type::int()]))?;
    let index = expect_object(index, start)?;
    let index_type = tb.lookup_type(&index);
    if unary_numeric_promotion(tb.store, &index_type) != Some(PrimitiveType::Int) {
        return Err(ParseError::semantic(
            start,
            format!(
                "Array index must be an int, found {}",
                format_type(tb.store, &index_type)
            ),
            ErrorPriority::PotentiallyRightParser,
        )
        .into());
    }
    tokens
        .read_char(']')
        .or_fail(ErrorPriority::PotentiallyRightParser)?;

    let (array, index) = match (&array.value, index.value.as_i64()) {
        (Value::Array(array), Some(index)) => (array, index),
        (Value::Null, Some(_)) if tb.evaluates() => {
            return Err(ParseError::evaluation(
                open.begin,
                Thrown::null_pointer("Cannot load from array because the array is null"),
            )
            .into());
        }
        _ => {
            return Ok(ObjectInfo::indeterminate(component).with_setter(ValueSetter::Unevaluated));
        }
    };

    let element = usize::try_from(index)
        .ok()
        .and_then(|idx| array.get(idx).map(|value| (idx, value)));
    let Some((idx, value)) = element else {
        return Err(ParseError::evaluation(
            start,
            Thrown::index_out_of_bounds(index, array.len()),
        )
        .into());
    };
    Ok(ObjectInfo::new(value, component).with_setter(ValueSetter::ArrayElement {
        array: array.clone(),
        index: idx,
    }))
}

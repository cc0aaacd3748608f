//! `new T(...)`, `new T[n]...[]` and `new T[]{...}`.

use jexpr_syntax::TokenStream;
use jexpr_types::{format_type, unary_numeric_promotion, Array, ClassKind, PrimitiveType, Thrown, Type, Value};

use crate::executable::{invoke, ExecutableInfo};
use crate::expectation::Expectation;
use crate::members::constructors;
use crate::object_info::ObjectInfo;
use crate::operators::assignment_value;
use crate::outcome::{token_error, ErrorPriority, Interrupt, ParseError, ParseResult, Parsed, TokenResultExt};
use crate::parsers::arguments::{parse_arguments, resolve};
use crate::parsers::class::parse_type;
use crate::parsers::tail::parse_object_tail;
use crate::parsers::{expect_object, operator_error, parse_expression, Parser};
use crate::toolbox::Toolbox;

pub(crate) struct ConstructorParser;

impl Parser<ObjectInfo> for ConstructorParser {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        _this: &ObjectInfo,
        expectation: &Expectation,
    ) -> Parsed<ParseResult> {
        // The literal parser offers `new` while it is being typed.
        tokens.read_keyword("new").or_fail(ErrorPriority::WrongParser)?;

        let raise = Interrupt::at_least(ErrorPriority::RightParser);
        let type_start = tokens.position();
        let ty = parse_type(tb, tokens, true).map_err(&raise)?;

        match tokens.peek_char() {
            Some('{') if ty.component_type().is_some() => {
                let array = parse_initializer(tb, tokens, &ty).map_err(&raise)?;
                parse_object_tail(tb, tokens, array, expectation).map_err(&raise)
            }
            Some('[') => {
                // Every `[` after the type belongs to the dimensions, so only `.` can follow.
                let array = parse_dimensions(tb, tokens, ty).map_err(&raise)?;
                parse_object_tail(tb, tokens, array, expectation).map_err(&raise)
            }
            Some('(') if ty.class_id().is_some() => {
                let instance = parse_instance_creation(tb, tokens, &ty, type_start).map_err(&raise)?;
                parse_object_tail(tb, tokens, instance, expectation).map_err(&raise)
            }
            _ => Err(ParseError::syntax(
                tokens.position(),
                if ty.component_type().is_some() {
                    "Expected `{` after array type"
                } else if ty.is_primitive() {
                    "Expected `[` after primitive type"
                } else {
                    "Expected `(` or `[` after class name"
                },
                ErrorPriority::RightParser,
            )
            .into()),
        }
    }
}

fn parse_instance_creation(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    ty: &Type,
    position: usize,
) -> Parsed<ObjectInfo> {
    let Some(class) = ty.class_id() else {
        return Err(ParseError::internal(position, "instance creation without a class").into());
    };
    let store = tb.store;
    let name = format_type(store, ty);
    if store
        .class(class)
        .is_some_and(|def| def.kind == ClassKind::Interface)
    {
        return Err(ParseError::semantic(
            position,
            format!("Cannot instantiate the interface {name}"),
            ErrorPriority::RightParser,
        )
        .into());
    }

    let candidates: Vec<ExecutableInfo<'_>> = constructors(store, class, tb.settings.minimum_access)
        .into_iter()
        .flat_map(|ctor| ExecutableInfo::for_constructor(store, ctor))
        .collect();
    if candidates.is_empty() {
        return Err(ParseError::semantic(
            position,
            format!("No accessible constructor of {name}"),
            ErrorPriority::RightParser,
        )
        .into());
    }

    tokens.read_char('(').or_fail(ErrorPriority::RightParser)?;
    let receiver = ObjectInfo::null();
    let arguments = parse_arguments(tb, tokens, &candidates, &receiver)?;
    let constructor = resolve(tb, &candidates, &arguments, &name, position)?;
    invoke(tb, &constructor, &receiver, &arguments, position)
}

/// `[n]` groups followed by empty `[]` groups. `ty` is the element type read before them.
fn parse_dimensions(tb: &Toolbox<'_>, tokens: &mut TokenStream<'_>, ty: Type) -> Parsed<ObjectInfo> {
    let mut sizes: Vec<Option<i64>> = Vec::new();
    let mut size_position = tokens.position();
    while tokens.peek_char() == Some('[') {
        let mut probe = tokens.clone();
        if probe.read_char('[').is_ok() && probe.peek_char() == Some(']') {
            break;
        }
        tokens.read_char('[').or_fail(ErrorPriority::RightParser)?;
        size_position = tokens.position();
        sizes.push(parse_size(tb, tokens, size_position)?);
        tokens.read_char(']').or_fail(ErrorPriority::RightParser)?;
    }

    let mut array_type = ty;
    while tokens.peek_char() == Some('[') {
        tokens.read_char('[').or_fail(ErrorPriority::RightParser)?;
        tokens.read_char(']').or_fail(ErrorPriority::RightParser)?;
        array_type = Type::array(array_type);
    }
    for _ in &sizes {
        array_type = Type::array(array_type);
    }

    let known: Option<Vec<i64>> = sizes.into_iter().collect();
    let Some(known) = known.filter(|_| tb.evaluates()) else {
        return Ok(ObjectInfo::indeterminate(array_type));
    };
    if let Some(negative) = known.iter().find(|size| **size < 0) {
        return Err(ParseError::evaluation(
            size_position,
            Thrown::new("java.lang.NegativeArraySizeException", negative.to_string()),
        )
        .into());
    }
    let value = allocate(&array_type, &known);
    Ok(ObjectInfo::new(value, array_type))
}

/// The size inside one `[...]`, `None` when not computed.
fn parse_size(tb: &Toolbox<'_>, tokens: &mut TokenStream<'_>, position: usize) -> Parsed<Option<i64>> {
    let size = parse_expression(tb, tokens, &Expectation::object_of(vec![Type::int()]))?;
    let size = expect_object(size, position)?;
    let size_type = tb.lookup_type(&size);
    if unary_numeric_promotion(tb.store, &size_type) != Some(PrimitiveType::Int) {
        return Err(ParseError::semantic(
            position,
            format!(
                "Array size must be an int, found {}",
                format_type(tb.store, &size_type)
            ),
            ErrorPriority::RightParser,
        )
        .into());
    }
    Ok(size.value.as_i64())
}

/// Nested arrays for the given sizes; dimensions beyond them stay `null`.
fn allocate(array_type: &Type, sizes: &[i64]) -> Value {
    let (Some((len, rest)), Some(component)) = (sizes.split_first(), array_type.component_type()) else {
        return Value::default_for(array_type);
    };
    let len = usize::try_from(*len).unwrap_or_default();
    let elements = (0..len).map(|_| allocate(component, rest)).collect();
    Value::Array(Array::new(component.clone(), elements))
}

/// `{a, b, ...}` for `array_type`, with nested braces for array components.
fn parse_initializer(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    array_type: &Type,
) -> Parsed<ObjectInfo> {
    let open = tokens.read_char('{').or_fail(ErrorPriority::RightParser)?;
    let Some(component) = array_type.component_type() else {
        return Err(ParseError::semantic(
            open.begin,
            format!(
                "Array initializer for non-array type {}",
                format_type(tb.store, array_type)
            ),
            ErrorPriority::RightParser,
        )
        .into());
    };

    let mut elements: Vec<Value> = Vec::new();
    loop {
        if tokens.peek_char() == Some('}') && !tokens.is_caret_before_next_token() {
            tokens.read_char('}').or_fail(ErrorPriority::RightParser)?;
            break;
        }
        let element = if tokens.peek_char() == Some('{') {
            parse_initializer(tb, tokens, component)?
        } else {
            let start = tokens.position();
            let parsed = parse_expression(tb, tokens, &Expectation::object_of(vec![component.clone()]))?;
            let parsed = expect_object(parsed, start)?;
            let value = assignment_value(tb, component, &parsed)
                .map_err(|err| operator_error(err, start))
                .map_err(Interrupt::at_least(ErrorPriority::RightParser))?;
            ObjectInfo::new(value, component.clone())
        };
        elements.push(element.value);

        match tokens.read_one_of(&[",", "}"]) {
            Ok(token) if token.text == "}" => break,
            Ok(_) => {}
            Err(err) => return Err(token_error(err, ErrorPriority::RightParser)),
        }
    }

    if !tb.evaluates() || elements.iter().any(Value::is_indeterminate) {
        return Ok(ObjectInfo::indeterminate(array_type.clone()));
    }
    let array = Array::new(component.clone(), elements);
    Ok(ObjectInfo::new(Value::Array(array), array_type.clone()))
}

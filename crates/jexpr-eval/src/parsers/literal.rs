use jexpr_syntax::{is_identifier_start, LiteralValue, TokenStream, EXPRESSION_KEYWORDS};
use jexpr_types::{PrimitiveType, Type, Value};

use crate::completion::CompletionKind;
use crate::expectation::Expectation;
use crate::object_info::ObjectInfo;
use crate::outcome::{ErrorPriority, Interrupt, ParseError, ParseResult, Parsed, TokenResultExt};
use crate::parsers::tail::parse_object_tail;
use crate::parsers::{read_identifier_or_complete, Parser};
use crate::rating::AccessMatch;
use crate::toolbox::Toolbox;

/// Keywords offered while typing a name. `new` starts an instance creation.
const COMPLETED_KEYWORDS: [&str; 5] = [
    EXPRESSION_KEYWORDS[0],
    EXPRESSION_KEYWORDS[1],
    EXPRESSION_KEYWORDS[2],
    EXPRESSION_KEYWORDS[3],
    "new",
];

/// Numbers, characters, strings, `true`, `false` and `null`. Also the source of keyword
/// completions, since every keyword shares the identifier position with literals.
pub(crate) struct LiteralParser;

impl Parser<ObjectInfo> for LiteralParser {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        this: &ObjectInfo,
        expectation: &Expectation,
    ) -> Parsed<ParseResult> {
        let Some(first) = tokens.peek_char() else {
            // An empty expression still gets keyword suggestions at the caret.
            return parse_keyword(tb, tokens, this, expectation);
        };

        match first {
            '"' => {
                let (_, text) = tokens
                    .read_string_literal()
                    .or_fail(ErrorPriority::RightParser)?;
                let literal = ObjectInfo::new(Value::string(text), tb.store.string_type());
                parse_object_tail(tb, tokens, literal, expectation)
                    .map_err(Interrupt::at_least(ErrorPriority::PotentiallyRightParser))
            }
            '\'' => {
                let (_, c) = tokens
                    .read_char_literal()
                    .or_fail(ErrorPriority::RightParser)?;
                Ok(ParseResult::Object(ObjectInfo::new(Value::char(c), Type::char())))
            }
            c if c.is_ascii_digit() || (c == '.' && starts_with_fraction(tokens)) => {
                let (token, literal) = tokens
                    .read_numeric_literal()
                    .or_fail(ErrorPriority::RightParser)?;
                numeric(literal, token.begin).map(ParseResult::Object)
            }
            c if is_identifier_start(c) => parse_keyword(tb, tokens, this, expectation),
            _ => Err(ParseError::syntax(
                tokens.position(),
                "Expected a literal",
                ErrorPriority::WrongParser,
            )
            .into()),
        }
    }
}

fn starts_with_fraction(tokens: &TokenStream<'_>) -> bool {
    let rest = tokens.text()[tokens.position()..].trim_start();
    rest.chars().nth(1).is_some_and(|c| c.is_ascii_digit())
}

fn parse_keyword(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    this: &ObjectInfo,
    expectation: &Expectation,
) -> Parsed<ParseResult> {
    let token = read_identifier_or_complete(tokens, expectation, |scope| {
        COMPLETED_KEYWORDS
            .iter()
            .filter_map(|keyword| {
                let ty = match *keyword {
                    "true" | "false" => Some(Type::boolean()),
                    "null" => Some(Type::Null),
                    "this" => Some(tb.lookup_type(this)),
                    _ => None,
                };
                scope.suggest(tb, keyword, ty.as_ref(), AccessMatch::Full, CompletionKind::Keyword)
            })
            .collect()
    })?;

    let value = match token.text {
        "true" => ObjectInfo::new(Value::Boolean(true), Type::boolean()),
        "false" => ObjectInfo::new(Value::Boolean(false), Type::boolean()),
        "null" => ObjectInfo::null(),
        _ => {
            return Err(ParseError::syntax(
                token.begin,
                "Expected a literal",
                ErrorPriority::WrongParser,
            )
            .into())
        }
    };
    Ok(ParseResult::Object(value))
}

pub(crate) fn numeric(literal: LiteralValue, position: usize) -> Parsed<ObjectInfo> {
    let (value, primitive) = match literal {
        LiteralValue::Int(v) => (Value::Int(v), PrimitiveType::Int),
        LiteralValue::Long(v) => (Value::Long(v), PrimitiveType::Long),
        LiteralValue::Float(v) => (Value::Float(v), PrimitiveType::Float),
        LiteralValue::Double(v) => (Value::Double(v), PrimitiveType::Double),
        other => {
            return Err(ParseError::internal(position, format!("{other:?} read as a number")).into())
        }
    };
    Ok(ObjectInfo::new(value, Type::Primitive(primitive)))
}

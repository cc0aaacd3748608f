use jexpr_syntax::TokenStream;
use jexpr_types::{format_type, simple_name_of};

use crate::expectation::Expectation;
use crate::members::fields;
use crate::object_info::ObjectInfo;
use crate::operators::cast;
use crate::outcome::{AmbiguityError, ErrorPriority, Interrupt, ParseError, ParseResult, Parsed, TokenResultExt};
use crate::parsers::class::{parse_type, ClassParser};
use crate::parsers::constructor::ConstructorParser;
use crate::parsers::custom_hierarchy::CustomHierarchyParser;
use crate::parsers::expression::{parse_expression, parse_unary};
use crate::parsers::literal::LiteralParser;
use crate::parsers::member::{FieldParser, MethodParser};
use crate::parsers::package::PackageParser;
use crate::parsers::tail::parse_object_tail;
use crate::parsers::variable::VariableParser;
use crate::parsers::{expect_object, operator_error, Parser};
use crate::toolbox::{merge, Toolbox};

/// Everything that can stand left of a tail: literals, names, parenthesized expressions,
/// casts and instance creation.
pub(crate) fn parse_primary(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    expectation: &Expectation,
) -> Parsed<ParseResult> {
    check_ambiguous_name(tb, tokens)?;
    merge(
        tb,
        tokens,
        tb.this,
        expectation,
        &[
            &LiteralParser,
            &ThisParser,
            &CastParser,
            &ParenthesizedParser,
            &ConstructorParser,
            &CustomHierarchyParser,
            &VariableParser,
            &FieldParser,
            &MethodParser,
            &ClassParser,
            &PackageParser,
        ],
    )
}

/// A bare name that is both a variable and a field of `this` has no single meaning.
fn check_ambiguous_name(tb: &Toolbox<'_>, tokens: &TokenStream<'_>) -> Parsed<()> {
    let mut probe = tokens.clone();
    let Ok(token) = probe.read_identifier() else {
        return Ok(());
    };
    if probe.peek_char() == Some('(') {
        return Ok(());
    }
    let Some(variable) = tb.settings.variable(token.text) else {
        return Ok(());
    };
    let this_type = tb.lookup_type(tb.this);
    let field = fields(tb.store, &this_type, false, tb.settings.minimum_access)
        .into_iter()
        .find(|field| field.def.name == token.text);
    let Some(field) = field else {
        return Ok(());
    };

    let message = format!(
        "Ambiguous name '{}': variable of type {} or field {}.{}",
        token.text,
        format_type(tb.store, variable.declared_type()),
        simple_name_of(tb.store.class_name(field.owner)),
        field.def.name
    );
    tracing::debug!(target: "jexpr.eval", name = token.text, "ambiguous name");
    Err(Interrupt::Ambiguous(AmbiguityError {
        position: token.begin,
        message,
    }))
}

struct ThisParser;

impl Parser<ObjectInfo> for ThisParser {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        this: &ObjectInfo,
        expectation: &Expectation,
    ) -> Parsed<ParseResult> {
        tokens.read_keyword("this").or_fail(ErrorPriority::WrongParser)?;
        let this = ObjectInfo::new(this.value.clone(), this.declared_type.clone());
        parse_object_tail(tb, tokens, this, expectation)
            .map_err(Interrupt::at_least(ErrorPriority::PotentiallyRightParser))
    }
}

/// `(Type) operand`.
struct CastParser;

impl Parser<ObjectInfo> for CastParser {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        _this: &ObjectInfo,
        _expectation: &Expectation,
    ) -> Parsed<ParseResult> {
        let open = tokens.read_char('(').or_fail(ErrorPriority::WrongParser)?;
        let target = parse_type(tb, tokens, true)?;
        tokens.read_char(')').or_fail(ErrorPriority::WrongParser)?;
        // `(a) + b` adds to a parenthesized name unless `a` is a primitive type.
        if !target.is_primitive() && matches!(tokens.peek_char(), Some('+' | '-')) {
            return Err(ParseError::syntax(
                open.begin,
                "Reference casts cannot apply to a signed operand",
                ErrorPriority::WrongParser,
            )
            .into());
        }

        let position = tokens.position();
        let operand = parse_unary(tb, tokens, &Expectation::object())
            .map_err(Interrupt::at_least(ErrorPriority::PotentiallyRightParser))?;
        let operand = expect_object(operand, position)?;
        cast(tb, &target, &operand)
            .map(ParseResult::Object)
            .map_err(|err| operator_error(err, open.begin))
    }
}

struct ParenthesizedParser;

impl Parser<ObjectInfo> for ParenthesizedParser {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        _this: &ObjectInfo,
        expectation: &Expectation,
    ) -> Parsed<ParseResult> {
        let open = tokens.read_char('(').or_fail(ErrorPriority::WrongParser)?;
        let raise = Interrupt::at_least(ErrorPriority::PotentiallyRightParser);
        let inner = parse_expression(tb, tokens, expectation).map_err(&raise)?;
        let inner = expect_object(inner, open.end)?;
        tokens
            .read_char(')')
            .or_fail(ErrorPriority::PotentiallyRightParser)?;
        parse_object_tail(tb, tokens, inner, expectation).map_err(&raise)
    }
}

//! Operator expressions by precedence climbing.
//!
//! Level 0 binds tightest (`* / %`), [`MAX_PRECEDENCE_LEVEL`] is assignment. The right operand
//! of a left-associative operator at level `n` is parsed at level `n - 1`; assignments parse it
//! at their own level, which makes them group to the right.

use jexpr_syntax::{
    BinaryOperator, LiteralValue, TokenError, TokenStream, UnaryOperator, MAX_PRECEDENCE_LEVEL,
};
use jexpr_types::{Type, Value};

use crate::expectation::Expectation;
use crate::object_info::ObjectInfo;
use crate::operators::{
    apply_binary, apply_unary, assignment_value, compound_value, instance_of, short_circuit_value,
};
use crate::outcome::{ErrorPriority, Interrupt, ParseError, ParseResult, Parsed, TokenResultExt};
use crate::parsers::class::parse_type;
use crate::parsers::literal::numeric;
use crate::parsers::primary::parse_primary;
use crate::parsers::{assign, expect_object, operator_error};
use crate::toolbox::{EvaluationMode, Toolbox};

pub(crate) fn parse_expression(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    expectation: &Expectation,
) -> Parsed<ParseResult> {
    parse_level(tb, tokens, MAX_PRECEDENCE_LEVEL, expectation)
}

fn parse_level(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    max_level: u8,
    expectation: &Expectation,
) -> Parsed<ParseResult> {
    let first = parse_unary(tb, tokens, expectation)?;
    parse_operators(tb, tokens, max_level, first, expectation)
}

fn parse_operators(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    max_level: u8,
    first: ParseResult,
    expectation: &Expectation,
) -> Parsed<ParseResult> {
    let mut lhs = first;
    loop {
        let Some(op) = tokens.peek_binary_operator() else {
            return Ok(lhs);
        };
        let level = op.precedence_level();
        if level > max_level {
            return Ok(lhs);
        }

        let (token, op) = tokens
            .read_binary_operator()
            .or_fail(ErrorPriority::PotentiallyRightParser)?;
        let position = token.begin;
        let left = expect_object(lhs, position)?;
        let raise = Interrupt::at_least(ErrorPriority::PotentiallyRightParser);

        let combined = match op {
            BinaryOperator::InstanceOf => {
                let target = parse_type(tb, tokens, true).map_err(&raise)?;
                instance_of(tb, &left, &target).map_err(|err| operator_error(err, position))?
            }
            BinaryOperator::Assign => {
                let target_type = left.static_type(tb.store);
                let right = parse_operand(tb, tokens, op, &Expectation::object_of(vec![target_type.clone()]))
                    .map_err(&raise)?;
                let value = assignment_value(tb, &target_type, &right)
                    .map_err(|err| operator_error(err, position))?;
                assign(tb, &left, value, position)?
            }
            BinaryOperator::CompoundAssign(arithmetic) => {
                let right = parse_operand(tb, tokens, op, &Expectation::object()).map_err(&raise)?;
                let value = compound_value(tb, arithmetic.as_binary(), &left, &right)
                    .map_err(|err| operator_error(err, position))?;
                assign(tb, &left, value, position)?
            }
            op if op.is_short_circuit() => {
                let decided = short_circuit_value(op, &left);
                let rhs_tb = match decided {
                    Some(_) => tb.with_mode(EvaluationMode::WithoutEvaluation),
                    None => *tb,
                };
                let right = parse_operand(&rhs_tb, tokens, op, &Expectation::object_of(vec![Type::boolean()]))
                    .map_err(&raise)?;
                let mut result =
                    apply_binary(tb, op, &left, &right).map_err(|err| operator_error(err, position))?;
                if let Some(value) = decided {
                    result.value = Value::Boolean(value);
                }
                result
            }
            op => {
                let right = parse_operand(tb, tokens, op, &Expectation::object()).map_err(&raise)?;
                apply_binary(tb, op, &left, &right).map_err(|err| operator_error(err, position))?
            }
        };
        lhs = ParseResult::Object(combined);
    }
}

/// The right operand of `op`.
fn parse_operand(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    op: BinaryOperator,
    expectation: &Expectation,
) -> Parsed<ObjectInfo> {
    let start = tokens.position();
    let level = op.precedence_level();
    let result = if op.is_right_associative() {
        parse_level(tb, tokens, level, expectation)?
    } else if level == 0 {
        parse_unary(tb, tokens, expectation)?
    } else {
        parse_level(tb, tokens, level - 1, expectation)?
    };
    expect_object(result, start)
}

/// Prefix operators, then a primary expression with its tail.
pub(crate) fn parse_unary(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    expectation: &Expectation,
) -> Parsed<ParseResult> {
    let starts_with_operator = tokens
        .peek_char()
        .is_some_and(|c| matches!(c, '+' | '-' | '!' | '~'));
    if !starts_with_operator {
        return parse_primary(tb, tokens, expectation);
    }

    let (token, op) = tokens
        .read_unary_operator()
        .or_fail(ErrorPriority::WrongParser)?;
    let position = token.begin;
    if op == UnaryOperator::Minus {
        if let Some(literal) = read_minimum_literal(tokens) {
            return numeric(literal, position).map(ParseResult::Object);
        }
    }
    let operand = parse_unary(tb, tokens, expectation)
        .map_err(Interrupt::at_least(ErrorPriority::PotentiallyRightParser))?;
    let operand = expect_object(operand, position)?;

    let result = apply_unary(tb, op, &operand).map_err(|err| operator_error(err, position))?;
    if matches!(op, UnaryOperator::Increment | UnaryOperator::Decrement) {
        if !operand.is_assignable() {
            return Err(ParseError::semantic(
                position,
                format!("Operator '{}' needs a variable", op.symbol()),
                ErrorPriority::PotentiallyRightParser,
            )
            .into());
        }
        return assign(tb, &operand, result.value, position).map(ParseResult::Object);
    }
    Ok(ParseResult::Object(result))
}

/// `-2147483648` and `-9223372036854775808L`: decimal literals whose magnitude only fits once
/// negated. Anything else is left to the regular operand path.
fn read_minimum_literal(tokens: &mut TokenStream<'_>) -> Option<LiteralValue> {
    if !tokens.peek_char().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut plain = tokens.clone();
    if !matches!(plain.read_numeric_literal(), Err(TokenError::Syntax { .. })) {
        return None;
    }
    let mut negated = tokens.clone();
    let (_, literal) = negated.read_negated_numeric_literal().ok()?;
    *tokens = negated;
    Some(literal)
}

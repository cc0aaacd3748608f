//! Grammar rules. Every parser is a stateless unit struct that borrows what it needs from the
//! [`Toolbox`] and is combined with its alternatives through [`crate::toolbox::merge`].

use jexpr_fuzzy::rate_name;
use jexpr_syntax::{CompletionInfo, Token, TokenError, TokenStream};
use jexpr_types::{Type, TypeMatch, Value};

use crate::completion::{CodeCompletion, CompletionKind, Completions};
use crate::expectation::Expectation;
use crate::object_info::ObjectInfo;
use crate::operators::OperatorError;
use crate::outcome::{token_error, ErrorPriority, Interrupt, ParseError, ParseResult, Parsed};
use crate::rating::{rate_expected_type, AccessMatch, MatchRating};
use crate::toolbox::Toolbox;

mod arguments;
mod class;
mod constructor;
mod custom_hierarchy;
mod expression;
mod literal;
mod member;
mod package;
mod primary;
mod tail;
mod variable;

pub(crate) use expression::parse_expression;

/// One grammar rule applied at the current stream position.
///
/// `C` is what the rule operates on: the `this` object for unqualified names, the object or
/// class left of a `.` for member access.
pub(crate) trait Parser<C: ?Sized> {
    fn parse(
        &self,
        tb: &Toolbox<'_>,
        tokens: &mut TokenStream<'_>,
        context: &C,
        expectation: &Expectation,
    ) -> Parsed<ParseResult>;
}

/// Where a caret was found and what the caller wants there.
pub(crate) struct CompletionScope<'c> {
    pub info: CompletionInfo,
    pub prefix: &'c str,
    pub expectation: &'c Expectation,
}

impl CompletionScope<'_> {
    /// Rates `name` against the typed prefix and, if given, `ty` against the expected types.
    pub fn rate(&self, tb: &Toolbox<'_>, name: &str, ty: Option<&Type>, access: AccessMatch) -> MatchRating {
        let type_match = match ty {
            Some(ty) => rate_expected_type(tb.store, ty, self.expectation),
            None => TypeMatch::Full,
        };
        MatchRating::new(rate_name(self.prefix, name), type_match, access)
    }

    pub fn suggest(
        &self,
        tb: &Toolbox<'_>,
        name: &str,
        ty: Option<&Type>,
        access: AccessMatch,
        kind: CompletionKind,
    ) -> Option<CodeCompletion> {
        let rating = self.rate(tb, name, ty, access);
        rating
            .is_match()
            .then(|| CodeCompletion::replacing(&self.info, kind, name, rating))
    }
}

/// Reads an identifier. A caret inside it is answered with what `suggest` offers.
pub(crate) fn read_identifier_or_complete<'t>(
    tokens: &mut TokenStream<'t>,
    expectation: &Expectation,
    suggest: impl FnOnce(&CompletionScope<'_>) -> Vec<CodeCompletion>,
) -> Parsed<Token<'t>> {
    match tokens.read_identifier() {
        Ok(token) => Ok(token),
        Err(TokenError::Caret(info)) => {
            let scope = CompletionScope {
                info,
                prefix: info.prefix(tokens.text()),
                expectation,
            };
            Err(Interrupt::Completions(Completions::new(suggest(&scope))))
        }
        Err(err) => Err(token_error(err, ErrorPriority::WrongParser)),
    }
}

pub(crate) fn expect_object(result: ParseResult, position: usize) -> Parsed<ObjectInfo> {
    match result {
        ParseResult::Object(info) => Ok(info),
        other => Err(ParseError::semantic(
            position,
            format!("Expected an object, found {}", other.kind_name()),
            ErrorPriority::PotentiallyRightParser,
        )
        .into()),
    }
}

pub(crate) fn operator_error(err: OperatorError, position: usize) -> Interrupt {
    match err {
        OperatorError::Semantic(message) => {
            ParseError::semantic(position, message, ErrorPriority::PotentiallyRightParser).into()
        }
        OperatorError::Thrown(thrown) => ParseError::evaluation(position, thrown).into(),
    }
}

/// Writes `value` through the setter of `target` when the parse evaluates.
pub(crate) fn assign(
    tb: &Toolbox<'_>,
    target: &ObjectInfo,
    value: Value,
    position: usize,
) -> Parsed<ObjectInfo> {
    let Some(setter) = &target.setter else {
        return Err(ParseError::semantic(
            position,
            "The left-hand side of an assignment must be a variable",
            ErrorPriority::PotentiallyRightParser,
        )
        .into());
    };
    if !tb.evaluates() || value.is_indeterminate() {
        return Ok(ObjectInfo::indeterminate(target.declared_type.clone()));
    }
    tracing::trace!(target: "jexpr.eval", ?setter, ?value, "assigning");
    setter
        .set(tb.store, value.clone())
        .map_err(|thrown| ParseError::evaluation(position, thrown))?;
    Ok(ObjectInfo::new(value, target.declared_type.clone()))
}

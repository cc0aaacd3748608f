//! Argument lists of method and constructor calls.

use jexpr_syntax::{TokenError, TokenStream};
use jexpr_types::{format_type, Type};

use crate::completion::{Completions, ExecutableArgumentInfo};
use crate::executable::{argument_type, resolve_overload, ExecutableInfo, Resolution};
use crate::expectation::Expectation;
use crate::object_info::ObjectInfo;
use crate::outcome::{token_error, AmbiguityError, ErrorPriority, Interrupt, ParseError, Parsed, TokenResultExt};
use crate::parsers::{expect_object, parse_expression};
use crate::providers::StringCompletionRequest;
use crate::toolbox::Toolbox;

/// Parses `arg, arg, ...)` after the opening parenthesis.
///
/// Argument `n` is parsed expecting the parameter types of the candidates that still accept
/// arguments `0..n`. Completions inside an argument carry the argument info of this call.
pub(crate) fn parse_arguments(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    candidates: &[ExecutableInfo<'_>],
    receiver: &ObjectInfo,
) -> Parsed<Vec<ObjectInfo>> {
    let mut arguments: Vec<ObjectInfo> = Vec::new();
    if tokens.peek_char() == Some(')') && !tokens.is_caret_before_next_token() {
        tokens
            .read_char(')')
            .or_fail(ErrorPriority::PotentiallyRightParser)?;
        return Ok(arguments);
    }

    loop {
        let index = arguments.len();
        let previous_types: Vec<Type> = arguments.iter().map(|arg| argument_type(tb, arg)).collect();
        let applicable: Vec<&ExecutableInfo<'_>> = candidates
            .iter()
            .filter(|candidate| {
                candidate.accepts_argument_at(index)
                    && candidate
                        .rate_leading_arguments(tb.store, &previous_types)
                        .is_match()
            })
            .collect();
        let with_info = |completions: Completions| {
            Interrupt::Completions(with_argument_info(tb, completions, candidates, index, &previous_types))
        };

        if let Some(found) = string_completions(tb, tokens, &applicable, index, receiver, &arguments) {
            return Err(with_info(found));
        }

        let mut expected: Vec<Type> = Vec::new();
        for candidate in &applicable {
            if let Some(ty) = candidate.parameter_type(index) {
                if !expected.contains(&ty) {
                    expected.push(ty);
                }
            }
        }
        let start = tokens.position();
        let argument = match parse_expression(tb, tokens, &Expectation::object_of(expected)) {
            Ok(result) => expect_object(result, start)?,
            Err(Interrupt::Completions(found)) => return Err(with_info(found)),
            Err(other) => return Err(other),
        };
        arguments.push(argument);

        match tokens.read_one_of(&[",", ")"]) {
            Ok(token) if token.text == ")" => return Ok(arguments),
            Ok(_) => {}
            Err(TokenError::Caret(_)) => return Err(with_info(Completions::default())),
            Err(err) => return Err(token_error(err, ErrorPriority::PotentiallyRightParser)),
        }
    }
}

fn with_argument_info(
    tb: &Toolbox<'_>,
    mut completions: Completions,
    candidates: &[ExecutableInfo<'_>],
    index: usize,
    previous_types: &[Type],
) -> Completions {
    // An inner call closer to the caret already described itself.
    if completions.argument_info.is_some() {
        return completions;
    }
    let signatures = candidates
        .iter()
        .filter(|candidate| !candidate.variadic)
        .map(|regular| {
            let applicable = candidates
                .iter()
                .filter(|view| view.owner == regular.owner && std::ptr::eq(view.params, regular.params))
                .any(|view| {
                    view.accepts_argument_at(index)
                        && view.rate_leading_arguments(tb.store, previous_types).is_match()
                });
            (regular.signature(tb.store), applicable)
        })
        .collect();
    completions.argument_info = Some(ExecutableArgumentInfo {
        current_argument_index: index,
        signatures,
    });
    completions
}

/// Suggestions of the providers registered for this argument when the caret is inside a
/// string literal.
fn string_completions(
    tb: &Toolbox<'_>,
    tokens: &TokenStream<'_>,
    applicable: &[&ExecutableInfo<'_>],
    index: usize,
    receiver: &ObjectInfo,
    previous: &[ObjectInfo],
) -> Option<Completions> {
    if tb.providers.is_empty() || tokens.peek_char() != Some('"') {
        return None;
    }
    let mut probe = tokens.clone();
    let Err(TokenError::Caret(info)) = probe.read_string_literal() else {
        return None;
    };
    // A caret before the opening quote is not inside the literal.
    if info.text_begin <= info.token_begin {
        return None;
    }

    let mut found: Option<Completions> = None;
    for executable in applicable {
        let class_name = tb.store.class_name(executable.owner);
        let name = executable.provider_name();
        let Some(provider) = tb.providers.lookup(class_name, name, index) else {
            continue;
        };
        let request = StringCompletionRequest {
            store: tb.store,
            class_name,
            executable: name,
            parameter_index: index,
            receiver,
            previous_arguments: previous,
            info,
            source: tokens.text(),
        };
        found
            .get_or_insert_with(Completions::default)
            .merge(Completions::new(provider.completions(&request)));
    }
    found
}

/// Overload resolution for a parsed argument list.
pub(crate) fn resolve<'s>(
    tb: &Toolbox<'_>,
    candidates: &[ExecutableInfo<'s>],
    arguments: &[ObjectInfo],
    name: &str,
    position: usize,
) -> Parsed<ExecutableInfo<'s>> {
    let types: Vec<Type> = arguments.iter().map(|arg| argument_type(tb, arg)).collect();
    match resolve_overload(tb.store, candidates, &types) {
        Resolution::Unique(executable) => Ok(executable),
        Resolution::NoMatch => {
            let formatted: Vec<String> = types.iter().map(|ty| format_type(tb.store, ty)).collect();
            Err(ParseError::semantic(
                position,
                format!("No '{name}' is applicable to ({})", formatted.join(", ")),
                ErrorPriority::PotentiallyRightParser,
            )
            .into())
        }
        Resolution::Ambiguous(matching) => {
            let mut signatures: Vec<String> = matching.iter().map(|m| m.signature(tb.store)).collect();
            signatures.dedup();
            tracing::debug!(target: "jexpr.eval", name, candidates = signatures.len(), "ambiguous call");
            Err(Interrupt::Ambiguous(AmbiguityError {
                position,
                message: format!("Ambiguous call to '{name}':\n{}", signatures.join("\n")),
            }))
        }
    }
}

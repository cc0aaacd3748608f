//! Shared parse state and the merge of candidate parsers.

use jexpr_syntax::TokenStream;
use jexpr_types::{Type, TypeStore};

use crate::completion::Completions;
use crate::expectation::Expectation;
use crate::object_info::ObjectInfo;
use crate::outcome::{AmbiguityError, ErrorKind, ErrorPriority, Interrupt, ParseError, ParseResult, Parsed};
use crate::parsers::Parser;
use crate::providers::CompletionProviders;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluationMode {
    /// Resolve with declared types and invoke nothing.
    WithoutEvaluation,
    /// Invoke code; resolve with declared types.
    StaticTyping,
    /// Invoke code; resolve with runtime types.
    DynamicTyping,
}

impl EvaluationMode {
    pub fn evaluates(self) -> bool {
        self != EvaluationMode::WithoutEvaluation
    }
}

/// Services every parser borrows. Parsers own nothing and are handed this on each call.
#[derive(Clone, Copy)]
pub(crate) struct Toolbox<'a> {
    pub store: &'a TypeStore,
    pub settings: &'a Settings,
    pub providers: &'a CompletionProviders,
    pub this: &'a ObjectInfo,
    pub mode: EvaluationMode,
}

impl<'a> Toolbox<'a> {
    pub fn with_mode(self, mode: EvaluationMode) -> Self {
        Self { mode, ..self }
    }

    pub fn evaluates(&self) -> bool {
        self.mode.evaluates()
    }

    /// The type member lookup on `info` goes through.
    pub fn lookup_type(&self, info: &ObjectInfo) -> Type {
        match self.mode {
            EvaluationMode::DynamicTyping => info.dynamic_type(self.store),
            _ => info.static_type(self.store),
        }
    }
}

/// Run `parsers` from the same position and combine what they report.
///
/// The first result wins. Completions from any candidate win over errors, final errors win
/// over ambiguities, and the remaining errors are combined, preferring candidates that got
/// past their first token.
pub(crate) fn merge<C: ?Sized>(
    tb: &Toolbox<'_>,
    tokens: &mut TokenStream<'_>,
    context: &C,
    expectation: &Expectation,
    parsers: &[&dyn Parser<C>],
) -> Parsed<ParseResult> {
    let start = tokens.position();
    let mut completions: Option<Completions> = None;
    let mut ambiguity: Option<AmbiguityError> = None;
    let mut errors: Vec<ParseError> = Vec::new();

    for parser in parsers {
        tokens.set_position(start);
        match parser.parse(tb, tokens, context, expectation) {
            Ok(result) => {
                if let Some(completions) = completions {
                    return Err(Interrupt::Completions(completions));
                }
                return Ok(result);
            }
            Err(Interrupt::Completions(found)) => {
                completions
                    .get_or_insert_with(Completions::default)
                    .merge(found);
            }
            Err(Interrupt::Error(err)) if err.priority.is_final() => {
                if let Some(completions) = completions {
                    return Err(Interrupt::Completions(completions));
                }
                tracing::debug!(
                    target: "jexpr.eval",
                    position = err.position,
                    priority = ?err.priority,
                    "final error stops merge"
                );
                return Err(Interrupt::Error(err));
            }
            Err(Interrupt::Error(err)) => errors.push(err),
            Err(Interrupt::Ambiguous(err)) => {
                ambiguity.get_or_insert(err);
            }
        }
    }

    if let Some(completions) = completions {
        return Err(Interrupt::Completions(completions));
    }
    if let Some(ambiguity) = ambiguity {
        return Err(Interrupt::Ambiguous(ambiguity));
    }
    Err(Interrupt::Error(combine_errors(start, errors)))
}

fn combine_errors(start: usize, errors: Vec<ParseError>) -> ParseError {
    let best = errors
        .iter()
        .map(|err| err.priority)
        .min()
        .unwrap_or(ErrorPriority::WrongParser);
    let relevant: Vec<ParseError> = errors
        .into_iter()
        .filter(|err| err.priority == best)
        .collect();

    let Some(position) = relevant.iter().map(|err| err.position).max() else {
        return ParseError::syntax(start, "Expected an expression", ErrorPriority::WrongParser);
    };

    let mut messages: Vec<&str> = Vec::new();
    for err in &relevant {
        if !messages.contains(&err.message.as_str()) {
            messages.push(&err.message);
        }
    }
    let kind = relevant
        .iter()
        .find(|err| err.position == position)
        .map_or(ErrorKind::Syntax, |err| err.kind);

    tracing::debug!(
        target: "jexpr.eval",
        candidates = relevant.len(),
        position,
        priority = ?best,
        "merged candidate errors"
    );
    ParseError {
        position,
        message: messages.join("\n"),
        kind,
        priority: best,
        thrown: None,
    }
}

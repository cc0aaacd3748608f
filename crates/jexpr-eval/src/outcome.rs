//! The result union every parser produces.

use std::backtrace::Backtrace;

use jexpr_syntax::TokenError;
use jexpr_types::{Thrown, Type};

use crate::completion::Completions;
use crate::object_info::ObjectInfo;

/// Which error wins when several candidate parsers fail.
///
/// Ordered highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorPriority {
    InternalError,
    EvaluationException,
    /// Only this grammar rule could apply; the error is final.
    RightParser,
    /// The rule matched its first token but failed further in.
    PotentiallyRightParser,
    /// The first token did not fit the rule.
    WrongParser,
}

impl ErrorPriority {
    /// Errors at this priority stop a merge immediately.
    pub fn is_final(self) -> bool {
        self <= ErrorPriority::RightParser
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    Semantic,
    Evaluation,
    Internal,
}

#[derive(Debug, Clone)]
pub struct ParseError {
    pub position: usize,
    pub message: String,
    pub kind: ErrorKind,
    pub priority: ErrorPriority,
    /// The exception raised by invoked code for [`ErrorKind::Evaluation`].
    pub thrown: Option<Thrown>,
}

impl ParseError {
    pub fn syntax(position: usize, message: impl Into<String>, priority: ErrorPriority) -> Self {
        Self {
            position,
            message: message.into(),
            kind: ErrorKind::Syntax,
            priority,
            thrown: None,
        }
    }

    pub fn semantic(position: usize, message: impl Into<String>, priority: ErrorPriority) -> Self {
        Self {
            position,
            message: message.into(),
            kind: ErrorKind::Semantic,
            priority,
            thrown: None,
        }
    }

    pub fn evaluation(position: usize, thrown: Thrown) -> Self {
        Self {
            position,
            message: format!("Exception during evaluation: {thrown}"),
            kind: ErrorKind::Evaluation,
            priority: ErrorPriority::EvaluationException,
            thrown: Some(thrown),
        }
    }

    /// An engine bug. Logged with a backtrace when created.
    pub fn internal(position: usize, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(
            target: "jexpr.eval",
            position,
            backtrace = %Backtrace::force_capture(),
            "internal error: {message}"
        );
        Self {
            position,
            message: format!("Internal error: {message}"),
            kind: ErrorKind::Internal,
            priority: ErrorPriority::InternalError,
            thrown: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AmbiguityError {
    pub position: usize,
    pub message: String,
}

/// A successful parse. The token stream is positioned right after the consumed text.
#[derive(Debug, Clone)]
pub enum ParseResult {
    Object(ObjectInfo),
    Class(Type),
    Package(String),
}

impl ParseResult {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParseResult::Object(_) => "an object",
            ParseResult::Class(_) => "a class",
            ParseResult::Package(_) => "a package",
        }
    }
}

#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Result(ParseResult),
    Error(ParseError),
    Ambiguous(AmbiguityError),
    Completions(Completions),
}

impl From<Parsed<ParseResult>> for ParseOutcome {
    fn from(parsed: Parsed<ParseResult>) -> Self {
        match parsed {
            Ok(result) => ParseOutcome::Result(result),
            Err(Interrupt::Error(err)) => ParseOutcome::Error(err),
            Err(Interrupt::Ambiguous(err)) => ParseOutcome::Ambiguous(err),
            Err(Interrupt::Completions(completions)) => ParseOutcome::Completions(completions),
        }
    }
}

/// Everything that ends a parse other than a result.
#[derive(Debug, Clone)]
pub enum Interrupt {
    Error(ParseError),
    Ambiguous(AmbiguityError),
    /// The caret was reached. Not a failure.
    Completions(Completions),
}

pub type Parsed<T> = Result<T, Interrupt>;

impl From<ParseError> for Interrupt {
    fn from(err: ParseError) -> Self {
        Interrupt::Error(err)
    }
}

impl Interrupt {
    /// Raises a [`ErrorPriority::WrongParser`] error to `priority`. Used once a parser has
    /// consumed the token that identifies its rule.
    pub fn at_least(priority: ErrorPriority) -> impl Fn(Interrupt) -> Interrupt {
        move |interrupt| match interrupt {
            Interrupt::Error(mut err) if err.priority > priority => {
                err.priority = priority;
                Interrupt::Error(err)
            }
            other => other,
        }
    }
}

/// Turn a token error into an interrupt. A caret inside a token with nothing to suggest yields
/// an empty completion set.
pub(crate) fn token_error(err: TokenError, priority: ErrorPriority) -> Interrupt {
    match err {
        TokenError::Syntax { position, message } => {
            ParseError::syntax(position, message, priority).into()
        }
        TokenError::Caret(_) => Interrupt::Completions(Completions::default()),
        TokenError::Internal { position, message } => ParseError::internal(position, message).into(),
    }
}

/// `Result<T, TokenError>` to `Parsed<T>` with the given failure priority.
pub(crate) trait TokenResultExt<T> {
    fn or_fail(self, priority: ErrorPriority) -> Parsed<T>;
}

impl<T> TokenResultExt<T> for Result<T, TokenError> {
    fn or_fail(self, priority: ErrorPriority) -> Parsed<T> {
        self.map_err(|err| token_error(err, priority))
    }
}

use jexpr_types::Thrown;

use crate::outcome::{AmbiguityError, ErrorKind, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseExceptionKind {
    Syntax,
    Semantic,
    Evaluation,
    Internal,
    Ambiguous,
}

/// Failure of a public engine operation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message} (at {position})")]
pub struct ParseException {
    /// Byte offset into the expression text.
    pub position: usize,
    pub kind: ParseExceptionKind,
    pub message: String,
    /// The exception raised by invoked code for [`ParseExceptionKind::Evaluation`].
    #[source]
    pub cause: Option<Thrown>,
}

impl ParseException {
    pub(crate) fn new(position: usize, kind: ParseExceptionKind, message: impl Into<String>) -> Self {
        Self {
            position,
            kind,
            message: message.into(),
            cause: None,
        }
    }
}

impl From<ParseError> for ParseException {
    fn from(err: ParseError) -> Self {
        let kind = match err.kind {
            ErrorKind::Syntax => ParseExceptionKind::Syntax,
            ErrorKind::Semantic => ParseExceptionKind::Semantic,
            ErrorKind::Evaluation => ParseExceptionKind::Evaluation,
            ErrorKind::Internal => ParseExceptionKind::Internal,
        };
        Self {
            position: err.position,
            kind,
            message: err.message,
            cause: err.thrown,
        }
    }
}

impl From<AmbiguityError> for ParseException {
    fn from(err: AmbiguityError) -> Self {
        Self::new(err.position, ParseExceptionKind::Ambiguous, err.message)
    }
}

//! Lexing primitives for Java-like expressions typed interactively.
//!
//! [`TokenStream`] is the single place that decides whether a read touches the caret. Parsers
//! built on top of it never compare offsets against the caret themselves; they react to
//! [`TokenError::Caret`].

mod literals;
mod operators;
mod token_stream;

pub use literals::{
    classify_numeric_literal, parse_double_literal, parse_float_literal, parse_int_literal,
    parse_literal, parse_long_literal, parse_negated_literal, unescape, unescape_char_literal,
    unescape_string_literal, LiteralError, LiteralKind, LiteralValue,
};
pub use operators::{
    match_binary_operator, ArithmeticOperator, BinaryOperator, UnaryOperator,
    MAX_PRECEDENCE_LEVEL,
};
pub use token_stream::{CompletionInfo, Token, TokenError, TokenStream};

/// Java keywords that are also expressions on their own.
pub const EXPRESSION_KEYWORDS: [&str; 4] = ["this", "true", "false", "null"];

pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

pub fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

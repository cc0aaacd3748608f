use once_cell::sync::Lazy;
use regex::Regex;

use crate::literals::{
    classify_numeric_literal, parse_literal, parse_negated_literal, unescape, LiteralKind,
    LiteralValue,
};
use crate::operators::{match_binary_operator, BinaryOperator, UnaryOperator, UNARY_OPERATOR_SYMBOLS};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*").expect("valid regex")
});

/// Numeric literals without sign. Alternatives are tried left to right, so the forms with a
/// decimal point or exponent come before plain integers.
static NUMERIC_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:",
        r"0[xX][0-9A-Fa-f_]*[lL]?",
        r"|0[bB][01_]*[lL]?",
        r"|(?:[0-9][0-9_]*\.(?:[0-9][0-9_]*)?|\.[0-9][0-9_]*)(?:[eE][+-]?[0-9_]*)?[fFdD]?",
        r"|[0-9][0-9_]*[eE][+-]?[0-9_]*[fFdD]?",
        r"|[0-9][0-9_]*[fFdDlL]?",
        r")"
    ))
    .expect("valid regex")
});

/// Characters that end the part of a string literal a caret completion owns.
const STRING_COMPLETION_STOPS: [char; 3] = [')', ',', ' '];

/// Where a read's match ends relative to the caret, and whether that counts as "inside".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaretPolicy {
    /// Identifiers and other words: the caret may sit anywhere in `[begin, end]`.
    Inclusive,
    /// Fixed characters, operators and literals: the caret must lie in `[begin, end)`.
    Exclusive,
}

impl CaretPolicy {
    fn contains(self, begin: usize, end: usize, caret: usize) -> bool {
        match self {
            CaretPolicy::Inclusive => begin <= caret && caret <= end,
            CaretPolicy::Exclusive => begin <= caret && caret < end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub begin: usize,
    /// Exclusive; trailing whitespace is not part of the token.
    pub end: usize,
}

/// Ranges describing the token the caret was found in.
///
/// `token_*` covers the whole token (including the quotes of a string literal) and is what a
/// completion replaces. `text_*` is the part that is matched against candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionInfo {
    pub token_begin: usize,
    pub token_end: usize,
    pub text_begin: usize,
    pub text_end: usize,
    pub caret: usize,
}

impl CompletionInfo {
    fn empty_at(caret: usize) -> Self {
        Self {
            token_begin: caret,
            token_end: caret,
            text_begin: caret,
            text_end: caret,
            caret,
        }
    }

    /// The text typed before the caret.
    pub fn prefix<'t>(&self, source: &'t str) -> &'t str {
        source
            .get(self.text_begin..self.caret.clamp(self.text_begin, self.text_end))
            .unwrap_or("")
    }

    /// The whole text of the token, including the part after the caret.
    pub fn text<'t>(&self, source: &'t str) -> &'t str {
        source.get(self.text_begin..self.text_end).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("{message}")]
    Syntax { position: usize, message: String },
    /// Not a failure: the read reached the caret.
    #[error("caret reached at {}", .0.caret)]
    Caret(CompletionInfo),
    #[error("internal error at {position}: {message}")]
    Internal { position: usize, message: String },
}

impl TokenError {
    fn syntax(position: usize, message: impl Into<String>) -> Self {
        TokenError::Syntax {
            position,
            message: message.into(),
        }
    }
}

/// Caret-aware lexer over one expression.
///
/// All positions are byte offsets into the text. Every `read_*` call skips leading whitespace,
/// matches one token and either returns it or, when the caret lies in the whitespace or the
/// token, returns [`TokenError::Caret`] instead. After a successful read the stream is
/// positioned after the token's trailing whitespace, but never past the caret. `peek_*` calls
/// never report the caret.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    text: &'a str,
    caret: Option<usize>,
    position: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(text: &'a str, caret: Option<usize>) -> Self {
        Self {
            text,
            caret,
            position: 0,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn caret(&self) -> Option<usize> {
        self.caret
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Rewind (or advance) to a position obtained from [`TokenStream::position`].
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.text.len());
    }

    /// Only whitespace remains.
    pub fn is_at_end(&self) -> bool {
        self.text[self.position..].trim_start().is_empty()
    }

    fn rest(&self) -> &'a str {
        &self.text[self.position..]
    }

    fn skip_whitespace_from(&self, position: usize) -> usize {
        let rest = &self.text[position..];
        position + (rest.len() - rest.trim_start().len())
    }

    /// Start of the next token, or the caret signal if it is inside the leading whitespace.
    fn token_start(&self) -> Result<usize, TokenError> {
        let start = self.skip_whitespace_from(self.position);
        if let Some(caret) = self.caret {
            if self.position > caret {
                return Err(TokenError::Internal {
                    position: self.position,
                    message: format!(
                        "attempted to read at {} past the caret at {caret}",
                        self.position
                    ),
                });
            }
            if self.position <= caret && caret < start {
                return Err(TokenError::Caret(CompletionInfo::empty_at(caret)));
            }
        }
        Ok(start)
    }

    /// Move past a token ending at `end` and its trailing whitespace, stopping at the caret.
    fn advance_past(&mut self, end: usize) {
        let mut next = self.skip_whitespace_from(end);
        if let Some(caret) = self.caret {
            if end <= caret {
                next = next.min(caret);
            }
        }
        self.position = next;
    }

    fn read_with(
        &mut self,
        policy: CaretPolicy,
        expected: &str,
        matcher: impl FnOnce(&'a str) -> Option<usize>,
    ) -> Result<Token<'a>, TokenError> {
        let start = self.token_start()?;
        let rest = &self.text[start..];
        let len = matcher(rest).filter(|len| *len > 0);
        let Some(len) = len else {
            if self.caret == Some(start) {
                return Err(TokenError::Caret(CompletionInfo::empty_at(start)));
            }
            return Err(TokenError::syntax(start, format!("Expected {expected}")));
        };

        let end = start + len;
        if let Some(caret) = self.caret {
            if policy.contains(start, end, caret) {
                return Err(TokenError::Caret(CompletionInfo {
                    token_begin: start,
                    token_end: end,
                    text_begin: start,
                    text_end: end,
                    caret,
                }));
            }
        }

        self.advance_past(end);
        Ok(Token {
            text: &self.text[start..end],
            begin: start,
            end,
        })
    }

    /// The caret lies between the current position and the start of the next token.
    pub fn is_caret_before_next_token(&self) -> bool {
        let start = self.skip_whitespace_from(self.position);
        self.caret
            .is_some_and(|caret| self.position <= caret && caret <= start)
    }

    /// The next non-whitespace character.
    pub fn peek_char(&self) -> Option<char> {
        self.rest().trim_start().chars().next()
    }

    pub fn peek_binary_operator(&self) -> Option<BinaryOperator> {
        match_binary_operator(self.rest().trim_start())
    }

    pub fn read_identifier(&mut self) -> Result<Token<'a>, TokenError> {
        self.read_regex(&IDENTIFIER, "an identifier")
    }

    /// An identifier that must equal `keyword`. The caret inside the word is reported like for
    /// any identifier so callers can complete keywords.
    pub fn read_keyword(&mut self, keyword: &str) -> Result<Token<'a>, TokenError> {
        let start = self.position;
        let token = self.read_identifier()?;
        if token.text != keyword {
            self.position = start;
            return Err(TokenError::syntax(
                token.begin,
                format!("Expected `{keyword}`"),
            ));
        }
        Ok(token)
    }

    pub fn read_char(&mut self, expected: char) -> Result<Token<'a>, TokenError> {
        self.read_with(CaretPolicy::Exclusive, &format!("`{expected}`"), |rest| {
            rest.starts_with(expected).then(|| expected.len_utf8())
        })
    }

    /// The longest of `candidates` the text starts with.
    pub fn read_one_of(&mut self, candidates: &[&str]) -> Result<Token<'a>, TokenError> {
        let mut sorted = candidates.to_vec();
        sorted.sort_by_key(|c| std::cmp::Reverse(c.len()));
        let expected = format!("one of {}", candidates.join(", "));
        self.read_with(CaretPolicy::Exclusive, &expected, |rest| {
            sorted.iter().find(|c| rest.starts_with(**c)).map(|c| c.len())
        })
    }

    /// A run of characters up to (excluding) the first delimiter or the end of the text.
    pub fn read_until(&mut self, delimiters: &[char]) -> Result<Token<'a>, TokenError> {
        self.read_with(CaretPolicy::Inclusive, "a name", |rest| {
            Some(rest.find(|c| delimiters.contains(&c)).unwrap_or(rest.len()))
        })
    }

    pub fn read_regex(&mut self, regex: &Regex, expected: &str) -> Result<Token<'a>, TokenError> {
        self.read_with(CaretPolicy::Inclusive, expected, |rest| {
            regex.find(rest).filter(|m| m.start() == 0).map(|m| m.end())
        })
    }

    pub fn read_unary_operator(&mut self) -> Result<(Token<'a>, UnaryOperator), TokenError> {
        let token = self.read_with(CaretPolicy::Exclusive, "a unary operator", |rest| {
            UNARY_OPERATOR_SYMBOLS
                .iter()
                .find(|symbol| rest.starts_with(**symbol))
                .map(|symbol| symbol.len())
        })?;
        let op = UnaryOperator::from_symbol(token.text).ok_or_else(|| TokenError::Internal {
            position: token.begin,
            message: format!("unknown unary operator `{}`", token.text),
        })?;
        Ok((token, op))
    }

    pub fn read_binary_operator(&mut self) -> Result<(Token<'a>, BinaryOperator), TokenError> {
        let mut op = None;
        let token = self.read_with(CaretPolicy::Exclusive, "a binary operator", |rest| {
            op = match_binary_operator(rest);
            op.map(|op| op.symbol().len())
        })?;
        op.map(|op| (token, op)).ok_or_else(|| TokenError::Internal {
            position: token.begin,
            message: "binary operator vanished after matching".to_owned(),
        })
    }

    /// Integer or floating literal; the kind follows Java's suffix rules and overflow is a
    /// syntax error.
    pub fn read_numeric_literal(&mut self) -> Result<(Token<'a>, LiteralValue), TokenError> {
        let start = self.position;
        let token = self.read_with(CaretPolicy::Exclusive, "a numeric literal", |rest| {
            NUMERIC_LITERAL.find(rest).map(|m| m.end())
        })?;
        let kind = classify_numeric_literal(token.text);
        parse_literal(kind, token.text)
            .map(|value| (token, value))
            .map_err(|e| {
                self.position = start;
                TokenError::syntax(token.begin + e.span.start, e.message)
            })
    }

    /// Like [`Self::read_numeric_literal`] for a literal that directly follows a unary `-`. The
    /// returned value is already negated.
    pub fn read_negated_numeric_literal(
        &mut self,
    ) -> Result<(Token<'a>, LiteralValue), TokenError> {
        let start = self.position;
        let token = self.read_with(CaretPolicy::Exclusive, "a numeric literal", |rest| {
            NUMERIC_LITERAL.find(rest).map(|m| m.end())
        })?;
        let kind = classify_numeric_literal(token.text);
        parse_negated_literal(kind, token.text)
            .map(|value| (token, value))
            .map_err(|e| {
                self.position = start;
                TokenError::syntax(token.begin + e.span.start, e.message)
            })
    }

    pub fn read_string_literal(&mut self) -> Result<(Token<'a>, String), TokenError> {
        let start = self.position;
        let (token, body) = self.read_quoted('"', "a string literal")?;
        let value = unescape(body, 1).map_err(|e| {
            self.position = start;
            TokenError::syntax(token.begin + e.span.start, e.message)
        })?;
        Ok((token, value))
    }

    pub fn read_char_literal(&mut self) -> Result<(Token<'a>, char), TokenError> {
        let start = self.position;
        let (token, _) = self.read_quoted('\'', "a character literal")?;
        let value = parse_literal(LiteralKind::Char, token.text).map_err(|e| {
            self.position = start;
            TokenError::syntax(token.begin + e.span.start, e.message)
        })?;
        match value {
            LiteralValue::Char(ch) => Ok((token, ch)),
            _ => Err(TokenError::Internal {
                position: token.begin,
                message: "character literal decoded to a non-character".to_owned(),
            }),
        }
    }

    /// A literal delimited by `quote`. Returns the token and its raw body.
    ///
    /// With the caret inside, the completion text runs from the opening quote to the first
    /// stop character after the caret (or the closing quote).
    fn read_quoted(
        &mut self,
        quote: char,
        expected: &str,
    ) -> Result<(Token<'a>, &'a str), TokenError> {
        let begin = self.token_start()?;
        let rest = &self.text[begin..];
        if !rest.starts_with(quote) {
            if self.caret == Some(begin) {
                return Err(TokenError::Caret(CompletionInfo::empty_at(begin)));
            }
            return Err(TokenError::syntax(begin, format!("Expected {expected}")));
        }

        let body_begin = begin + quote.len_utf8();
        let mut closing = None;
        let mut chars = self.text[body_begin..].char_indices();
        while let Some((idx, ch)) = chars.next() {
            match ch {
                '\\' => {
                    chars.next();
                }
                c if c == quote => {
                    closing = Some(body_begin + idx);
                    break;
                }
                '\n' | '\r' => break,
                _ => {}
            }
        }

        let end = closing.map_or(self.text.len(), |close| close + quote.len_utf8());
        if let Some(caret) = self.caret {
            if caret == begin {
                return Err(TokenError::Caret(CompletionInfo::empty_at(caret)));
            }
            let inside = match closing {
                Some(close) => begin < caret && caret <= close,
                None => begin < caret && caret <= end,
            };
            if inside {
                let limit = closing.unwrap_or(self.text.len());
                let stop = self.text[caret..limit]
                    .find(|c| STRING_COMPLETION_STOPS.contains(&c))
                    .map_or(limit, |offset| caret + offset);
                let token_end = if stop == limit { end } else { stop };
                return Err(TokenError::Caret(CompletionInfo {
                    token_begin: begin,
                    token_end,
                    text_begin: body_begin,
                    text_end: stop,
                    caret,
                }));
            }
        }

        let Some(close) = closing else {
            return Err(TokenError::syntax(
                begin,
                format!("Unterminated {}", expected.trim_start_matches("a ")),
            ));
        };

        self.advance_past(end);
        Ok((
            Token {
                text: &self.text[begin..end],
                begin,
                end,
            },
            &self.text[body_begin..close],
        ))
    }
}

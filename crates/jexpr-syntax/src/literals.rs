use std::ops::Range;

/// Kind of a numeric or text literal, decided by its shape and suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LiteralError {
    pub message: String,
    /// Byte range within the literal text (not expression offsets).
    pub span: Range<usize>,
}

fn err(message: impl Into<String>, span: Range<usize>) -> LiteralError {
    LiteralError {
        message: message.into(),
        span,
    }
}

/// Classify a numeric literal: hex and binary literals are integral, otherwise the suffix and
/// the presence of a decimal point or exponent decide.
pub fn classify_numeric_literal(text: &str) -> LiteralKind {
    let lower = text.to_ascii_lowercase();
    let is_long = lower.ends_with('l');
    if lower.starts_with("0x") || lower.starts_with("0b") {
        return if is_long {
            LiteralKind::Long
        } else {
            LiteralKind::Int
        };
    }
    if is_long {
        LiteralKind::Long
    } else if lower.ends_with('f') {
        LiteralKind::Float
    } else if lower.ends_with('d') || lower.contains(['.', 'e']) {
        LiteralKind::Double
    } else {
        LiteralKind::Int
    }
}

pub fn parse_literal(kind: LiteralKind, text: &str) -> Result<LiteralValue, LiteralError> {
    match kind {
        LiteralKind::Int => parse_int_literal(text).map(LiteralValue::Int),
        LiteralKind::Long => parse_long_literal(text).map(LiteralValue::Long),
        LiteralKind::Float => parse_float_literal(text).map(LiteralValue::Float),
        LiteralKind::Double => parse_double_literal(text).map(LiteralValue::Double),
        LiteralKind::Char => unescape_char_literal(text).map(LiteralValue::Char),
        LiteralKind::String => unescape_string_literal(text).map(LiteralValue::String),
    }
}

/// Hex, octal and binary literals may use all 32 bits (`0xFFFF_FFFF` is `-1`); decimal
/// literals must fit into `i32::MAX`.
pub fn parse_int_literal(text: &str) -> Result<i32, LiteralError> {
    int_literal(text, i32::MAX as u64)
}

pub fn parse_long_literal(text: &str) -> Result<i64, LiteralError> {
    long_literal(text, i64::MAX as u64)
}

/// Decodes a numeric literal that directly follows a unary `-` and returns the negated value.
/// Only there may a decimal literal be `2147483648` or `9223372036854775808L`.
pub fn parse_negated_literal(kind: LiteralKind, text: &str) -> Result<LiteralValue, LiteralError> {
    match kind {
        LiteralKind::Int => int_literal(text, i32::MIN.unsigned_abs().into())
            .map(|v| LiteralValue::Int(v.wrapping_neg())),
        LiteralKind::Long => long_literal(text, i64::MIN.unsigned_abs())
            .map(|v| LiteralValue::Long(v.wrapping_neg())),
        LiteralKind::Float => parse_float_literal(text).map(|v| LiteralValue::Float(-v)),
        LiteralKind::Double => parse_double_literal(text).map(|v| LiteralValue::Double(-v)),
        LiteralKind::Char | LiteralKind::String => {
            Err(err("Only numeric literals can be negated", 0..text.len()))
        }
    }
}

fn int_literal(text: &str, decimal_limit: u64) -> Result<i32, LiteralError> {
    if text.ends_with(['l', 'L']) {
        return Err(err("Int literal must not have `L` suffix", 0..text.len()));
    }
    let digits = IntegerDigits::split(text, text.len())?;
    let limit = if digits.is_decimal() {
        decimal_limit
    } else {
        u32::MAX as u64
    };
    let value = digits.parse(limit)?;
    Ok(value as u32 as i32)
}

fn long_literal(text: &str, decimal_limit: u64) -> Result<i64, LiteralError> {
    let Some(body) = text.strip_suffix(['l', 'L']) else {
        return Err(err("Long literal is missing `L` suffix", 0..text.len()));
    };
    if body.ends_with('_') {
        return Err(err(
            "Underscore is not allowed immediately before long suffix",
            0..text.len(),
        ));
    }
    let digits = IntegerDigits::split(text, body.len())?;
    let limit = if digits.is_decimal() {
        decimal_limit
    } else {
        u64::MAX
    };
    Ok(digits.parse(limit)? as i64)
}

struct IntegerDigits<'a> {
    text: &'a str,
    radix: u32,
    start: usize,
    end: usize,
}

impl<'a> IntegerDigits<'a> {
    fn split(text: &'a str, end: usize) -> Result<Self, LiteralError> {
        let bytes = text.as_bytes();
        if end == 0 {
            return Err(err("Missing digits", 0..0));
        }
        let (radix, start) = match bytes {
            [b'0', b'x' | b'X', ..] => (16, 2),
            [b'0', b'b' | b'B', ..] => (2, 2),
            [b'0', _, ..] if end > 1 => (8, 1),
            _ => (10, 0),
        };
        if start == 2 && end == 2 {
            return Err(err("Missing digits after base prefix", 0..end));
        }
        if start == 2 && bytes[2] == b'_' {
            return Err(err(
                "Underscore is not allowed immediately after base prefix",
                2..3,
            ));
        }
        if bytes[end - 1] == b'_' {
            return Err(err(
                "Trailing underscore is not allowed in numeric literal",
                end - 1..end,
            ));
        }
        Ok(Self {
            text,
            radix,
            start,
            end,
        })
    }

    fn is_decimal(&self) -> bool {
        self.radix == 10
    }

    fn parse(&self, limit: u64) -> Result<u64, LiteralError> {
        let mut value: u64 = 0;
        for (idx, ch) in self.text[..self.end].char_indices().skip(self.start) {
            if ch == '_' {
                continue;
            }
            let digit = ch.to_digit(self.radix).ok_or_else(|| {
                err(
                    format!("Invalid digit `{ch}` in base-{} literal", self.radix),
                    idx..idx + ch.len_utf8(),
                )
            })?;
            value = value
                .checked_mul(u64::from(self.radix))
                .and_then(|v| v.checked_add(u64::from(digit)))
                .filter(|v| *v <= limit)
                .ok_or_else(|| err("Integer literal is out of range", 0..self.text.len()))?;
        }
        Ok(value)
    }
}

pub fn parse_float_literal(text: &str) -> Result<f32, LiteralError> {
    let Some(body) = text.strip_suffix(['f', 'F']) else {
        return Err(err("Float literal must end with `f` suffix", 0..text.len()));
    };
    let sanitized = validate_decimal_floating(body, true)?;
    let value = sanitized
        .parse::<f32>()
        .map_err(|_| err("Invalid float literal", 0..text.len()))?;
    if value.is_infinite() {
        return Err(err("Float literal is out of range", 0..text.len()));
    }
    Ok(value)
}

pub fn parse_double_literal(text: &str) -> Result<f64, LiteralError> {
    let (body, had_suffix) = match text.strip_suffix(['d', 'D']) {
        Some(body) => (body, true),
        None => (text, false),
    };
    let sanitized = validate_decimal_floating(body, had_suffix)?;
    let value = sanitized
        .parse::<f64>()
        .map_err(|_| err("Invalid double literal", 0..text.len()))?;
    if value.is_infinite() {
        return Err(err("Double literal is out of range", 0..text.len()));
    }
    Ok(value)
}

/// Checks underscore placement and returns the literal without underscores.
fn validate_decimal_floating(main: &str, had_suffix: bool) -> Result<String, LiteralError> {
    let bytes = main.as_bytes();
    if bytes.is_empty() {
        return Err(err("Missing digits", 0..0));
    }

    let mut dot = None;
    let mut exponent = None;
    for (idx, &b) in bytes.iter().enumerate() {
        match b {
            b'0'..=b'9' | b'_' => {}
            b'.' if dot.is_none() && exponent.is_none() => dot = Some(idx),
            b'e' | b'E' if exponent.is_none() => exponent = Some(idx),
            b'+' | b'-' if exponent.is_some_and(|e| e + 1 == idx) => {}
            _ => {
                return Err(err(
                    format!("Invalid character `{}` in floating literal", b as char),
                    idx..idx + 1,
                ))
            }
        }
    }

    // Underscores may only separate digits.
    for (idx, &b) in bytes.iter().enumerate() {
        if b != b'_' {
            continue;
        }
        let prev_is_digit = idx > 0 && (bytes[idx - 1].is_ascii_digit() || bytes[idx - 1] == b'_');
        let next_is_digit = bytes
            .get(idx + 1)
            .is_some_and(|n| n.is_ascii_digit() || *n == b'_');
        if !prev_is_digit || !next_is_digit {
            return Err(err(
                "Underscore must be placed between digits",
                idx..idx + 1,
            ));
        }
    }

    let significand_end = exponent.unwrap_or(bytes.len());
    if !bytes[..significand_end].iter().any(u8::is_ascii_digit) {
        return Err(err("Missing digits in literal", 0..significand_end));
    }
    if let Some(e) = exponent {
        if !bytes[e + 1..].iter().any(u8::is_ascii_digit) {
            return Err(err("Missing exponent digits", e..bytes.len()));
        }
    }
    if !had_suffix && dot.is_none() && exponent.is_none() {
        return Err(err(
            "Floating literal without suffix must contain a decimal point or exponent",
            0..main.len(),
        ));
    }

    Ok(main.chars().filter(|&ch| ch != '_').collect())
}

pub fn unescape_char_literal(text: &str) -> Result<char, LiteralError> {
    let inner = text
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .filter(|_| text.len() >= 2)
        .ok_or_else(|| err("Invalid char literal", 0..text.len()))?;

    let decoded = unescape(inner, 1)?;
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.len_utf16() == 1 => Ok(ch),
        (None, _) => Err(err("Empty char literal", 0..text.len())),
        _ => Err(err(
            "Char literal must contain exactly one character",
            0..text.len(),
        )),
    }
}

pub fn unescape_string_literal(text: &str) -> Result<String, LiteralError> {
    let inner = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .filter(|_| text.len() >= 2)
        .ok_or_else(|| err("Invalid string literal", 0..text.len()))?;
    unescape(inner, 1)
}

/// Decode the escapes of a string or char literal body. `offset` shifts reported spans so
/// they point into the full literal.
pub fn unescape(body: &str, offset: usize) -> Result<String, LiteralError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    return Err(err(
                        "Unterminated escape sequence",
                        offset + idx..offset + body.len(),
                    ));
                };
                let decoded = match escaped {
                    't' => '\t',
                    'b' => '\u{0008}',
                    'n' => '\n',
                    'r' => '\r',
                    'f' => '\u{000C}',
                    '\'' => '\'',
                    '"' => '"',
                    '\\' => '\\',
                    '0'..='7' => {
                        let max_digits = if escaped <= '3' { 3 } else { 2 };
                        let mut value = escaped.to_digit(8).unwrap_or(0);
                        let mut count = 1;
                        while count < max_digits {
                            match chars.peek().and_then(|(_, next)| next.to_digit(8)) {
                                Some(digit) => {
                                    value = value * 8 + digit;
                                    chars.next();
                                    count += 1;
                                }
                                None => break,
                            }
                        }
                        char::from_u32(value).unwrap_or('\u{FFFD}')
                    }
                    other => {
                        return Err(err(
                            format!("Unknown escape sequence `\\{other}`"),
                            offset + idx..offset + idx + 1 + other.len_utf8(),
                        ))
                    }
                };
                out.push(decoded);
            }
            '\n' | '\r' => {
                return Err(err(
                    "Line terminator is not allowed in string/char literal",
                    offset + idx..offset + idx + 1,
                ))
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

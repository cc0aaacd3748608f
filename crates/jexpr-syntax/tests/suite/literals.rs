use jexpr_syntax::{LiteralValue, TokenError, TokenStream};

fn numeric(text: &str) -> Result<LiteralValue, TokenError> {
    TokenStream::new(text, None)
        .read_numeric_literal()
        .map(|(_, value)| value)
}

#[test]
fn numeric_literals_follow_java_suffix_rules() {
    assert_eq!(numeric("123"), Ok(LiteralValue::Int(123)));
    assert_eq!(numeric("123L"), Ok(LiteralValue::Long(123)));
    assert_eq!(numeric("1.5f"), Ok(LiteralValue::Float(1.5)));
    assert_eq!(numeric("1.3e-7"), Ok(LiteralValue::Double(1.3e-7)));
    assert_eq!(numeric("2d"), Ok(LiteralValue::Double(2.0)));
    assert_eq!(numeric(".5"), Ok(LiteralValue::Double(0.5)));
    assert_eq!(numeric("0x1F"), Ok(LiteralValue::Int(31)));
    assert_eq!(numeric("1_000_000"), Ok(LiteralValue::Int(1_000_000)));
}

#[test]
fn overflow_is_a_syntax_error() {
    assert!(matches!(
        numeric("2147483648"),
        Err(TokenError::Syntax { .. })
    ));
    assert!(matches!(numeric("3e400"), Err(TokenError::Syntax { .. })));
}

#[test]
fn numeric_literal_stops_before_a_member_access() {
    let mut tokens = TokenStream::new("12 .5", None);
    let (token, value) = tokens.read_numeric_literal().unwrap();
    assert_eq!((token.text, value), ("12", LiteralValue::Int(12)));
}

#[test]
fn string_literals_decode_escapes() {
    let mut tokens = TokenStream::new(r#""a\"b\t\\" + x"#, None);
    let (token, value) = tokens.read_string_literal().unwrap();
    assert_eq!(value, "a\"b\t\\");
    assert_eq!(token.end, 10);
    assert_eq!(tokens.peek_char(), Some('+'));
}

#[test]
fn malformed_strings_are_syntax_errors() {
    assert!(matches!(
        TokenStream::new(r#""abc"#, None).read_string_literal(),
        Err(TokenError::Syntax { .. })
    ));
    assert!(matches!(
        TokenStream::new(r#""a\qb""#, None).read_string_literal(),
        Err(TokenError::Syntax { position: 2, .. })
    ));
}

#[test]
fn char_literals() {
    let read = |text: &str| {
        TokenStream::new(text, None)
            .read_char_literal()
            .map(|(_, c)| c)
    };
    assert_eq!(read(r"'\n'"), Ok('\n'));
    assert_eq!(read("'x'"), Ok('x'));
    assert_eq!(read(r"'\''"), Ok('\''));
    assert!(read("'xy'").is_err());
    assert!(read("'x").is_err());
}

#[test]
fn negated_read_accepts_the_minimum_magnitude() {
    let mut tokens = TokenStream::new("2147483648 + 1", None);
    let (token, value) = tokens.read_negated_numeric_literal().unwrap();
    assert_eq!((token.text, value), ("2147483648", LiteralValue::Int(i32::MIN)));
    assert_eq!(tokens.position(), 11);

    let mut tokens = TokenStream::new("9223372036854775809L", None);
    assert!(matches!(
        tokens.read_negated_numeric_literal(),
        Err(TokenError::Syntax { .. })
    ));
    assert_eq!(tokens.position(), 0);
}

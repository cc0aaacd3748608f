use jexpr_syntax::{CompletionInfo, TokenError, TokenStream};
use pretty_assertions::assert_eq;

fn caret_info(result: Result<impl std::fmt::Debug, TokenError>) -> CompletionInfo {
    match result {
        Err(TokenError::Caret(info)) => info,
        other => panic!("expected caret signal, got {other:?}"),
    }
}

#[test]
fn identifier_containing_the_caret_reports_its_ranges() {
    let text = "getValue";
    let mut tokens = TokenStream::new(text, Some(3));
    let info = caret_info(tokens.read_identifier());
    assert_eq!(
        info,
        CompletionInfo {
            token_begin: 0,
            token_end: 8,
            text_begin: 0,
            text_end: 8,
            caret: 3,
        }
    );
    assert_eq!(info.prefix(text), "get");
    assert_eq!(info.text(text), "getValue");
}

#[test]
fn identifier_ending_at_the_caret_is_inside() {
    let mut tokens = TokenStream::new("xy", Some(2));
    let info = caret_info(tokens.read_identifier());
    assert_eq!(info.prefix("xy"), "xy");
}

#[test]
fn caret_in_leading_whitespace_requests_an_empty_prefix() {
    let mut tokens = TokenStream::new("a +  b", Some(4));
    tokens.read_identifier().unwrap();
    tokens.read_binary_operator().unwrap();
    assert_eq!(tokens.position(), 4);
    let info = caret_info(tokens.read_identifier());
    assert_eq!((info.token_begin, info.token_end, info.caret), (4, 4, 4));
}

#[test]
fn caret_at_an_empty_token_start_is_not_a_syntax_error() {
    let mut tokens = TokenStream::new("a.", Some(2));
    tokens.read_identifier().unwrap();
    tokens.read_char('.').unwrap();
    let info = caret_info(tokens.read_identifier());
    assert_eq!(info.prefix("a."), "");
}

#[test]
fn operators_own_the_caret_only_strictly_inside() {
    let mut tokens = TokenStream::new("a==", Some(3));
    tokens.read_identifier().unwrap();
    let (token, _) = tokens.read_binary_operator().unwrap();
    assert_eq!(token.text, "==");

    let mut tokens = TokenStream::new("a==", Some(2));
    tokens.read_identifier().unwrap();
    assert!(matches!(
        tokens.read_binary_operator(),
        Err(TokenError::Caret(_))
    ));
}

#[test]
fn string_completion_stops_before_the_next_argument() {
    let text = r#"f("abc "int")"#;
    let mut tokens = TokenStream::new(text, Some(6));
    tokens.read_identifier().unwrap();
    tokens.read_char('(').unwrap();
    let info = caret_info(tokens.read_string_literal());
    assert_eq!(info.token_begin, 2);
    assert_eq!(info.text_begin, 3);
    assert_eq!(info.text_end, 6);
    assert_eq!(info.token_end, 6);
    assert_eq!(info.prefix(text), "abc");
}

#[test]
fn string_completion_inside_an_unterminated_literal() {
    let text = r#"open("src/ma"#;
    let mut tokens = TokenStream::new(text, Some(text.len()));
    tokens.read_identifier().unwrap();
    tokens.read_char('(').unwrap();
    let info = caret_info(tokens.read_string_literal());
    assert_eq!(info.prefix(text), "src/ma");
    assert_eq!(info.token_end, text.len());
}

#[test]
fn reads_without_caret_advance_over_trailing_whitespace() {
    let mut tokens = TokenStream::new("  foo  . bar ", None);
    assert_eq!(tokens.read_identifier().unwrap().text, "foo");
    assert_eq!(tokens.position(), 7);
    assert_eq!(tokens.peek_char(), Some('.'));
    tokens.read_char('.').unwrap();
    assert_eq!(tokens.read_identifier().unwrap().text, "bar");
    assert!(tokens.is_at_end());
}

#[test]
fn keywords_must_match_the_whole_word() {
    let mut tokens = TokenStream::new("newer", None);
    assert!(matches!(
        tokens.read_keyword("new"),
        Err(TokenError::Syntax { position: 0, .. })
    ));
    assert_eq!(tokens.position(), 0);
}

#[test]
fn read_one_of_prefers_the_longest_candidate() {
    let mut tokens = TokenStream::new("<<= 1", None);
    let token = tokens.read_one_of(&["<", "<<", "<<="]).unwrap();
    assert_eq!(token.text, "<<=");
}

#[test]
fn read_until_stops_at_delimiters() {
    let mut tokens = TokenStream::new("{Parent#Child}", None);
    tokens.read_char('{').unwrap();
    assert_eq!(tokens.read_until(&['#', '}']).unwrap().text, "Parent");
    tokens.read_char('#').unwrap();
    assert_eq!(tokens.read_until(&['#', '}']).unwrap().text, "Child");
    tokens.read_char('}').unwrap();
    assert!(tokens.is_at_end());
}

use jexpr_syntax::{BinaryOperator, TokenStream, UnaryOperator, MAX_PRECEDENCE_LEVEL};

#[test]
fn binary_operators_are_read_longest_first() {
    let mut tokens = TokenStream::new("a >>>= 2", None);
    tokens.read_identifier().unwrap();
    assert!(tokens.peek_binary_operator().is_some_and(BinaryOperator::is_assignment));
    let (token, op) = tokens.read_binary_operator().unwrap();
    assert_eq!(token.text, ">>>=");
    assert_eq!(op.precedence_level(), MAX_PRECEDENCE_LEVEL);
}

#[test]
fn unary_operators() {
    let mut tokens = TokenStream::new("--x", None);
    let (_, op) = tokens.read_unary_operator().unwrap();
    assert_eq!(op, UnaryOperator::Decrement);

    let mut tokens = TokenStream::new("!flag", None);
    let (_, op) = tokens.read_unary_operator().unwrap();
    assert_eq!(op, UnaryOperator::LogicalNot);
}

// tests/lexer_tests.rs

use clove_path::ast::Token;
use clove_path::lexer::Lexer;

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut result = vec![];
    loop {
        let token = lexer.next_token().unwrap();
        if token == Token::Eof {
            return result;
        }
        result.push(token);
    }
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("$", Token::Dollar),
        ("@", Token::At),
        (".", Token::Dot),
        ("*", Token::Star),
        ("?", Token::Question),
        ("+", Token::Plus),
        ("-", Token::Minus),
        ("/", Token::Slash),
        ("%", Token::Percent),
        ("^", Token::Caret),
        ("!", Token::Bang),
        ("<", Token::Lt),
        (">", Token::Gt),
        ("(", Token::LParen),
        (")", Token::RParen),
        ("[", Token::LBracket),
        ("]", Token::RBracket),
        (",", Token::Comma),
        (":", Token::Colon),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

// ============================================================================
// Two Character Tokens
// ============================================================================

#[test]
fn test_two_char_tokens() {
    let test_cases = vec![
        ("..", Token::DotDot),
        ("==", Token::EqEq),
        ("!=", Token::NotEq),
        ("<=", Token::LtEq),
        (">=", Token::GtEq),
        ("&&", Token::AndAnd),
        ("||", Token::OrOr),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token().unwrap(), expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_single_equals_is_rejected() {
    let mut lexer = Lexer::new("@.a = 1");
    assert_eq!(lexer.next_token().unwrap(), Token::At);
    assert_eq!(lexer.next_token().unwrap(), Token::Dot);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("a".to_string()));
    let err = lexer.next_token().unwrap_err();
    assert!(err.message.contains("=="));
    assert_eq!(err.consumed, "@.a ");
}

#[test]
fn test_single_ampersand_and_pipe_are_rejected() {
    assert!(Lexer::new("&").next_token().is_err());
    assert!(Lexer::new("|").next_token().is_err());
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_integers() {
    assert_eq!(tokens("0"), vec![Token::Integer(0)]);
    assert_eq!(tokens("42"), vec![Token::Integer(42)]);
    // sign is a separate token
    assert_eq!(tokens("-7"), vec![Token::Minus, Token::Integer(7)]);
}

#[test]
fn test_floats() {
    assert_eq!(tokens("2.75"), vec![Token::Float(2.75)]);
    assert_eq!(tokens("1e3"), vec![Token::Float(1000.0)]);
    assert_eq!(tokens("2.5E-1"), vec![Token::Float(0.25)]);
}

#[test]
fn test_integer_followed_by_dot_is_not_float() {
    assert_eq!(
        tokens("1.a"),
        vec![Token::Integer(1), Token::Dot, Token::Identifier("a".to_string())]
    );
}

#[test]
fn test_integer_overflow() {
    let err = Lexer::new("99999999999999999999").next_token().unwrap_err();
    assert!(err.message.contains("out of range"));
}

#[test]
fn test_float_overflow() {
    let err = Lexer::new("1e999").next_token().unwrap_err();
    assert_eq!(err.message, "Number '1e999' is out of range");
    assert!(clove_path::parse_expression("@.a > 1e999").is_err());
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_quoted_strings() {
    assert_eq!(tokens("'abc'"), vec![Token::String("abc".to_string())]);
    assert_eq!(tokens("\"abc\""), vec![Token::String("abc".to_string())]);
    assert_eq!(tokens("''"), vec![Token::String(String::new())]);
}

#[test]
fn test_string_escapes() {
    assert_eq!(tokens(r"'it\'s'"), vec![Token::String("it's".to_string())]);
    assert_eq!(tokens(r#""say \"hi\"""#), vec![Token::String("say \"hi\"".to_string())]);
    assert_eq!(tokens(r"'a\\b'"), vec![Token::String("a\\b".to_string())]);
    assert_eq!(tokens(r"'\n\t'"), vec![Token::String("\n\t".to_string())]);
    assert_eq!(tokens(r"'é'"), vec![Token::String("é".to_string())]);
}

#[test]
fn test_other_quote_needs_no_escape() {
    assert_eq!(tokens(r#"'say "hi"'"#), vec![Token::String("say \"hi\"".to_string())]);
}

#[test]
fn test_unterminated_string() {
    let err = Lexer::new("'abc").next_token().unwrap_err();
    assert!(err.message.contains("Unterminated"));
}

#[test]
fn test_invalid_escape() {
    assert!(Lexer::new(r"'\q'").next_token().is_err());
    assert!(Lexer::new(r"'\u12'").next_token().is_err());
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_identifiers() {
    assert_eq!(tokens("book"), vec![Token::Identifier("book".to_string())]);
    assert_eq!(tokens("_private1"), vec![Token::Identifier("_private1".to_string())]);
    assert_eq!(tokens("café"), vec![Token::Identifier("café".to_string())]);
}

#[test]
fn test_keywords_are_identifiers() {
    assert_eq!(
        tokens("true false null length"),
        vec![
            Token::Identifier("true".to_string()),
            Token::Identifier("false".to_string()),
            Token::Identifier("null".to_string()),
            Token::Identifier("length".to_string()),
        ]
    );
}

// ============================================================================
// Full inputs
// ============================================================================

#[test]
fn test_filter_path() {
    assert_eq!(
        tokens("$..book[?(@.price < 10)]"),
        vec![
            Token::Dollar,
            Token::DotDot,
            Token::Identifier("book".to_string()),
            Token::LBracket,
            Token::Question,
            Token::LParen,
            Token::At,
            Token::Dot,
            Token::Identifier("price".to_string()),
            Token::Lt,
            Token::Integer(10),
            Token::RParen,
            Token::RBracket,
        ]
    );
}

#[test]
fn test_slice_list() {
    assert_eq!(
        tokens("$[1:-1:2, 0]"),
        vec![
            Token::Dollar,
            Token::LBracket,
            Token::Integer(1),
            Token::Colon,
            Token::Minus,
            Token::Integer(1),
            Token::Colon,
            Token::Integer(2),
            Token::Comma,
            Token::Integer(0),
            Token::RBracket,
        ]
    );
}

#[test]
fn test_unexpected_character() {
    let mut lexer = Lexer::new("$.a#");
    assert_eq!(lexer.next_token().unwrap(), Token::Dollar);
    assert_eq!(lexer.next_token().unwrap(), Token::Dot);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("a".to_string()));
    let err = lexer.next_token().unwrap_err();
    assert_eq!(err.consumed, "$.a");
    assert!(err.message.contains('#'));
}

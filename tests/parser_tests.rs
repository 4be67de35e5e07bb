// tests/parser_tests.rs

use clove_path::{
    ArraySelector, Expr, JsonPath, NameSelector, Operator, PathRef, SearchTarget, Slice, parse,
};

fn ops(text: &str) -> Vec<Operator> {
    parse(text).unwrap().operators().to_vec()
}

fn key(name: &str) -> Operator {
    Operator::Name(NameSelector::Key(name.to_string()))
}

// ============================================================================
// Names
// ============================================================================

#[test]
fn test_root_only() {
    assert!(parse("$").unwrap().is_empty());
    assert!(parse("  $  ").unwrap().is_empty());
}

#[test]
fn test_dotted_names() {
    assert_eq!(ops("$.store.book"), vec![key("store"), key("book")]);
}

#[test]
fn test_quoted_names() {
    assert_eq!(ops("$.'a b'"), vec![key("a b")]);
    assert_eq!(ops("$.\"x.y\""), vec![key("x.y")]);
    assert_eq!(ops(r"$.'it\'s'"), vec![key("it's")]);
}

#[test]
fn test_empty_name() {
    assert_eq!(ops("$.''"), vec![key("")]);
}

#[test]
fn test_bracketed_name() {
    assert_eq!(ops("$['store']['book']"), vec![key("store"), key("book")]);
}

#[test]
fn test_wildcards() {
    assert_eq!(ops("$.*"), vec![Operator::Name(NameSelector::Wildcard)]);
    assert_eq!(ops("$[*]"), vec![Operator::Array(ArraySelector::Wildcard)]);
}

#[test]
fn test_bare_length_is_operator() {
    assert_eq!(ops("$.items.length"), vec![key("items"), Operator::Length]);
}

#[test]
fn test_quoted_length_is_name() {
    assert_eq!(ops("$.'length'"), vec![key("length")]);
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_search_targets() {
    assert_eq!(
        ops("$..author"),
        vec![Operator::Search(SearchTarget::Name(NameSelector::Key("author".to_string())))]
    );
    assert_eq!(
        ops("$..*"),
        vec![Operator::Search(SearchTarget::Name(NameSelector::Wildcard))]
    );
    assert_eq!(ops("$..length"), vec![Operator::Search(SearchTarget::Length)]);
    assert_eq!(
        ops("$..[0]"),
        vec![Operator::Search(SearchTarget::Array(ArraySelector::Slices(vec![
            Slice::Index(0)
        ])))]
    );
}

#[test]
fn test_search_empty_name() {
    assert_eq!(
        ops("$..''"),
        vec![Operator::Search(SearchTarget::Name(NameSelector::Key(String::new())))]
    );
}

// ============================================================================
// Slices
// ============================================================================

#[test]
fn test_index_list() {
    assert_eq!(
        ops("$[0,2,-1]"),
        vec![Operator::Array(ArraySelector::Slices(vec![
            Slice::Index(0),
            Slice::Index(2),
            Slice::Index(-1),
        ]))]
    );
}

#[test]
fn test_ranges() {
    let expected = vec![
        Slice::range(Some(1), Some(3)),
        Slice::range(None, Some(2)),
        Slice::range(Some(-1), None),
        Slice::stepped(None, None, 2),
        Slice::stepped(Some(4), Some(0), -2),
    ];
    assert_eq!(
        ops("$[1:3, :2, -1:, ::2, 4:0:-2]"),
        vec![Operator::Array(ArraySelector::Slices(expected))]
    );
}

#[test]
fn test_mixed_index_and_range() {
    assert_eq!(
        ops("$[1,5:7]"),
        vec![Operator::Array(ArraySelector::Slices(vec![
            Slice::Index(1),
            Slice::range(Some(5), Some(7)),
        ]))]
    );
}

// ============================================================================
// Filter and index expressions
// ============================================================================

#[test]
fn test_filter_bare_property_becomes_has_property() {
    let path = parse("$[?(@.test)]").unwrap();
    assert_eq!(
        path.operators(),
        &[Operator::Array(ArraySelector::Filter(Expr::HasProperty {
            target: PathRef::local(JsonPath::root()),
            name: "test".to_string(),
        }))]
    );
}

#[test]
fn test_index_expression() {
    let path = parse("$.book[(@.length-1)]").unwrap();
    match &path.operators()[1] {
        Operator::Array(ArraySelector::Index(Expr::Binary { left, .. })) => {
            assert_eq!(**left, Expr::Length(PathRef::local(JsonPath::root())));
        }
        other => panic!("unexpected operator {:?}", other),
    }
}

#[test]
fn test_filter_with_nested_parens() {
    let path = parse("$[?((@.a + 1) * 2 > 4)]").unwrap();
    assert_eq!(path.to_string(), "$[?((@.a+1)*2>4)]");
}

#[test]
fn test_filter_on_search() {
    let path = parse("$..[?(@.isbn)]").unwrap();
    assert!(matches!(
        path.operators(),
        [Operator::Search(SearchTarget::Array(ArraySelector::Filter(Expr::HasProperty { .. })))]
    ));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_rejected_paths() {
    for text in ["$[]", "$.", "$..", "$[?()]", "$[1-5]", "", "   ", "store", "$.a.", "$[", "$[0", "$[?(@.a)", "$[?(@.a]", "$.1a", "$[(]", "$[a]", "$x"] {
        assert!(parse(text).is_err(), "expected '{}' to be rejected", text);
    }
}

#[test]
fn test_error_messages() {
    assert_eq!(parse("   ").unwrap_err().message, "Path is empty");
    assert_eq!(parse("$.").unwrap_err().message, "Trailing '.' with no selector");
    assert_eq!(parse("$..").unwrap_err().message, "Trailing '..' with no selector");
    assert_eq!(parse("$[]").unwrap_err().message, "Empty brackets");
    assert_eq!(parse("$[?()]").unwrap_err().message, "Empty expression");
}

#[test]
fn test_error_carries_consumed_prefix() {
    let err = parse("$.store.#").unwrap_err();
    assert_eq!(err.consumed, "$.store.");

    let err = parse("$.store[1-5]").unwrap_err();
    assert_eq!(err.consumed, "$.store[1");
}

#[test]
fn test_from_str() {
    let path: JsonPath = "$.a[0]".parse().unwrap();
    assert_eq!(path, parse("$.a[0]").unwrap());
    assert!("$.".parse::<JsonPath>().is_err());
}

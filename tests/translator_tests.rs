// tests/translator_tests.rs

use clove_path::{
    CurrentArray, EvalError, Expr, HostExpr, JsonPath, ScannedValue, parse, parse_expression,
    parse_filter_expression, translate, translate_filter, translate_index,
};
use serde_json::json;

fn assert_same(captured: HostExpr, text: &str) {
    let translated = translate(&captured).unwrap();
    assert_eq!(translated, parse_expression(text).unwrap());
    assert_eq!(translated.to_string(), text);
}

// ============================================================================
// Structural agreement with the expression parser
// ============================================================================

#[test]
fn test_comparison() {
    assert_same(ScannedValue.name("price").less_than(10), "@.price<10");
    assert_same(ScannedValue.name("n").greater_or_equal(1.5), "@.n>=1.5");
    assert_same(ScannedValue.name("s").not_equals("x"), "@.s!=\"x\"");
}

#[test]
fn test_arithmetic_operators() {
    assert_same((ScannedValue.name("a") + 1) * 2, "(@.a+1)*2");
    assert_same(ScannedValue.name("a") - ScannedValue.name("b") % 3, "@.a-@.b%3");
    assert_same(ScannedValue.name("a") / 4, "@.a/4");
    assert_same(ScannedValue.name("a").pow(2), "@.a^2");
}

#[test]
fn test_nested_names_and_indices() {
    assert_same(ScannedValue.name("a").array_index(0).name("b"), "@.a[0].b");
    assert_same(ScannedValue.name("items").array_index(-1), "@.items[-1]");
}

#[test]
fn test_root_reference() {
    assert_same(
        ScannedValue.name("price").greater_than(HostExpr::root().name("limits").name("max")),
        "@.price>$.limits.max",
    );
}

#[test]
fn test_length_and_index_of() {
    assert_same(CurrentArray.length() - 1, "@.length-1");
    assert_same(ScannedValue.name("tags").length(), "@.tags.length");
    assert_same(
        ScannedValue.name("tags").index_of("x").greater_or_equal(0),
        "@.tags.indexOf(\"x\")>=0",
    );
}

#[test]
fn test_length_member_access() {
    let captured = ScannedValue.name("tags").member("Length");
    assert_eq!(translate(&captured).unwrap(), parse_expression("@.tags.length").unwrap());
}

#[test]
fn test_negation_folds_constants() {
    assert_same(ScannedValue.name("a").greater_than(-HostExpr::from(1)), "@.a>-1");
    assert_same(-ScannedValue.name("a"), "-@.a");
}

#[test]
fn test_literals() {
    assert_same(ScannedValue.name("a").equals(HostExpr::constant(json!(null))), "@.a==null");
    assert_same(ScannedValue.name("s").equals(String::from("q")), "@.s==\"q\"");
}

#[test]
fn test_conversion_is_transparent() {
    let captured = ScannedValue.name("a").convert().less_than(3);
    let translated = translate(&captured).unwrap();
    assert!(matches!(
        &translated,
        Expr::Binary { left, .. } if matches!(**left, Expr::Conversion(_))
    ));
    assert_eq!(translated.to_string(), "@.a<3");
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_filter_rewrite_matches_parser() {
    let captured = ScannedValue.name("isbn").and(!ScannedValue.name("sold"));
    assert_eq!(
        translate_filter(&captured).unwrap(),
        parse_filter_expression("@.isbn && !@.sold").unwrap()
    );
    assert_eq!(
        translate_filter(&ScannedValue.name("isbn")).unwrap(),
        parse_filter_expression("@.isbn").unwrap()
    );
}

#[test]
fn test_explicit_has_property() {
    assert_eq!(
        translate(&ScannedValue.has_property("isbn")).unwrap(),
        parse_filter_expression("@.isbn").unwrap()
    );
}

#[test]
fn test_filter_with_matches_text() {
    let built = JsonPath::root()
        .search("book")
        .filter_with(|book| book.name("price").less_than(10).or(book.has_property("isbn")))
        .unwrap();
    assert_eq!(built, parse("$..book[?(@.price<10||@.isbn)]").unwrap());
}

#[test]
fn test_index_with_matches_text() {
    let built = JsonPath::root().search("book").index_with(|books| books.length() - 1).unwrap();
    assert_eq!(built, parse("$..book[(@.length-1)]").unwrap());
}

#[test]
fn test_index_with_rewrites_boolean_operands() {
    let built = JsonPath::root()
        .name("a")
        .index_with(|items| items.name("x").and(items.name("y")).equals(true))
        .unwrap();
    assert_eq!(built.to_string(), "$.a[((@.x&&@.y)==true)]");
    assert_eq!(built, parse("$.a[((@.x&&@.y)==true)]").unwrap());
}

#[test]
fn test_translate_index_keeps_value_positions() {
    assert_eq!(
        translate_index(&(CurrentArray.name("n") + 1)).unwrap(),
        parse_expression("@.n+1").unwrap()
    );
}

#[test]
fn test_search_filter_with_matches_text() {
    let built = JsonPath::root()
        .search_filter_with(|item| item.name("price").greater_than(20))
        .unwrap();
    assert_eq!(built, parse("$..[?(@.price>20)]").unwrap());
}

#[test]
fn test_translated_filter_evaluates() {
    let doc = json!({"items": [{"n": 1}, {"n": 5}, {"n": 9}]});
    let path = JsonPath::root()
        .name("items")
        .filter_with(|item| item.name("n").greater_than(2).and(item.name("n").less_than(8)))
        .unwrap()
        .name("n");
    assert_eq!(path.evaluate(&doc).unwrap(), vec![json!(5)]);
}

// ============================================================================
// Unsupported input
// ============================================================================

#[test]
fn test_unknown_method_is_rejected() {
    let captured = ScannedValue.name("s").call("ToUpper", vec![]);
    assert!(matches!(translate(&captured), Err(EvalError::UnsupportedExpression(_))));
}

#[test]
fn test_unknown_member_is_rejected() {
    let captured = ScannedValue.name("s").member("Count");
    assert!(matches!(translate(&captured), Err(EvalError::UnsupportedExpression(_))));
}

#[test]
fn test_coalesce_is_rejected() {
    let captured = ScannedValue.name("a").coalesce(0);
    assert!(matches!(translate(&captured), Err(EvalError::UnsupportedExpression(_))));
}

#[test]
fn test_path_method_on_computed_value_is_rejected() {
    let captured = (ScannedValue.name("a") + 1).name("b");
    assert!(matches!(translate(&captured), Err(EvalError::UnsupportedExpression(_))));
}

#[test]
fn test_length_inside_path_is_rejected() {
    let captured = ScannedValue.name("a").length().name("b");
    assert!(matches!(translate(&captured), Err(EvalError::UnsupportedExpression(_))));
}

#[test]
fn test_container_constants_are_rejected() {
    let array = ScannedValue.name("a").equals(HostExpr::constant(json!([1, 2])));
    assert_eq!(translate(&array), Err(EvalError::InvalidLiteral("array")));

    let object = ScannedValue.name("a").equals(HostExpr::constant(json!({"k": 1})));
    assert_eq!(translate(&object), Err(EvalError::InvalidLiteral("object")));
}

#[test]
fn test_has_property_in_value_position_is_rejected() {
    let sum = ScannedValue.has_property("a") + 1;
    assert!(matches!(
        translate_filter(&sum.equals(2)),
        Err(EvalError::UnsupportedExpression(_))
    ));

    let compared = ScannedValue.has_property("a").equals(ScannedValue.has_property("b"));
    assert!(matches!(translate_filter(&compared), Err(EvalError::UnsupportedExpression(_))));

    let indexed = CurrentArray.has_property("n").less_than(3);
    assert!(matches!(translate_index(&indexed), Err(EvalError::UnsupportedExpression(_))));

    let result = JsonPath::root().filter_with(|item| (item.has_property("a") + 1).equals(2));
    assert!(result.is_err());
}

#[test]
fn test_has_property_in_boolean_position_is_accepted() {
    let accepted = [
        ScannedValue.has_property("a"),
        !ScannedValue.has_property("a"),
        ScannedValue.has_property("a").and(ScannedValue.name("b").greater_than(1)),
        ScannedValue.has_property("a").equals(false),
    ];
    for captured in accepted {
        let translated = translate_filter(&captured).unwrap();
        assert_eq!(parse_filter_expression(&translated.to_string()).unwrap(), translated);
    }
}

#[test]
fn test_builder_propagates_translation_errors() {
    let result = JsonPath::root().filter_with(|item| item.name("a").coalesce(1));
    assert!(result.is_err());
}

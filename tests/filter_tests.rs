//! Filter expression semantics
//!
//! Comparison rules over the value-or-Nothing domain, logical operator
//! precedence, negation, and queries embedded in filters.

use jsonpath_core::compile;
use serde_json::{json, Value};

fn select(query: &str, doc: &Value) -> Vec<Value> {
    compile(query)
        .unwrap_or_else(|err| panic!("'{query}' should compile: {err}"))
        .evaluate(doc)
        .unwrap_or_else(|err| panic!("'{query}' should evaluate: {err}"))
        .values()
        .into_iter()
        .cloned()
        .collect()
}

fn selects_member(query: &str, doc: &Value) -> bool {
    !select(query, doc).is_empty()
}

mod nothing_semantics {
    use super::*;

    #[test]
    fn missing_equals_missing() {
        // Both sides evaluate to Nothing, and Nothing == Nothing
        let doc = json!({"item": {}});
        assert!(selects_member("$[?@.missing == @.alsoMissing]", &doc));
        assert!(!selects_member("$[?@.missing != @.alsoMissing]", &doc));
    }

    #[test]
    fn nothing_is_not_null() {
        let doc = json!({"item": {"a": null}});
        assert!(!selects_member("$[?@.a == @.missing]", &doc));
        assert!(selects_member("$[?@.a != @.missing]", &doc));
        assert!(selects_member("$[?@.a == null]", &doc));
    }

    #[test]
    fn nothing_never_orders() {
        let doc = json!({"item": {"a": 1}});
        assert!(!selects_member("$[?@.missing < @.a]", &doc));
        assert!(!selects_member("$[?@.missing <= @.a]", &doc));
        assert!(!selects_member("$[?@.a > @.missing]", &doc));
        assert!(!selects_member("$[?@.missing >= @.missing]", &doc));
    }

    #[test]
    fn existence_test_is_not_truthiness() {
        // false and null still exist
        let doc = json!({"f": {"flag": false}, "n": {"flag": null}});
        let selected = select("$[?@.flag]", &doc);
        assert_eq!(selected.len(), 2);
    }
}

mod comparison_rules {
    use super::*;

    #[test]
    fn integer_and_float_representations_compare_numerically() {
        let doc = json!({"item": {"a": 1}});
        assert!(selects_member("$[?@.a == 1.0]", &doc));
        assert!(selects_member("$[?@.a <= 1.0]", &doc));
        assert!(!selects_member("$[?@.a < 1.0]", &doc));
    }

    #[test]
    fn string_comparison_is_code_point_order() {
        let doc = json!({"w": [{"n": "a"}, {"n": "b"}, {"n": "\u{00e9}"}]});
        assert_eq!(select("$.w[?@.n < 'b']", &doc), vec![json!({"n": "a"})]);
        // 'é' (U+00E9) sorts after 'z' (U+007A)
        assert_eq!(
            select("$.w[?@.n > 'z']", &doc),
            vec![json!({"n": "\u{00e9}"})]
        );
    }

    #[test]
    fn cross_type_ordering_is_false() {
        let doc = json!({"item": {"s": "1", "n": 1, "b": true}});
        assert!(!selects_member("$[?@.s < @.n]", &doc));
        assert!(!selects_member("$[?@.n < @.s]", &doc));
        assert!(!selects_member("$[?@.b < true]", &doc));
        assert!(selects_member("$[?@.b == true]", &doc));
        assert!(!selects_member("$[?@.s == @.n]", &doc));
    }

    #[test]
    fn deep_equality_of_structures() {
        let doc = json!({
            "x": [1, 2],
            "deep": {"a": [1, 2], "b": [2, 1], "o": {"k": [1, 2]}}
        });
        // only `a` matches: `b` differs in element order, `o` is an object
        let matched = select("$.deep[?@ == $.x]", &doc);
        assert_eq!(matched, vec![json!([1, 2])]);
        // object equality is unordered key/value equality
        let doc = json!({"x": {"p": 1, "q": 2}, "o": {"i": {"q": 2, "p": 1}}});
        assert!(selects_member("$.o[?@ == $.x]", &doc));
    }

    #[test]
    fn boolean_and_null_only_support_equality() {
        let doc = json!({"item": {"b": false, "n": null}});
        assert!(selects_member("$[?@.b == false]", &doc));
        assert!(selects_member("$[?@.n == null]", &doc));
        assert!(!selects_member("$[?@.n < null]", &doc));
        assert!(selects_member("$[?@.n <= null]", &doc));
    }
}

mod logic {
    use super::*;

    #[test]
    fn and_binds_tighter_than_or() {
        let doc = json!({
            "only_a": {"a": 1},
            "b_and_c": {"b": 2, "c": 3},
            "only_b": {"b": 2}
        });
        let selected = select("$[?@.a == 1 || @.b == 2 && @.c == 3]", &doc);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0], json!({"a": 1}));
        assert_eq!(selected[1], json!({"b": 2, "c": 3}));
    }

    #[test]
    fn parentheses_override_precedence() {
        let doc = json!({
            "only_a": {"a": 1},
            "b_and_c": {"b": 2, "c": 3},
            "only_b": {"b": 2}
        });
        // (a || b) && c keeps only the member with c
        let selected = select("$[?(@.a == 1 || @.b == 2) && @.c == 3]", &doc);
        assert_eq!(selected, vec![json!({"b": 2, "c": 3})]);
    }

    #[test]
    fn negated_test_and_negated_group_agree() {
        let doc = json!({"with_a": {"a": 1}, "without_a": {"b": 2}});
        assert_eq!(select("$[?!@.a]", &doc), vec![json!({"b": 2})]);
        assert_eq!(select("$[?!(@.a == 1)]", &doc), vec![json!({"b": 2})]);
    }

    #[test]
    fn filter_applies_to_array_elements() {
        let doc = json!([1, 2, 3, 4]);
        assert_eq!(select("$[?@ > 2]", &doc), vec![json!(3), json!(4)]);
    }

    #[test]
    fn filter_on_primitive_selects_nothing() {
        let doc = json!({"s": "text", "n": 5});
        assert!(select("$.s[?@]", &doc).is_empty());
        assert!(select("$.n[?@]", &doc).is_empty());
    }
}

mod embedded_queries {
    use super::*;

    #[test]
    fn absolute_query_reads_the_document_root() {
        let doc = json!({"limit": 10, "items": [{"v": 5}, {"v": 15}]});
        assert_eq!(
            select("$.items[?@.v < $.limit]", &doc),
            vec![json!({"v": 5})]
        );
    }

    #[test]
    fn nested_filter_queries() {
        let doc = json!({
            "k1": {"b": [{"x": 1}]},
            "k2": {"b": [{"x": 2}]}
        });
        assert_eq!(
            select("$[?@.b[?@.x == 1]]", &doc),
            vec![json!({"b": [{"x": 1}]})]
        );
    }

    #[test]
    fn descendant_query_as_existence_test() {
        let doc = json!({
            "has": {"deep": {"x": 1}},
            "lacks": {"deep": {"y": 2}}
        });
        assert_eq!(select("$[?@..x]", &doc), vec![json!({"deep": {"x": 1}})]);
    }

    #[test]
    fn filter_inside_descendant_segment() {
        let doc = json!({"a": [{"p": 1}], "b": {"c": [{"p": 2}]}});
        let selected = select("$..[?@.p > 0]", &doc);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0], json!({"p": 1}));
        assert_eq!(selected[1], json!({"p": 2}));
    }
}

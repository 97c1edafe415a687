//! Evaluator tests
//!
//! End-to-end query scenarios over an in-memory document: selector
//! semantics, document order, duplicate preservation, and determinism.

use jsonpath_core::{compile, enumerate_nodes};
use serde_json::{json, Value};

fn bookstore() -> Value {
    json!({ "store": { "book": [
        { "category": "ref", "price": 8.95, "title": "A" },
        { "category": "fic", "price": 12.99, "title": "B" },
        { "category": "fic", "price": 22.99, "title": "C" }
    ]}})
}

fn values_of(query: &str, doc: &Value) -> Vec<Value> {
    compile(query)
        .unwrap_or_else(|err| panic!("'{query}' should compile: {err}"))
        .evaluate(doc)
        .unwrap_or_else(|err| panic!("'{query}' should evaluate: {err}"))
        .values()
        .into_iter()
        .cloned()
        .collect()
}

fn paths_of(query: &str, doc: &Value) -> Vec<String> {
    compile(query)
        .unwrap_or_else(|err| panic!("'{query}' should compile: {err}"))
        .evaluate(doc)
        .unwrap_or_else(|err| panic!("'{query}' should evaluate: {err}"))
        .paths()
}

mod bookstore_scenarios {
    use super::*;

    #[test]
    fn wildcard_titles() {
        let doc = bookstore();
        assert_eq!(
            values_of("$.store.book[*].title", &doc),
            vec![json!("A"), json!("B"), json!("C")]
        );
        assert_eq!(
            paths_of("$.store.book[*].title", &doc),
            vec![
                "$['store']['book'][0]['title']",
                "$['store']['book'][1]['title']",
                "$['store']['book'][2]['title']",
            ]
        );
    }

    #[test]
    fn filter_on_price() {
        let doc = bookstore();
        assert_eq!(
            values_of("$.store.book[?@.price < 10].title", &doc),
            vec![json!("A")]
        );
    }

    #[test]
    fn descendant_prices_in_document_order() {
        let doc = bookstore();
        assert_eq!(
            values_of("$..price", &doc),
            vec![json!(8.95), json!(12.99), json!(22.99)]
        );
    }

    #[test]
    fn filter_on_category_keeps_index_order() {
        let doc = bookstore();
        let nodes = compile("$.store.book[?@.category == \"fic\"]")
            .expect("valid query")
            .evaluate(&doc)
            .expect("evaluates");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes.get(0).map(|n| n.path().to_string()).as_deref(),
            Some("$['store']['book'][1]"));
        assert_eq!(nodes.values()[0]["title"], json!("B"));
        assert_eq!(nodes.values()[1]["title"], json!("C"));
    }

    #[test]
    fn negative_index_selects_last() {
        let doc = bookstore();
        assert_eq!(values_of("$.store.book[-1].title", &doc), vec![json!("C")]);
    }

    #[test]
    fn stepped_slice() {
        let doc = bookstore();
        assert_eq!(
            values_of("$.store.book[0:3:2].title", &doc),
            vec![json!("A"), json!("C")]
        );
    }
}

mod root_and_order {
    use super::*;

    #[test]
    fn bare_root_selects_the_document() {
        let doc = bookstore();
        let nodes = compile("$").expect("valid").evaluate(&doc).expect("evaluates");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes.paths(), vec!["$"]);
        assert!(std::ptr::eq(nodes.values()[0], &doc));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let doc = bookstore();
        let compiled = compile("$..*").expect("valid");
        let first = compiled.evaluate(&doc).expect("evaluates");
        let second = compiled.evaluate(&doc).expect("evaluates");
        assert_eq!(first.paths(), second.paths());
        assert_eq!(first.values(), second.values());
    }

    #[test]
    fn descendant_wildcard_covers_every_non_root_node_once() {
        let doc = bookstore();
        let all = compile("$..*").expect("valid").evaluate(&doc).expect("evaluates");
        let enumerated = enumerate_nodes(&doc);

        let mut from_query: Vec<String> = all.paths();
        let mut from_enumeration: Vec<String> = enumerated
            .iter()
            .filter(|node| !node.path().is_root())
            .map(|node| node.path().to_string())
            .collect();
        assert_eq!(from_query.len(), from_enumeration.len());
        from_query.sort();
        from_enumeration.sort();
        assert_eq!(from_query, from_enumeration);
    }

    #[test]
    fn normalized_paths_resolve_to_the_same_reference() {
        let doc = bookstore();
        let nodes = compile("$..*").expect("valid").evaluate(&doc).expect("evaluates");
        for node in &nodes {
            let resolved = node
                .path()
                .resolve(&doc)
                .unwrap_or_else(|| panic!("{} should resolve", node.path()));
            assert!(
                std::ptr::eq(resolved, node.value()),
                "{} resolved to a different value",
                node.path()
            );
        }
    }

    #[test]
    fn normalized_paths_round_trip_through_compile() {
        let doc = bookstore();
        let nodes = compile("$..*").expect("valid").evaluate(&doc).expect("evaluates");
        for node in &nodes {
            let canonical = node.path().to_string();
            let reparsed = compile(&canonical)
                .unwrap_or_else(|err| panic!("'{canonical}' should compile: {err}"));
            let singleton = reparsed.evaluate(&doc).expect("evaluates");
            assert_eq!(singleton.len(), 1, "'{canonical}' should select one node");
            assert_eq!(singleton.paths(), vec![canonical]);
            assert!(std::ptr::eq(singleton.values()[0], node.value()));
        }
    }

    #[test]
    fn whitespace_insertion_preserves_results() {
        let doc = bookstore();
        let compact = "$.store.book[?@.price<10].title";
        let spaced = "$ . store . book [ ? @ . price < 10 ] . title";
        assert_eq!(values_of(compact, &doc), values_of(spaced, &doc));
        assert_eq!(paths_of(compact, &doc), paths_of(spaced, &doc));
    }
}

mod boundary_behaviors {
    use super::*;

    #[test]
    fn empty_containers_yield_empty_nodelists() {
        let doc = json!({"a": {}, "b": []});
        assert!(values_of("$.a.*", &doc).is_empty());
        assert!(values_of("$.b[*]", &doc).is_empty());
        assert!(values_of("$.a[?@ == 1]", &doc).is_empty());
        assert!(values_of("$.b[?@ == 1]", &doc).is_empty());
        // ..* sees the two members themselves, nothing below them
        assert_eq!(values_of("$..*", &doc), vec![json!({}), json!([])]);
    }

    #[test]
    fn negative_index_at_and_beyond_minus_len() {
        let doc = json!([10, 20, 30]);
        assert_eq!(values_of("$[-3]", &doc), vec![json!(10)]);
        assert!(values_of("$[-4]", &doc).is_empty());
        assert!(values_of("$[3]", &doc).is_empty());
    }

    #[test]
    fn index_on_non_array_selects_nothing() {
        let doc = json!({"0": "zero"});
        assert!(values_of("$[0]", &doc).is_empty());
        assert!(values_of("$.a", &json!([1, 2])).is_empty());
    }

    #[test]
    fn degenerate_slices() {
        let doc = json!([0, 1, 2, 3, 4, 5]);
        assert!(values_of("$[3:1]", &doc).is_empty());
        assert!(values_of("$[1:3:-1]", &doc).is_empty());
        assert_eq!(values_of("$[5:1:-2]", &doc), vec![json!(5), json!(3)]);
        assert_eq!(
            values_of("$[::-1]", &doc),
            vec![json!(5), json!(4), json!(3), json!(2), json!(1), json!(0)]
        );
        assert!(values_of("$[:]", &json!([])).is_empty());
        assert_eq!(values_of("$[-100:100]", &doc).len(), 6);
    }

    #[test]
    fn duplicate_selectors_preserve_duplicates() {
        let doc = json!({"a": 1});
        let paths = paths_of("$['a', 'a']", &doc);
        assert_eq!(paths, vec!["$['a']", "$['a']"]);
    }

    #[test]
    fn union_results_follow_selector_order_per_node() {
        let doc = json!([0, 1, 2]);
        assert_eq!(
            values_of("$[2, 0, 1]", &doc),
            vec![json!(2), json!(0), json!(1)]
        );
    }

    #[test]
    fn descendant_segment_visits_preorder() {
        let doc = json!({"o": {"j": 1, "k": 2}, "p": [3, {"j": 4}]});
        assert_eq!(
            values_of("$..j", &doc),
            vec![json!(1), json!(4)]
        );
        assert_eq!(
            paths_of("$..j", &doc),
            vec!["$['o']['j']", "$['p'][1]['j']"]
        );
    }

    #[test]
    fn descendant_emission_order_matches_visit_order() {
        let doc = json!({"a": {"b": {"c": 1}}, "d": 2});
        assert_eq!(
            paths_of("$..*", &doc),
            vec![
                "$['a']",
                "$['d']",
                "$['a']['b']",
                "$['a']['b']['c']",
            ]
        );
    }

    #[test]
    fn shorthand_keyword_members() {
        let doc = json!({"true": 1, "null": 2});
        assert_eq!(values_of("$.true", &doc), vec![json!(1)]);
        assert_eq!(values_of("$.null", &doc), vec![json!(2)]);
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        // 10k-deep array nesting exercises the explicit descendant stack
        let mut doc = json!(1);
        for _ in 0..10_000 {
            doc = json!([doc]);
        }
        let nodes = compile("$..*").expect("valid").evaluate(&doc).expect("evaluates");
        assert_eq!(nodes.len(), 10_000);
    }
}

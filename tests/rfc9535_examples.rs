//! RFC 9535 worked examples
//!
//! Table-driven coverage of the queries from RFC 9535 sections 1.5 and
//! 2.3, run against the specification's own fixtures.

use jsonpath_core::compile;
use serde_json::{json, Value};

/// The bookstore document of RFC 9535 section 1.5.
fn rfc_store() -> Value {
    json!({ "store": {
        "book": [
            { "category": "reference", "author": "Nigel Rees",
              "title": "Sayings of the Century", "price": 8.95 },
            { "category": "fiction", "author": "Evelyn Waugh",
              "title": "Sword of Honour", "price": 12.99 },
            { "category": "fiction", "author": "Herman Melville",
              "title": "Moby Dick", "isbn": "0-553-21311-3", "price": 8.99 },
            { "category": "fiction", "author": "J. R. R. Tolkien",
              "title": "The Lord of the Rings", "isbn": "0-395-19395-8",
              "price": 22.99 }
        ],
        "bicycle": { "color": "red", "price": 19.95 }
    }})
}

fn count_of(query: &str, doc: &Value) -> usize {
    compile(query)
        .unwrap_or_else(|err| panic!("'{query}' should compile: {err}"))
        .evaluate(doc)
        .unwrap_or_else(|err| panic!("'{query}' should evaluate: {err}"))
        .len()
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

mod section_1_5_examples {
    use super::*;

    #[test]
    fn result_counts_match_the_rfc_table() {
        let doc = rfc_store();
        let cases = vec![
            ("$.store.book[*].author", 4),
            ("$..author", 4),
            ("$.store.*", 2),
            ("$.store..price", 5),
            ("$..book[2]", 1),
            ("$..book[-1]", 1),
            ("$..book[0,1]", 2),
            ("$..book[:2]", 2),
            ("$..book[?@.isbn]", 2),
            ("$..book[?@.price<10]", 2),
            ("$..*", 27),
        ];
        for (query, expected) in cases {
            assert_eq!(
                count_of(query, &doc),
                expected,
                "unexpected node count for {query}"
            );
        }
    }

    #[test]
    fn authors_in_document_order() {
        let doc = rfc_store();
        assert_eq!(
            values_of("$..author", &doc),
            vec![
                json!("Nigel Rees"),
                json!("Evelyn Waugh"),
                json!("Herman Melville"),
                json!("J. R. R. Tolkien"),
            ]
        );
    }

    #[test]
    fn store_prices_include_the_bicycle_last() {
        let doc = rfc_store();
        assert_eq!(
            values_of("$.store..price", &doc),
            vec![
                json!(8.95),
                json!(12.99),
                json!(8.99),
                json!(22.99),
                json!(19.95),
            ]
        );
    }

    #[test]
    fn third_book_by_index() {
        let doc = rfc_store();
        let selected = values_of("$..book[2]", &doc);
        assert_eq!(selected[0]["title"], json!("Moby Dick"));
    }

    #[test]
    fn books_with_isbn() {
        let doc = rfc_store();
        let selected = values_of("$..book[?@.isbn]", &doc);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0]["title"], json!("Moby Dick"));
        assert_eq!(selected[1]["title"], json!("The Lord of the Rings"));
    }

    #[test]
    fn cheap_books() {
        let doc = rfc_store();
        let selected = values_of("$..book[?@.price<10]", &doc);
        assert_eq!(selected[0]["title"], json!("Sayings of the Century"));
        assert_eq!(selected[1]["title"], json!("Moby Dick"));
    }
}

mod section_2_3_slices {
    use super::*;

    #[test]
    fn slice_table() {
        let doc = json!(["a", "b", "c", "d", "e", "f", "g"]);
        let cases = vec![
            ("$[1:3]", vec!["b", "c"]),
            ("$[5:]", vec!["f", "g"]),
            ("$[:2]", vec!["a", "b"]),
            ("$[1:5:2]", vec!["b", "d"]),
            ("$[5:1:-2]", vec!["f", "d"]),
            ("$[::-1]", vec!["g", "f", "e", "d", "c", "b", "a"]),
            ("$[:]", vec!["a", "b", "c", "d", "e", "f", "g"]),
            ("$[::2]", vec!["a", "c", "e", "g"]),
            ("$[-2:]", vec!["f", "g"]),
            ("$[:-5]", vec!["a", "b"]),
            ("$[10:20]", vec![]),
            ("$[-20:-10]", vec![]),
        ];
        for (query, expected) in cases {
            let expected: Vec<Value> = expected.into_iter().map(Value::from).collect();
            assert_eq!(values_of(query, &doc), expected, "wrong slice for {query}");
        }
    }
}

mod section_2_3_5_comparisons {
    use super::*;

    /// RFC 9535 section 2.3.5.3 comparison table, expressed as filters
    /// over a two-member object so each comparison selects both members
    /// (true) or neither (false).
    #[test]
    fn comparison_table() {
        let doc = json!({"obj": {"x": "y"}, "arr": [2, 3]});
        let cases = vec![
            ("$[?$.absent1 == $.absent2]", true),
            ("$[?$.absent1 <= $.absent2]", true),
            ("$[?$.absent == 'g']", false),
            ("$[?$.absent1 != $.absent2]", false),
            ("$[?$.absent != 'g']", true),
            ("$[?1 <= 2]", true),
            ("$[?1 > 2]", false),
            ("$[?13 == '13']", false),
            ("$[?'a' <= 'b']", true),
            ("$[?'a' > 'b']", false),
            ("$[?$.obj == $.arr]", false),
            ("$[?$.obj != $.arr]", true),
            ("$[?$.obj == $.obj]", true),
            ("$[?$.obj != $.obj]", false),
            ("$[?$.arr == $.arr]", true),
            ("$[?$.arr != $.arr]", false),
            ("$[?$.obj == 17]", false),
            ("$[?$.obj != 17]", true),
            ("$[?$.obj <= $.arr]", false),
            ("$[?$.obj < $.arr]", false),
            ("$[?$.obj <= $.obj]", true),
            ("$[?$.arr <= $.arr]", true),
            ("$[?1 <= $.arr]", false),
            ("$[?1 >= $.arr]", false),
            ("$[?1 > $.arr]", false),
            ("$[?1 < $.arr]", false),
            ("$[?true <= true]", true),
            ("$[?true > true]", false),
        ];
        for (query, expected) in cases {
            let selected = count_of(query, &doc);
            let holds = selected == 2;
            assert_eq!(
                holds, expected,
                "comparison {query} should be {expected}, selected {selected}"
            );
        }
    }
}

mod section_2_5_2_descendants {
    use super::*;

    #[test]
    fn descendant_segment_example() {
        let doc = json!({"o": {"j": 1, "k": 2}, "p": [5, 3, [{"j": 4}, {"k": 6}]]});
        assert_eq!(values_of("$..j", &doc), vec![json!(1), json!(4)]);
        assert_eq!(values_of("$..[0]", &doc), vec![json!(5), json!({"j": 4})]);
        assert_eq!(count_of("$..*", &doc), 11);
    }

    #[test]
    fn wildcard_over_object_and_array() {
        let doc = json!({"o": {"j": 1, "k": 2}, "a": [5, 3]});
        assert_eq!(count_of("$.o[*]", &doc), 2);
        assert_eq!(count_of("$[*]", &doc), 2);
        assert_eq!(values_of("$.a[*]", &doc), vec![json!(5), json!(3)]);
    }
}

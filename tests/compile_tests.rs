// tests/compile_tests.rs

use mongo_search_query::{
    Comparator, Document, LogicalOp, Node, ObjectId, Value, compile, output::to_extended_json,
    parse, run,
};
use serde_json::json;

fn compile_json(query: &str) -> serde_json::Value {
    to_extended_json(&run(query).unwrap())
}

fn doc(pairs: Vec<(&str, Value)>) -> Document {
    pairs.into_iter().collect()
}

// ============================================================================
// Fields
// ============================================================================

#[test]
fn test_field() {
    assert_eq!(compile_json("level:error"), json!({ "level": "error" }));
}

#[test]
fn test_field_document() {
    let compiled = compile(&parse("user.name:Tobi").unwrap());
    assert_eq!(compiled, doc(vec![("user.name", Value::from("Tobi"))]));
}

#[test]
fn test_bare_field() {
    assert_eq!(compile_json("failed"), json!({ "failed": true }));
}

#[test]
fn test_number() {
    assert_eq!(compile_json("count:5.2"), json!({ "count": 5.2 }));
    assert_eq!(
        run("count:5").unwrap().get("count"),
        Some(&Value::Double(5.0))
    );
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_or() {
    let expected = json!({ "$or": [{ "level": "error" }, { "level": "alert" }] });
    assert_eq!(compile_json("level:error OR level:alert"), expected);
    assert_eq!(compile_json("level: error OR level: alert"), expected);
}

#[test]
fn test_nested() {
    assert_eq!(
        compile_json("(level:error AND type:upload) OR type:alert"),
        json!({
            "$or": [
                { "$and": [{ "level": "error" }, { "type": "upload" }] },
                { "type": "alert" }
            ]
        })
    );
}

#[test]
fn test_nested_numbers() {
    assert_eq!(
        compile_json("(a:1 AND b:2) OR c:3"),
        json!({ "$or": [{ "$and": [{ "a": 1 }, { "b": 2 }] }, { "c": 3 }] })
    );
}

#[test]
fn test_right_nesting() {
    assert_eq!(
        compile_json("a:1 OR b:2 OR c:3"),
        json!({ "$or": [{ "a": 1 }, { "$or": [{ "b": 2 }, { "c": 3 }] }] })
    );
}

#[test]
fn test_compile_hand_built_tree() {
    let tree = Node::op(
        LogicalOp::And,
        Node::compare("age", Comparator::Gte, 18.0),
        Node::field("active", true),
    );
    assert_eq!(
        to_extended_json(&compile(&tree)),
        json!({ "$and": [{ "age": { "$gte": 18 } }, { "active": true }] })
    );
}

// ============================================================================
// Comparison
// ============================================================================

#[test]
fn test_comparators() {
    let test_cases = vec![
        ("level>5", "$gt"),
        ("level > 5", "$gt"),
        ("level>=5", "$gte"),
        ("level >= 5", "$gte"),
        ("level<5", "$lt"),
        ("level < 5", "$lt"),
        ("level<=5", "$lte"),
        ("level <= 5", "$lte"),
        ("level!=5", "$ne"),
        ("level != 5", "$ne"),
    ];

    for (input, key) in test_cases {
        assert_eq!(
            compile_json(input),
            json!({ "level": { key: 5 } }),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_comparators_nested() {
    assert_eq!(
        compile_json("(age > 20 AND age < 50) OR gender:male"),
        json!({
            "$or": [
                { "$and": [{ "age": { "$gt": 20 } }, { "age": { "$lt": 50 } }] },
                { "gender": "male" }
            ]
        })
    );
}

#[test]
fn test_date_comparison() {
    assert_eq!(
        compile_json(r#"created > "2024-05-01T00:00:00Z""#),
        json!({ "created": { "$gt": { "$date": "2024-05-01T00:00:00.000Z" } } })
    );
}

// ============================================================================
// Regular expressions
// ============================================================================

#[test]
fn test_case_insensitive_regex() {
    assert_eq!(
        compile_json("(hostname:/^regex value.*/i)"),
        json!({ "hostname": { "$regex": "^regex value.*", "$options": "i" } })
    );
}

#[test]
fn test_regex_document_value() {
    let compiled = run("hostname:/^v.*/i").unwrap();
    match compiled.get("hostname") {
        Some(Value::Regex(pattern)) => {
            assert_eq!(pattern.source(), "^v.*");
            assert!(pattern.is_case_insensitive());
        }
        other => panic!("Expected regex, got {:?}", other),
    }
}

#[test]
fn test_wildcard_source() {
    assert_eq!(
        compile_json("hostname:api-*"),
        json!({ "hostname": { "$regex": "^api-.*$", "$options": "" } })
    );
    assert_eq!(
        compile_json("version:v1.2*"),
        json!({ "version": { "$regex": "^v1\\.2.*$", "$options": "" } })
    );
}

#[test]
fn test_overflowing_number() {
    assert_eq!(compile_json("count:1e400"), json!({ "count": "1e400" }));
}

// ============================================================================
// Aggregate variables
// ============================================================================

#[test]
fn test_aggregate_regex_match() {
    assert_eq!(
        compile_json("($$companies.name:/^name.*/i AND $$companies.vat:/^vat.*/i)"),
        json!({
            "$and": [
                {
                    "$regexMatch": {
                        "input": "$$companies.name",
                        "regex": { "$regex": "^name.*", "$options": "i" }
                    }
                },
                {
                    "$regexMatch": {
                        "input": "$$companies.vat",
                        "regex": { "$regex": "^vat.*", "$options": "i" }
                    }
                }
            ]
        })
    );
}

#[test]
fn test_aggregate_equality() {
    assert_eq!(
        compile_json("($$companies.name:name AND $$companies.vat:vat)"),
        json!({
            "$and": [
                { "$eq": ["$$companies.name", "name"] },
                { "$eq": ["$$companies.vat", "vat"] }
            ]
        })
    );
}

#[test]
fn test_aggregate_comparators() {
    assert_eq!(
        compile_json("$$companies.name == name"),
        json!({ "$eq": ["$$companies.name", "name"] })
    );
    assert_eq!(
        compile_json("$$companies.name != name"),
        json!({ "$ne": ["$$companies.name", "name"] })
    );
    assert_eq!(
        compile_json("$$a.n < 5"),
        json!({ "$lt": ["$$a.n", 5] })
    );
}

#[test]
fn test_aggregate_document_shape() {
    let compiled = run("$$a.b:name").unwrap();
    let args = compiled.get("$eq").and_then(Value::as_array).unwrap();
    assert_eq!(args, &[Value::from("$$a.b"), Value::from("name")]);
}

// ============================================================================
// Object ids
// ============================================================================

#[test]
fn test_object_id() {
    let compiled = run(r#"companies.id = {"$oid": "5de937ba34f907002406af7a"}"#).unwrap();
    assert_eq!(
        compiled,
        doc(vec![(
            "companies.id",
            Value::ObjectId(ObjectId::parse_str("5de937ba34f907002406af7a").unwrap())
        )])
    );
}

#[test]
fn test_object_id_with_other_operators() {
    assert_eq!(
        compile_json(
            r#"companies.vat = '00000' OR (companies.id = {"$oid": "5de937ba34f907002406af7a"} AND companies.name = 'name')"#
        ),
        json!({
            "$or": [
                { "companies.vat": "00000" },
                {
                    "$and": [
                        { "companies.id": { "$oid": "5de937ba34f907002406af7a" } },
                        { "companies.name": "name" }
                    ]
                }
            ]
        })
    );
}

#[test]
fn test_aggregate_object_id() {
    assert_eq!(
        compile_json(r#"$$a.id = {"$oid": "5de937ba34f907002406af7a"}"#),
        json!({ "$eq": ["$$a.id", { "$oid": "5de937ba34f907002406af7a" }] })
    );
}

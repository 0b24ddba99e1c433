use jpath_core::{parse_str, JsonPath, Kind, Value};

/// Helper: parse a document, compile a query, and project the result.
fn query(doc: &str, path: &str) -> Option<Value> {
    let doc = parse_str(doc).unwrap();
    JsonPath::compile(path).unwrap().query(&doc)
}

/// Helper: the number of raw (unprojected) matches.
fn match_count(doc: &str, path: &str) -> usize {
    let doc = parse_str(doc).unwrap();
    JsonPath::compile(path).unwrap().select(&doc).len()
}

// ============================================================================
// Root and member access
// ============================================================================

#[test]
fn root_selects_the_document_itself() {
    let result = query(r#"{"a": 1}"#, "$").unwrap();
    assert_eq!(result, parse_str(r#"{"a": 1}"#).unwrap());
}

#[test]
fn member_access_dot_and_bracket_agree() {
    let doc = r#"{"name": "Alice", "age": 30}"#;
    assert_eq!(query(doc, "$.name").unwrap(), Value::from("Alice"));
    assert_eq!(query(doc, "$['name']").unwrap(), Value::from("Alice"));
    assert_eq!(query(doc, "$[\"age\"]").unwrap(), Value::Integer(30));
}

#[test]
fn member_access_on_missing_key_is_absent() {
    assert_eq!(query(r#"{"a": 1}"#, "$.b"), None);
}

#[test]
fn member_access_on_non_object_is_absent_not_error() {
    assert_eq!(query("[1, 2, 3]", "$.name"), None);
    assert_eq!(query("42", "$.name"), None);
}

#[test]
fn chained_member_access() {
    let doc = r#"{"a": {"b": {"c": 7}}}"#;
    assert_eq!(query(doc, "$.a.b.c").unwrap(), Value::Integer(7));
}

#[test]
fn quoted_member_names_reach_awkward_keys() {
    let doc = r#"{"with spaces": 1, "dotted.key": 2}"#;
    assert_eq!(query(doc, "$['with spaces']").unwrap(), Value::Integer(1));
    assert_eq!(query(doc, "$['dotted.key']").unwrap(), Value::Integer(2));
}

// ============================================================================
// Indexing and slices
// ============================================================================

#[test]
fn index_selects_element() {
    assert_eq!(query("[10,20,30]", "$[0]").unwrap(), Value::Integer(10));
    assert_eq!(query("[10,20,30]", "$[2]").unwrap(), Value::Integer(30));
}

#[test]
fn negative_index_counts_from_end() {
    assert_eq!(query("[10,20,30]", "$[-1]").unwrap(), Value::Integer(30));
    assert_eq!(query("[10,20,30]", "$[-3]").unwrap(), Value::Integer(10));
}

#[test]
fn out_of_range_index_is_absent_not_error() {
    assert_eq!(query("[10,20,30]", "$[5]"), None);
    assert_eq!(query("[10,20,30]", "$[-4]"), None);
}

#[test]
fn index_on_non_array_is_absent() {
    assert_eq!(query(r#"{"0": "x"}"#, "$[0]"), None);
}

#[test]
fn slice_basic_range() {
    let result = query("[0,1,2,3,4]", "$[1:3]").unwrap();
    assert_eq!(result, parse_str("[1,2]").unwrap());
}

#[test]
fn slice_open_ends() {
    assert_eq!(query("[0,1,2,3]", "$[2:]").unwrap(), parse_str("[2,3]").unwrap());
    assert_eq!(query("[0,1,2,3]", "$[:2]").unwrap(), parse_str("[0,1]").unwrap());
    assert_eq!(query("[0,1,2,3]", "$[:]").unwrap(), parse_str("[0,1,2,3]").unwrap());
}

#[test]
fn slice_negative_indices_clamp() {
    assert_eq!(query("[0,1,2,3]", "$[-2:]").unwrap(), parse_str("[2,3]").unwrap());
    assert_eq!(query("[0,1,2,3]", "$[:-1]").unwrap(), parse_str("[0,1,2]").unwrap());
    // Far out of range clamps instead of erroring.
    assert_eq!(query("[0,1,2,3]", "$[-10:10]").unwrap(), parse_str("[0,1,2,3]").unwrap());
    assert_eq!(query("[0,1]", "$[5:9]"), None);
}

#[test]
fn slice_with_step() {
    assert_eq!(query("[0,1,2,3,4,5]", "$[::2]").unwrap(), parse_str("[0,2,4]").unwrap());
    assert_eq!(query("[0,1,2,3,4,5]", "$[1:5:2]").unwrap(), parse_str("[1,3]").unwrap());
}

#[test]
fn slice_negative_step_walks_backward() {
    assert_eq!(query("[0,1,2,3]", "$[::-1]").unwrap(), parse_str("[3,2,1,0]").unwrap());
    assert_eq!(query("[0,1,2,3]", "$[2:0:-1]").unwrap(), parse_str("[2,1]").unwrap());
}

#[test]
fn slice_with_extreme_step_selects_only_the_start() {
    // A step near the i64 limits exhausts the walk after the first element
    // instead of wrapping the cursor.
    assert_eq!(
        query("[0,1,2,3,4,5]", "$[1:5:9223372036854775807]").unwrap(),
        Value::Integer(1)
    );
    assert_eq!(
        query("[0,1,2,3]", "$[::-9223372036854775808]").unwrap(),
        Value::Integer(3)
    );
    assert_eq!(
        query("[0,1,2,3]", "$[2::-9223372036854775807]").unwrap(),
        Value::Integer(2)
    );
}

#[test]
fn slice_on_non_array_is_absent() {
    assert_eq!(query(r#"{"a": 1}"#, "$[0:2]"), None);
}

// ============================================================================
// Wildcards
// ============================================================================

#[test]
fn wildcard_over_object_follows_insertion_order() {
    let result = query(r#"{"a":1,"b":2,"c":3}"#, "$.*").unwrap();
    assert_eq!(result, parse_str("[1,2,3]").unwrap());
    let bracketed = query(r#"{"a":1,"b":2,"c":3}"#, "$.[*]").unwrap();
    assert_eq!(bracketed, parse_str("[1,2,3]").unwrap());
}

#[test]
fn wildcard_over_array_keeps_element_order() {
    assert_eq!(query("[3,1,2]", "$[*]").unwrap(), parse_str("[3,1,2]").unwrap());
}

#[test]
fn wildcard_over_primitive_is_absent() {
    assert_eq!(query("42", "$.*"), None);
}

#[test]
fn wildcard_expansion_is_depth_first_left_to_right() {
    let doc = r#"{"rows": [[1,2],[3,4]]}"#;
    assert_eq!(query(doc, "$.rows[*][*]").unwrap(), parse_str("[1,2,3,4]").unwrap());
}

// ============================================================================
// Recursive descent
// ============================================================================

#[test]
fn descent_finds_keys_at_any_depth() {
    let doc = r#"{"a": {"price": 1}, "b": [{"price": 2}, {"c": {"price": 3}}]}"#;
    assert_eq!(query(doc, "$..price").unwrap(), parse_str("[1,2,3]").unwrap());
}

#[test]
fn descent_order_is_preorder() {
    // A node's own match comes before matches found inside its children:
    // root first, then "x", then "x.inner".
    let doc = r#"{"x": {"v": 1, "inner": {"v": 2}}, "v": 0}"#;
    assert_eq!(query(doc, "$..v").unwrap(), parse_str("[0,1,2]").unwrap());
}

#[test]
fn descent_wildcard_enumerates_all_descendants() {
    let doc = r#"{"a": [1, {"b": 2}]}"#;
    // Children of root, then of each child in order: [1,{"b":2}], 1, {"b":2}, 2
    let result = query(doc, "$..*").unwrap();
    let items = result.as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0], parse_str(r#"[1, {"b": 2}]"#).unwrap());
    assert_eq!(items[1], Value::Integer(1));
    assert_eq!(items[2], parse_str(r#"{"b": 2}"#).unwrap());
    assert_eq!(items[3], Value::Integer(2));
}

#[test]
fn descent_with_index_applies_at_every_depth() {
    let doc = r#"{"a": [10, 20], "b": {"c": [30, 40]}}"#;
    assert_eq!(query(doc, "$..[0]").unwrap(), parse_str("[10,30]").unwrap());
}

#[test]
fn descent_continues_below_matches() {
    let doc = r#"{"a": {"a": {"a": 1}}}"#;
    let result = query(doc, "$..a").unwrap();
    let items = result.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[2], Value::Integer(1));
}

// ============================================================================
// Filters
// ============================================================================

const STORE: &str = r#"{
    "books": [
        {"title": "A", "price": 5,    "tag": "fiction"},
        {"title": "B", "price": 12.5, "tag": "fiction"},
        {"title": "C", "price": 8},
        {"title": "D", "price": 20,   "tag": "science"}
    ]
}"#;

#[test]
fn filter_existence_of_child_key() {
    let result = query(STORE, "$.books[?(@.tag)].title").unwrap();
    assert_eq!(result, parse_str(r#"["A","B","D"]"#).unwrap());
}

#[test]
fn filter_numeric_comparison() {
    let result = query(STORE, "$.books[?(@.price < 10)].title").unwrap();
    assert_eq!(result, parse_str(r#"["A","C"]"#).unwrap());
}

#[test]
fn filter_coerces_integer_and_double() {
    // 12.5 > 10 (integer literal) and 5 < 10.0 (double literal) both apply.
    let over = query(STORE, "$.books[?(@.price > 10)].title").unwrap();
    assert_eq!(over, parse_str(r#"["B","D"]"#).unwrap());
    let under = query(STORE, "$.books[?(@.price <= 8.0)].title").unwrap();
    assert_eq!(under, parse_str(r#"["A","C"]"#).unwrap());
}

#[test]
fn filter_string_equality() {
    let result = query(STORE, "$.books[?(@.tag == 'fiction')].title").unwrap();
    assert_eq!(result, parse_str(r#"["A","B"]"#).unwrap());
    let single_eq = query(STORE, "$.books[?(@.tag = 'science')].title").unwrap();
    assert_eq!(single_eq, Value::from("D"));
}

#[test]
fn filter_inequality() {
    let result = query(STORE, "$.books[?(@.tag != 'fiction')].title").unwrap();
    // "C" has no tag at all, so it is excluded by path resolution.
    assert_eq!(result, Value::from("D"));
}

#[test]
fn filter_ordering_on_incompatible_variants_excludes_candidate() {
    // Comparing a string price against a number must drop the candidate,
    // not fail the query.
    let doc = r#"[{"price": "cheap"}, {"price": 3}]"#;
    let result = query(doc, "$[?(@.price < 10)]").unwrap();
    assert_eq!(result, parse_str(r#"{"price": 3}"#).unwrap());
}

#[test]
fn filter_boolean_and_null_literals() {
    let doc = r#"[{"ok": true}, {"ok": false}, {"ok": null}]"#;
    assert_eq!(
        query(doc, "$[?(@.ok == true)]").unwrap(),
        parse_str(r#"{"ok": true}"#).unwrap()
    );
    assert_eq!(
        query(doc, "$[?(@.ok == null)]").unwrap(),
        parse_str(r#"{"ok": null}"#).unwrap()
    );
}

#[test]
fn filter_nested_predicate_path() {
    let doc = r#"[{"meta": {"count": 2}}, {"meta": {"count": 5}}]"#;
    let result = query(doc, "$[?(@.meta.count >= 5)]").unwrap();
    assert_eq!(result, parse_str(r#"{"meta": {"count": 5}}"#).unwrap());
}

#[test]
fn filter_over_object_context_tests_member_values() {
    let doc = r#"{"first": {"price": 4}, "second": {"price": 40}}"#;
    let result = query(doc, "$[?(@.price > 10)]").unwrap();
    assert_eq!(result, parse_str(r#"{"price": 40}"#).unwrap());
}

// ============================================================================
// Projection (the 0/1/N collapsing convention)
// ============================================================================

#[test]
fn zero_matches_project_to_none() {
    assert_eq!(query(r#"{"a": 1}"#, "$.missing"), None);
    assert_eq!(match_count(r#"{"a": 1}"#, "$.missing"), 0);
}

#[test]
fn single_match_projects_unwrapped() {
    let result = query(r#"{"a": [1, 2]}"#, "$.a").unwrap();
    // The single match is itself an array; it is NOT wrapped again.
    assert_eq!(result, parse_str("[1,2]").unwrap());
    assert_eq!(match_count(r#"{"a": [1, 2]}"#, "$.a"), 1);
}

#[test]
fn single_object_match_projects_unwrapped() {
    let result = query(r#"{"a": {"b": 1}}"#, "$.a").unwrap();
    assert_eq!(result.kind(), Kind::Object);
}

#[test]
fn multiple_matches_project_to_array_in_order() {
    let result = query(r#"{"books":[{"title":"A"},{"title":"B"}]}"#, "$.books[*].title").unwrap();
    assert_eq!(result, parse_str(r#"["A","B"]"#).unwrap());
}

#[test]
fn value_query_convenience_compiles_and_projects() {
    let doc = parse_str(r#"{"key": [0, null]}"#).unwrap();
    let hit = doc.query("$.key[1]").unwrap();
    assert_eq!(hit, Some(Value::Null));
    assert!(doc.query("$[").is_err());
}

// ============================================================================
// Determinism and reuse
// ============================================================================

#[test]
fn compiled_path_is_reusable_across_documents() {
    let path = JsonPath::compile("$.a").unwrap();
    let one = parse_str(r#"{"a": 1}"#).unwrap();
    let two = parse_str(r#"{"a": 2}"#).unwrap();
    assert_eq!(path.query(&one), Some(Value::Integer(1)));
    assert_eq!(path.query(&two), Some(Value::Integer(2)));
}

#[test]
fn repeated_evaluation_is_identical() {
    let doc = parse_str(STORE).unwrap();
    let path = JsonPath::compile("$..price").unwrap();
    let first: Vec<Value> = path.select(&doc).into_iter().cloned().collect();
    let second: Vec<Value> = path.select(&doc).into_iter().cloned().collect();
    assert_eq!(first, second);
}

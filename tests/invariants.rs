//! Quantified invariants from the testable-properties list.

mod common;

use common::{record_scalar, Value, VecCursor};
use ion_path_extractor::Builder;

#[test]
fn cursor_depth_is_restored_after_match_stream() {
    let top = vec![Value::struct_(vec![Value::struct_(vec![
        Value::int(1).named("bar"),
    ])
    .named("foo")])];
    let mut cursor = VecCursor::new(&top);
    let handle = cursor.last_scalar_handle();
    let mut extractor = Builder::standard()
        .with_search_path("(foo bar)", record_scalar(handle))
        .unwrap()
        .build();

    let entry_depth = cursor.depth();
    let mut collected = Vec::new();
    extractor.match_stream(&mut cursor, &mut collected).unwrap();
    assert_eq!(cursor.depth(), entry_depth);
}

#[test]
fn wildcard_length_k_matches_exactly_relative_depth_k() {
    // `(* *)` has two wildcard components: it should match values exactly
    // two levels below the top, regardless of field name or position.
    let top = vec![Value::struct_(vec![Value::struct_(vec![
        Value::int(1).named("a"),
        Value::int(2).named("b"),
    ])
    .named("outer")])];
    let mut cursor = VecCursor::new(&top);
    let handle = cursor.last_scalar_handle();
    let mut extractor = Builder::standard()
        .with_search_path("(* *)", record_scalar(handle))
        .unwrap()
        .build();
    let mut collected = Vec::new();
    extractor.match_stream(&mut cursor, &mut collected).unwrap();
    assert_eq!(collected, vec![1, 2]);
}

#[test]
fn wildcard_length_one_does_not_match_depth_two_values() {
    let top = vec![Value::struct_(vec![Value::struct_(vec![
        Value::int(1).named("a"),
    ])
    .named("outer")])];
    let mut cursor = VecCursor::new(&top);
    let handle = cursor.last_scalar_handle();
    let mut extractor = Builder::standard()
        .with_search_path("(*)", record_scalar(handle))
        .unwrap()
        .build();
    let mut collected = Vec::new();
    extractor.match_stream(&mut cursor, &mut collected).unwrap();
    assert!(collected.is_empty());
}

#[test]
fn case_insensitive_fields_does_not_relax_annotation_matching() {
    let top = vec![
        Value::struct_(vec![Value::int(1).named("foo")]).annotated(&["a"]),
        Value::struct_(vec![Value::int(2).named("FOO")]).annotated(&["A"]),
    ];
    let mut cursor = VecCursor::new(&top);
    let handle = cursor.last_scalar_handle();
    let mut extractor = Builder::standard()
        .with_match_field_names_case_insensitive(true)
        .with_search_path("A::(foo)", record_scalar(handle))
        .unwrap()
        .build();
    let mut collected = Vec::new();
    extractor.match_stream(&mut cursor, &mut collected).unwrap();
    // Only the second struct's annotation is an exact-case match for "A";
    // field-name case-insensitivity does not bleed into annotation matching.
    assert_eq!(collected, vec![2]);
}

#[test]
fn fsm_and_tree_walk_agree_on_a_compilable_path_set() {
    let top = vec![
        Value::struct_(vec![Value::int(1).named("foo")]),
        Value::struct_(vec![Value::struct_(vec![Value::int(2).named("bar")])
            .named("foo")]),
        Value::struct_(vec![Value::int(3).named("baz")]),
    ];

    let mut fsm_cursor = VecCursor::new(&top);
    let fsm_handle = fsm_cursor.last_scalar_handle();
    let mut fsm_extractor = Builder::standard()
        .with_search_path("(foo)", record_scalar(fsm_handle))
        .unwrap()
        .build();
    assert!(fsm_extractor.is_fsm());
    let mut fsm_hits = Vec::new();
    fsm_extractor.match_stream(&mut fsm_cursor, &mut fsm_hits).unwrap();

    let mut tw_cursor = VecCursor::new(&top);
    let tw_handle = tw_cursor.last_scalar_handle();
    let mut tw_extractor = Builder::standard()
        .with_search_path("(foo)", record_scalar(tw_handle))
        .unwrap()
        .build_legacy();
    assert!(!tw_extractor.is_fsm());
    let mut tw_hits = Vec::new();
    tw_extractor.match_stream(&mut tw_cursor, &mut tw_hits).unwrap();

    assert_eq!(fsm_hits, tw_hits);
}

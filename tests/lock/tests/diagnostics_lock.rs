//! Diagnostics and assertion acceptance tests.
//!
//! Proves:
//! 1. Deep and shallow frozen checks disagree on a half-frozen graph
//! 2. Paths name the first unfrozen container in accessor notation
//! 3. Counts cover each distinct container once
//! 4. Assertion helpers fail with the caller's name and pass otherwise

use permafrost::{
    assert_frozen, assert_mutable, assert_shallow_frozen, count_frozen_objects,
    find_unfrozen_path, freeze, frozen_array, frozen_object, is_frozen, is_shallow_frozen,
    AssertionKind, FrozenCount, ObjRef, Symbol, TraversalPolicyV1, Value,
};
use permafrost_engine::diagnostics::{find_unfrozen_path_with_policy, DiagnosticsReportV1};

fn path(value: &Value) -> Option<String> {
    find_unfrozen_path(value).map(|p| p.to_string())
}

// ---------------------------------------------------------------------------
// 1. Deep vs shallow
// ---------------------------------------------------------------------------

#[test]
fn half_frozen_graph() {
    let outer = ObjRef::record_from([("nested", ObjRef::record_from([("mutable", true)]))]);
    outer.freeze_shallow();
    let outer = Value::from(outer);

    assert!(is_shallow_frozen(&outer));
    assert!(!is_frozen(&outer));
    assert_eq!(path(&outer).as_deref(), Some("nested"));
}

// ---------------------------------------------------------------------------
// 2. Paths
// ---------------------------------------------------------------------------

#[test]
fn path_to_second_property() {
    let frozen_a = frozen_object([("x", 1)]);
    let root = ObjRef::record_from([("a", Value::from(frozen_a)), ("b", Value::from(ObjRef::record()))]);
    root.freeze_shallow();
    assert_eq!(path(&root.into()).as_deref(), Some("b"));
}

#[test]
fn path_into_array() {
    let arr = ObjRef::array([
        Value::from(frozen_array([1])),
        Value::from(ObjRef::record()),
    ]);
    arr.freeze_shallow();
    let root = ObjRef::record_from([("arr", arr)]);
    root.freeze_shallow();
    assert_eq!(path(&root.into()).as_deref(), Some("arr[1]"));
}

#[test]
fn path_mixes_properties_indices_and_symbols() {
    let leaf = ObjRef::record();
    let holder = ObjRef::record();
    holder.set(Symbol::new("slot"), leaf).unwrap();
    holder.freeze_shallow();
    let list = ObjRef::array([Value::from(holder)]);
    list.freeze_shallow();
    let root = ObjRef::record_from([("list", list)]);
    root.freeze_shallow();
    assert_eq!(path(&root.into()).as_deref(), Some("list[0][Symbol(slot)]"));
}

#[test]
fn root_path_uses_configured_label() {
    let root = Value::from(ObjRef::array([]));
    assert_eq!(path(&root).as_deref(), Some("(root)"));

    let policy = TraversalPolicyV1 {
        root_label: "$".into(),
        ..TraversalPolicyV1::default()
    };
    let labelled = find_unfrozen_path_with_policy(&root, &policy).unwrap().unwrap();
    assert_eq!(labelled.to_string(), "$");
}

#[test]
fn atomics_and_frozen_graphs_have_no_path() {
    assert!(path(&Value::from("text")).is_none());
    assert!(path(&freeze(ObjRef::record_from([("a", ObjRef::map())]))).is_none());
}

// ---------------------------------------------------------------------------
// 3. Counts
// ---------------------------------------------------------------------------

#[test]
fn fully_frozen_count() {
    let frozen = freeze(ObjRef::record_from([
        ("a", Value::from(ObjRef::array([]))),
        ("b", Value::from(ObjRef::empty_set())),
    ]));
    let count = count_frozen_objects(&frozen);
    assert_eq!(count.unfrozen, 0);
    assert_eq!(count.total, count.frozen);
    assert_eq!(count.total, 3);
}

#[test]
fn atomic_count_is_zero() {
    for value in [Value::Null, Value::Undefined, Value::from(1), Value::from("s")] {
        assert_eq!(count_frozen_objects(&value), FrozenCount::default());
    }
}

#[test]
fn report_reflects_freeze() {
    let root = Value::from(ObjRef::record_from([("a", ObjRef::record())]));
    let policy = TraversalPolicyV1::default();
    let before = DiagnosticsReportV1::inspect(&root, &policy).unwrap();
    let _ = freeze(root.clone());
    let after = DiagnosticsReportV1::inspect(&root, &policy).unwrap();

    assert_eq!(before.count.unfrozen, 2);
    assert!(after.is_deep_frozen());
    assert_eq!(after.to_json()["frozen"], 2);
    assert_ne!(before.digest().unwrap(), after.digest().unwrap());
}

// ---------------------------------------------------------------------------
// 4. Assertions
// ---------------------------------------------------------------------------

#[test]
fn assert_frozen_message_includes_name() {
    let value = Value::from(ObjRef::record());
    let err = assert_frozen(&value, Some("settings")).unwrap_err();
    assert_eq!(err.kind, AssertionKind::NotFrozen);
    assert!(err.to_string().contains("settings"));
    assert_eq!(err.value, value);
}

#[test]
fn assert_mutable_on_frozen_fails_with_same_error_type() {
    let frozen = freeze(ObjRef::record());
    let err = assert_mutable(&frozen, Some("draft")).unwrap_err();
    assert_eq!(err.kind, AssertionKind::Frozen);
    assert!(err.message.contains("draft"));
}

#[test]
fn assertions_are_no_ops_when_they_hold() {
    let fresh = Value::from(ObjRef::record());
    assert!(assert_mutable(&fresh, None).is_ok());

    let frozen = freeze(ObjRef::record());
    assert!(assert_frozen(&frozen, None).is_ok());
    assert!(assert_shallow_frozen(&frozen, Some("x")).is_ok());
}

//! Frozen-copy acceptance tests.
//!
//! Proves:
//! 1. A frozen copy is structurally identical to its source (equal digests)
//! 2. It shares no container with the source
//! 3. Source mutations after the copy do not reach it, and the source stays
//!    mutable
//! 4. Aliasing and cycles inside the source are reproduced in the copy

use std::collections::HashSet;

use permafrost::{frozen_copy, is_frozen, is_shallow_frozen, ObjRef, Value};
use permafrost_kernel::classify::classify;
use permafrost_kernel::heap::{ObjId, ObjectKind};
use permafrost_kernel::proof::snapshot::structural_digest;
use permafrost_lock_tests::graph_fixtures::{mixed_graph, MIXED_GRAPH_CONTAINERS};

/// Ids of every container reachable from `root`, callables excluded.
fn container_ids(root: &Value) -> HashSet<ObjId> {
    let mut seen = HashSet::new();
    let mut stack = vec![root.clone()];
    while let Some(value) = stack.pop() {
        let node = classify(&value);
        let Some(obj) = node.object() else {
            continue;
        };
        if obj.kind() == ObjectKind::Function || !seen.insert(obj.id()) {
            continue;
        }
        stack.extend(node.children().into_iter().map(|(_, child)| child));
    }
    seen
}

// ---------------------------------------------------------------------------
// 1-2. Structural identity, disjointness
// ---------------------------------------------------------------------------

#[test]
fn copy_digest_matches_source() {
    let source = Value::from(mixed_graph());
    let copy = frozen_copy(&source);
    assert_eq!(
        structural_digest(&source).unwrap(),
        structural_digest(&copy).unwrap()
    );
}

#[test]
fn copy_shares_no_container() {
    let source = Value::from(mixed_graph());
    let copy = frozen_copy(&source);

    let source_ids = container_ids(&source);
    let copy_ids = container_ids(&copy);
    assert_eq!(source_ids.len(), MIXED_GRAPH_CONTAINERS);
    assert_eq!(copy_ids.len(), MIXED_GRAPH_CONTAINERS);
    assert!(source_ids.is_disjoint(&copy_ids));
}

#[test]
fn callables_are_shared_not_copied() {
    let source = mixed_graph();
    let copy = frozen_copy(&Value::from(&source));
    assert_eq!(
        copy.as_object().unwrap().get("handler").unwrap(),
        source.get("handler").unwrap()
    );
}

// ---------------------------------------------------------------------------
// 3. Independence
// ---------------------------------------------------------------------------

#[test]
fn source_mutation_does_not_reach_copy() {
    let source = mixed_graph();
    let copy = frozen_copy(&Value::from(&source));
    let digest_before = structural_digest(&copy).unwrap();

    assert!(is_frozen(&copy));
    assert!(!is_shallow_frozen(&Value::from(&source)));

    source.set("added", 1).unwrap();
    let items = source.get("items").unwrap();
    items.as_object().unwrap().push("more").unwrap();
    let config = source.get("config").unwrap();
    config.as_object().unwrap().set("retries", 9).unwrap();

    assert_eq!(structural_digest(&copy).unwrap(), digest_before);
    assert!(!copy.as_object().unwrap().has_own("added"));
}

// ---------------------------------------------------------------------------
// 4. Aliasing and cycles
// ---------------------------------------------------------------------------

#[test]
fn aliasing_survives_the_copy() {
    let copy = frozen_copy(&Value::from(mixed_graph()));
    let items = copy.as_object().unwrap().get("items").unwrap();
    let items = items.as_object().unwrap();
    assert_eq!(items.element(0), items.element(1));

    let index = copy.as_object().unwrap().get("index").unwrap();
    let shared = items.element(0).unwrap();
    assert_eq!(
        index.as_object().unwrap().map_get(&shared),
        Some(Value::from("first"))
    );
}

#[test]
fn cycle_is_reproduced() {
    let a = ObjRef::record();
    let b = ObjRef::record_from([("a", Value::from(&a))]);
    a.set("b", b).unwrap();

    let copy = frozen_copy(&Value::from(&a));
    let copy_a = copy.as_object().unwrap();
    let copy_b = copy_a.get("b").unwrap();
    assert_eq!(copy_b.as_object().unwrap().get("a").unwrap(), Value::from(copy_a));
    assert_ne!(*copy_a, a);
    assert!(!a.is_frozen());
}

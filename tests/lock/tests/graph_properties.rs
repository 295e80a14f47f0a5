//! Property tests over generated graphs.
//!
//! Each case builds a random heap graph (records, arrays, maps, sets, dates)
//! with arbitrary edges, so cycles, self-loops, and aliasing all occur.

use permafrost::{freeze, frozen_copy, is_frozen, ObjRef, Value};
use permafrost_engine::clone::deep_clone_with_policy;
use permafrost_engine::diagnostics::count_frozen_objects;
use permafrost_engine::freeze::freeze_with_policy;
use permafrost_engine::policy::TraversalPolicyV1;
use permafrost_kernel::proof::snapshot::structural_digest;
use proptest::prelude::*;

/// One generated node: its kind selector, a scalar payload, and outgoing
/// edges as indices into the node list (taken modulo its length).
#[derive(Debug, Clone)]
struct NodeRecipe {
    kind: u8,
    scalar: i32,
    edges: Vec<usize>,
}

fn arb_recipe() -> impl Strategy<Value = Vec<NodeRecipe>> {
    prop::collection::vec(
        (0u8..5, any::<i32>(), prop::collection::vec(any::<usize>(), 0..4))
            .prop_map(|(kind, scalar, edges)| NodeRecipe { kind, scalar, edges }),
        1..24,
    )
}

/// Allocate every node, then wire the edges. Node 0 is the root.
fn build(recipe: &[NodeRecipe]) -> Vec<ObjRef> {
    let nodes: Vec<ObjRef> = recipe
        .iter()
        .map(|r| match r.kind {
            0 => ObjRef::record(),
            1 => ObjRef::array([]),
            2 => ObjRef::map(),
            3 => ObjRef::empty_set(),
            _ => ObjRef::date(f64::from(r.scalar)),
        })
        .collect();

    for (i, (node, r)) in nodes.iter().zip(recipe).enumerate() {
        for (j, edge) in r.edges.iter().enumerate() {
            let target = Value::from(&nodes[edge % nodes.len()]);
            match r.kind {
                0 => node.set(format!("e{j}"), target).unwrap(),
                1 => node.push(target).unwrap(),
                2 => node.map_insert(target, r.scalar).unwrap(),
                3 => {
                    node.set_add(target).unwrap();
                }
                _ => {}
            }
        }
        if r.kind == 0 {
            node.set("id", i32::try_from(i).unwrap()).unwrap();
        }
    }
    nodes
}

/// Break every edge so the `Rc` cycles in a generated graph are reclaimed.
fn teardown(nodes: &[ObjRef]) {
    for node in nodes {
        if node.is_frozen() {
            continue;
        }
        for key in node.own_keys() {
            let _ = node.delete(key);
        }
        let _ = node.truncate(0);
        let _ = node.map_clear();
        let _ = node.set_clear();
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn freeze_is_complete_and_idempotent(recipe in arb_recipe()) {
        init_tracing();
        let nodes = build(&recipe);
        let root = Value::from(&nodes[0]);
        let policy = TraversalPolicyV1::default();

        let reachable = count_frozen_objects(&root).total;
        let first = freeze_with_policy(&root, &policy).unwrap();
        prop_assert_eq!(first.stats.frozen, reachable);
        prop_assert!(is_frozen(&first.value));

        let second = freeze_with_policy(&first.value, &policy).unwrap();
        prop_assert_eq!(&second.value, &root);
        prop_assert_eq!(second.stats.visited, 0);
    }

    #[test]
    fn frozen_copy_matches_and_is_independent(recipe in arb_recipe()) {
        init_tracing();
        let nodes = build(&recipe);
        let root = Value::from(&nodes[0]);
        let source_digest = structural_digest(&root).unwrap();
        let source_count = count_frozen_objects(&root);

        let copy = frozen_copy(&root);

        prop_assert!(is_frozen(&copy));
        prop_assert_eq!(structural_digest(&copy).unwrap(), source_digest.clone());
        prop_assert_eq!(count_frozen_objects(&root), source_count);
        prop_assert_eq!(count_frozen_objects(&copy).frozen, source_count.total);
        prop_assert_eq!(structural_digest(&root).unwrap(), source_digest);

        teardown(&nodes);
    }

    #[test]
    fn clone_allocates_once_per_reachable_container(recipe in arb_recipe()) {
        let nodes = build(&recipe);
        let root = Value::from(&nodes[0]);
        let outcome = deep_clone_with_policy(&root, &TraversalPolicyV1::default()).unwrap();
        prop_assert_eq!(outcome.allocated, count_frozen_objects(&root).total);
        prop_assert!(!is_frozen(&outcome.value));

        let frozen = freeze(outcome.value.clone());
        prop_assert!(is_frozen(&frozen));
        prop_assert_eq!(count_frozen_objects(&root).frozen, 0);

        teardown(&nodes);
    }
}

//! Deep-frozen predicate: read-only check that every reachable container is
//! single-level frozen.

use permafrost_kernel::classify::classify_object;
use permafrost_kernel::heap::Value;

use crate::frontier::{schedulable, VisitedSet};

/// Whether `value` and everything reachable from it is frozen.
///
/// Atomics and callables count as frozen. A node reached a second time (a
/// closed cycle or an alias) is not re-checked. Returns `false` as soon as one
/// unfrozen container is found.
#[must_use]
pub fn is_deep_frozen(value: &Value) -> bool {
    let Some(root) = schedulable(value) else {
        return true;
    };
    let mut visited = VisitedSet::default();
    let mut stack = vec![root];

    while let Some(obj) = stack.pop() {
        if !visited.insert(&obj) {
            continue;
        }
        if !obj.is_frozen() {
            return false;
        }
        for (_, child) in classify_object(&obj).children() {
            if let Some(child) = schedulable(&child) {
                if !visited.contains(&child) {
                    stack.push(child);
                }
            }
        }
    }
    true
}

/// Single-level check: atomics are frozen, objects report their own flag.
#[must_use]
pub fn is_shallow_frozen(value: &Value) -> bool {
    match value {
        Value::Object(obj) => obj.is_frozen(),
        _ => true,
    }
}

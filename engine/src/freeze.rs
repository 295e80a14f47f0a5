//! Freeze engine: make every reachable container permanently immutable.
//!
//! # Algorithm
//!
//! 1. Atomic or callable root: returned unchanged.
//! 2. Root already single-level frozen: returned unchanged, nothing visited.
//! 3. Root carries a custom freeze hook: the hook runs and its result is
//!    returned; the engine does not traverse.
//! 4. Otherwise seed the work stack with the root and loop: pop, skip if
//!    visited or already frozen, mark visited, schedule every traversable
//!    child, then freeze the node itself.
//!
//! A node is frozen only after all of its children have been scheduled.
//! Children are not necessarily frozen before their parent; the per-node
//! freeze is flat, so completion order does not affect the result.

use std::rc::Rc;

use permafrost_kernel::classify::{classify_object, Node};
use permafrost_kernel::heap::{CustomFreeze, ObjRef, Value};
use tracing::{debug, trace};

use crate::error::TraversalError;
use crate::frontier::{schedulable, VisitedSet, WorkStack};
use crate::policy::{CustomFreezePolicyV1, TraversalPolicyV1};

/// Counters describing one freeze call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FreezeStats {
    /// Distinct objects popped and processed.
    pub visited: usize,
    /// Objects this call single-level froze.
    pub frozen: usize,
    /// Custom freeze hooks invoked (root included).
    pub delegated: usize,
    /// Largest work-stack size.
    pub stack_high_water: usize,
    /// The root was returned without traversal (atomic, callable, or
    /// already frozen).
    pub fast_path: bool,
}

/// Result of a freeze call.
#[derive(Debug, Clone)]
pub struct FreezeOutcome {
    /// The frozen root (the root itself unless a root hook returned another value).
    pub value: Value,
    pub stats: FreezeStats,
}

impl FreezeOutcome {
    fn untouched(value: &Value) -> Self {
        Self {
            value: value.clone(),
            stats: FreezeStats {
                fast_path: true,
                ..FreezeStats::default()
            },
        }
    }
}

/// Deep-freeze `value` in place and return it.
///
/// Idempotent: a second call on the same root returns immediately.
#[must_use]
pub fn freeze(value: &Value) -> Value {
    run_freeze(value, &TraversalPolicyV1::default()).value
}

/// Deep-freeze with an explicit policy, returning traversal counters.
///
/// # Errors
///
/// Returns [`TraversalError::InvalidPolicy`] if the policy fails validation.
/// No object is touched in that case.
pub fn freeze_with_policy(
    value: &Value,
    policy: &TraversalPolicyV1,
) -> Result<FreezeOutcome, TraversalError> {
    policy.validate()?;
    Ok(run_freeze(value, policy))
}

fn run_freeze(value: &Value, policy: &TraversalPolicyV1) -> FreezeOutcome {
    let Some(root) = schedulable(value) else {
        return FreezeOutcome::untouched(value);
    };
    if root.is_frozen() {
        trace!(root = ?root, "freeze fast path: root already frozen");
        return FreezeOutcome::untouched(value);
    }
    if let Some(hook) = delegated_hook(&root, policy) {
        debug!(root = ?root, "freeze delegated to custom hook");
        return FreezeOutcome {
            value: hook.freeze(&root),
            stats: FreezeStats {
                delegated: 1,
                ..FreezeStats::default()
            },
        };
    }

    let mut stats = FreezeStats::default();
    let mut visited = VisitedSet::with_capacity(policy.initial_capacity);
    let mut stack = WorkStack::with_capacity(policy.initial_capacity);
    stack.push(root);

    while let Some(obj) = stack.pop() {
        if obj.is_frozen() || !visited.insert(&obj) {
            continue;
        }
        stats.visited += 1;

        let node = classify_object(&obj);
        match &node {
            Node::Atomic | Node::Callable(_) => continue,
            Node::PlainRecord(record) | Node::CustomRecord(record) => {
                if let Some(hook) = delegated_hook(record, policy) {
                    trace!(node = ?record, "freeze delegated to custom hook");
                    stats.delegated += 1;
                    // Only the root hook's value is returned; nested results have no consumer.
                    let _ = hook.freeze(record);
                    continue;
                }
            }
            Node::Sequence(_) | Node::Mapping(_) | Node::Set(_) | Node::Opaque(_) => {}
        }

        for (_, child) in node.children() {
            if let Some(child) = schedulable(&child) {
                if !child.is_frozen() && !visited.contains(&child) {
                    stack.push(child);
                }
            }
        }
        obj.freeze_shallow();
        stats.frozen += 1;
    }

    stats.stack_high_water = stack.high_water();
    debug!(
        visited = stats.visited,
        frozen = stats.frozen,
        delegated = stats.delegated,
        stack_high_water = stats.stack_high_water,
        "freeze complete"
    );
    FreezeOutcome {
        value: value.clone(),
        stats,
    }
}

fn delegated_hook(obj: &ObjRef, policy: &TraversalPolicyV1) -> Option<Rc<dyn CustomFreeze>> {
    match policy.custom_freeze {
        CustomFreezePolicyV1::Delegate => obj.freeze_hook(),
        CustomFreezePolicyV1::Ignore => None,
    }
}

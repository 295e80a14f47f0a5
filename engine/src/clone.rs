//! Deep clone engine: a structurally identical, disjoint, mutable copy.
//!
//! Containers are allocated empty and recorded in the clone map before any of
//! their children are resolved, then filled from a work list. A source object
//! reached twice resolves to the same clone, so cycles terminate and aliasing
//! survives the copy. The map holds the source handle next to its clone:
//! a getter may produce a fresh source object, and keeping it alive until
//! the call returns stops a later object from reusing its address.

use std::collections::HashMap;

use permafrost_kernel::classify::{classify, classify_object, ChildSlot, Node};
use permafrost_kernel::heap::{MutationRejected, ObjId, ObjRef, Property, Prototype, Value};
use tracing::{debug, warn};

use crate::error::TraversalError;
use crate::freeze::freeze;
use crate::policy::TraversalPolicyV1;

/// Result of a clone call.
#[derive(Debug, Clone)]
pub struct CloneOutcome {
    pub value: Value,
    /// Number of objects allocated for the copy.
    pub allocated: usize,
}

/// Deep-copy `value`. Atomics and callables are returned as-is.
#[must_use]
pub fn deep_clone(value: &Value) -> Value {
    run_clone(value, TraversalPolicyV1::default().initial_capacity).value
}

/// Deep-copy with an explicit policy, returning the allocation count.
///
/// # Errors
///
/// Returns [`TraversalError::InvalidPolicy`] if the policy fails validation.
pub fn deep_clone_with_policy(
    value: &Value,
    policy: &TraversalPolicyV1,
) -> Result<CloneOutcome, TraversalError> {
    policy.validate()?;
    Ok(run_clone(value, policy.initial_capacity))
}

/// Copy, then deep-freeze the copy. The source graph is never mutated.
#[must_use]
pub fn frozen_copy(value: &Value) -> Value {
    freeze(&deep_clone(value))
}

fn run_clone(value: &Value, capacity: usize) -> CloneOutcome {
    let mut cloner = Cloner {
        map: HashMap::with_capacity(capacity),
        pending: Vec::with_capacity(capacity),
    };
    let root = cloner.resolve(value);
    while let Some((source, target)) = cloner.pending.pop() {
        if let Err(err) = populate(&mut cloner, &source, &target) {
            warn!(error = %err, source = ?source, "clone target rejected population");
        }
    }
    let allocated = cloner.map.len();
    debug!(allocated, "clone complete");
    CloneOutcome {
        value: root,
        allocated,
    }
}

struct Cloner {
    /// Source id to `(source, clone)`.
    map: HashMap<ObjId, (ObjRef, ObjRef)>,
    pending: Vec<(ObjRef, ObjRef)>,
}

impl Cloner {
    /// The clone of `value`: itself for leaves, the recorded clone for
    /// objects already seen, otherwise a fresh shell queued for population.
    fn resolve(&mut self, value: &Value) -> Value {
        let node = classify(value);
        let Some(source) = node.object() else {
            return value.clone();
        };
        if let Some((_, existing)) = self.map.get(&source.id()) {
            return Value::Object(existing.clone());
        }
        let Some(shell) = allocate(&node) else {
            return value.clone();
        };
        self.map.insert(source.id(), (source.clone(), shell.clone()));
        self.pending.push((source.clone(), shell.clone()));
        Value::Object(shell)
    }
}

/// An empty container of the same kind, or `None` for leaves.
fn allocate(node: &Node) -> Option<ObjRef> {
    let shell = match node {
        Node::Atomic | Node::Callable(_) => return None,
        Node::Sequence(_) => ObjRef::array([]),
        Node::Mapping(_) => ObjRef::map(),
        Node::Set(_) => ObjRef::empty_set(),
        Node::Opaque(source) => match (source.time(), source.pattern_parts()) {
            (Some(ms), _) => ObjRef::date(ms),
            (None, Some((pattern, flags))) => ObjRef::pattern(&pattern, &flags),
            (None, None) => return None,
        },
        Node::PlainRecord(source) | Node::CustomRecord(source) => {
            let proto = source.prototype().unwrap_or(Prototype::Default);
            match source.freeze_hook() {
                Some(hook) => ObjRef::with_freeze_hook(proto, hook),
                None => ObjRef::with_prototype(proto),
            }
        }
    };
    Some(shell)
}

fn populate(cloner: &mut Cloner, source: &ObjRef, target: &ObjRef) -> Result<(), MutationRejected> {
    let node = classify_object(source);
    match &node {
        Node::Atomic | Node::Callable(_) | Node::Opaque(_) => {}
        Node::Sequence(_) => {
            for (_, element) in node.children() {
                target.push(cloner.resolve(&element))?;
            }
        }
        Node::Mapping(_) => {
            for (key, value) in source.map_entries() {
                let key = cloner.resolve(&key);
                let value = cloner.resolve(&value);
                target.map_insert(key, value)?;
            }
        }
        Node::Set(_) => {
            for (_, member) in node.children() {
                target.set_add(cloner.resolve(&member))?;
            }
        }
        Node::PlainRecord(_) => {
            for (slot, value) in node.children() {
                if let ChildSlot::Property(key) = slot {
                    target.define(key, Property::data(cloner.resolve(&value)))?;
                }
            }
        }
        Node::CustomRecord(_) => {
            for (key, prop) in source.own_properties() {
                let copied = match prop {
                    Property::Data {
                        value,
                        writable,
                        enumerable,
                        configurable,
                    } => Property::Data {
                        value: cloner.resolve(&value),
                        writable,
                        enumerable,
                        configurable,
                    },
                    accessor @ Property::Accessor { .. } => accessor,
                };
                target.define(key, copied)?;
            }
        }
    }
    Ok(())
}

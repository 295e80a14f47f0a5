//! Traversal frontier: identity-keyed visited set and explicit work stack.
//!
//! Both are scoped to one traversal call. The visited set is keyed by
//! reference identity, never by structural equality, so a cycle back to an
//! in-progress node is recognized even when two distinct objects have
//! identical contents.
//!
//! The set owns a handle to every object it records. Identity is the
//! allocation address, so an object produced by a getter must stay alive
//! until the call ends or a later allocation could reuse its id.

use std::collections::HashSet;

use permafrost_kernel::classify::{classify, Node};
use permafrost_kernel::heap::{ObjRef, Value};

/// Identity-keyed set of objects already processed in the current call.
#[derive(Debug, Default)]
pub struct VisitedSet {
    objects: HashSet<ObjRef>,
}

impl VisitedSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: HashSet::with_capacity(capacity),
        }
    }

    /// Mark `obj` visited. Returns `false` if it already was.
    pub fn insert(&mut self, obj: &ObjRef) -> bool {
        self.objects.insert(obj.clone())
    }

    #[must_use]
    pub fn contains(&self, obj: &ObjRef) -> bool {
        self.objects.contains(obj)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// LIFO stack of pending objects.
///
/// Only traversable objects are pushed (never atomics, never callables).
/// Traversal is complete exactly when the stack is empty.
#[derive(Debug, Default)]
pub struct WorkStack {
    stack: Vec<ObjRef>,
    high_water: usize,
}

impl WorkStack {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stack: Vec::with_capacity(capacity),
            high_water: 0,
        }
    }

    pub fn push(&mut self, obj: ObjRef) {
        self.stack.push(obj);
        self.high_water = self.high_water.max(self.stack.len());
    }

    #[must_use]
    pub fn pop(&mut self) -> Option<ObjRef> {
        self.stack.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Largest size the stack reached.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

/// The object behind `value` if traversals should visit it.
///
/// Atomics and callables are leaves: they are never scheduled.
#[must_use]
pub fn schedulable(value: &Value) -> Option<ObjRef> {
    match classify(value) {
        Node::Atomic | Node::Callable(_) => None,
        Node::Sequence(obj)
        | Node::Mapping(obj)
        | Node::Set(obj)
        | Node::Opaque(obj)
        | Node::PlainRecord(obj)
        | Node::CustomRecord(obj) => Some(obj),
    }
}

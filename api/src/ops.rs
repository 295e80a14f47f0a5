//! Public freeze, copy, and inspection operations.

use permafrost_engine::clone;
use permafrost_engine::diagnostics::{self, FrozenCount, GraphPath};
use permafrost_engine::predicate;
use permafrost_kernel::heap::{ObjRef, Value};
use tracing::trace;

use crate::brand::Frozen;

// ---------------------------------------------------------------------------
// Freeze in place
// ---------------------------------------------------------------------------

/// Deep-freeze `value` in place and brand it.
///
/// Returns the same reference, except when the root carries a custom freeze
/// hook, in which case the hook's result is returned.
pub fn freeze(value: impl Into<Value>) -> Frozen {
    let value = value.into();
    Frozen::new(permafrost_engine::freeze::freeze(&value))
}

/// Brand `value` as-is if its root is already frozen, otherwise [`freeze`] it.
///
/// Only the root is checked: a frozen root over mutable children is branded
/// without traversal.
pub fn ensure_frozen(value: impl Into<Value>) -> Frozen {
    let value = value.into();
    if predicate::is_shallow_frozen(&value) {
        trace!(value = ?value, "ensure_frozen: root already frozen, branded as-is");
        Frozen::new(value)
    } else {
        freeze(value)
    }
}

/// [`freeze`] each value, in order.
pub fn freeze_all<I>(values: I) -> Vec<Frozen>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    values.into_iter().map(freeze).collect()
}

/// [`freeze`] each value of a keyed collection, keeping the keys.
///
/// ```
/// use std::collections::BTreeMap;
/// use permafrost::{freeze_record, Frozen, ObjRef, Value};
///
/// let frozen: BTreeMap<&str, Frozen> =
///     freeze_record([("a", Value::from(ObjRef::record()))]);
/// assert!(frozen["a"].as_object().unwrap().is_frozen());
/// ```
pub fn freeze_record<K, V, C>(entries: impl IntoIterator<Item = (K, V)>) -> C
where
    V: Into<Value>,
    C: FromIterator<(K, Frozen)>,
{
    entries.into_iter().map(|(k, v)| (k, freeze(v))).collect()
}

// ---------------------------------------------------------------------------
// Frozen copies
// ---------------------------------------------------------------------------

/// Deep-copy `value`, then deep-freeze the copy. `value` is left untouched.
#[must_use]
pub fn frozen_copy(value: &Value) -> Frozen {
    Frozen::new(clone::frozen_copy(value))
}

/// [`frozen_copy`] each value, in order.
pub fn frozen_copy_all<'a>(values: impl IntoIterator<Item = &'a Value>) -> Vec<Frozen> {
    values.into_iter().map(frozen_copy).collect()
}

/// [`frozen_copy`] each value of a keyed collection, keeping the keys.
pub fn frozen_copy_record<'a, K, C>(entries: impl IntoIterator<Item = (K, &'a Value)>) -> C
where
    C: FromIterator<(K, Frozen)>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k, frozen_copy(v)))
        .collect()
}

/// Freeze a history of states: a frozen array whose elements are frozen
/// copies of `states`, in order.
///
/// Each element is copied separately, so objects shared between two states
/// are not shared between their copies.
#[must_use]
pub fn snapshot_history(states: &[Value]) -> Frozen {
    let copies = frozen_copy_all(states).into_iter().map(Frozen::into_inner);
    freeze(ObjRef::array(copies))
}

// ---------------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------------

/// Whether `value` and everything reachable from it is frozen.
#[must_use]
pub fn is_frozen(value: &Value) -> bool {
    predicate::is_deep_frozen(value)
}

/// Whether the root of `value` is frozen. Atomics always are.
#[must_use]
pub fn is_shallow_frozen(value: &Value) -> bool {
    predicate::is_shallow_frozen(value)
}

/// Brand `value` if it is deep-frozen.
#[must_use]
pub fn as_frozen(value: Value) -> Option<Frozen> {
    is_frozen(&value).then(|| Frozen::new(value))
}

/// Path to the first unfrozen container, or `None` if deep-frozen.
#[must_use]
pub fn find_unfrozen_path(value: &Value) -> Option<GraphPath> {
    diagnostics::find_unfrozen_path(value)
}

#[must_use]
pub fn count_frozen_objects(value: &Value) -> FrozenCount {
    diagnostics::count_frozen_objects(value)
}

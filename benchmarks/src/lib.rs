//! Graph shapes for the traversal benchmarks.
//!
//! Builders return fresh, unfrozen graphs so each measured iteration starts
//! from the same state.

use permafrost::{ObjRef, Value};

/// Record chain of `depth` links below the root.
#[must_use]
pub fn chain(depth: usize) -> ObjRef {
    let root = ObjRef::record();
    let mut tip = root.clone();
    for _ in 0..depth {
        let next = ObjRef::record();
        // Fresh records accept every assignment.
        let _ = tip.set("next", next.clone());
        tip = next;
    }
    root
}

/// Record with `width` keys, each holding a two-element array.
#[must_use]
pub fn wide(width: usize) -> ObjRef {
    ObjRef::record_from((0..width).map(|i| {
        let pair = ObjRef::array([Value::from(format!("v{i}")), Value::Null]);
        (format!("k{i}"), Value::from(pair))
    }))
}

/// `layers` arrays of `fan` records where every record in a layer points at
/// every record of the next. Heavily aliased: each record is reachable
/// `fan` times from the layer above.
#[must_use]
pub fn lattice(layers: usize, fan: usize) -> ObjRef {
    let mut below: Vec<ObjRef> = Vec::new();
    for layer in 0..layers {
        let current: Vec<ObjRef> = (0..fan)
            .map(|i| {
                let node = ObjRef::record_from([("slot", Value::from(format!("{layer}.{i}")))]);
                let links = ObjRef::array(below.iter().map(Value::from));
                let _ = node.set("links", links);
                node
            })
            .collect();
        below = current;
    }
    ObjRef::array(below.iter().map(Value::from))
}

//! Structural snapshots: a cycle-safe, flat JSON form of an object graph.
//!
//! Objects are numbered in breadth-first discovery order and written once into
//! a node table; every reference to an object is `{"$ref": n}`. Aliasing and
//! cycles are therefore visible in the snapshot, and two graphs with the same
//! shape produce byte-identical canonical JSON even though they share no
//! objects.
//!
//! Frozen flags and descriptor writability are not part of the snapshot, so a
//! frozen copy digests equal to its mutable source.

use std::collections::{HashMap, VecDeque};

use serde_json::{json, Map};

use crate::classify::{classify_object, Node};
use crate::heap::{ObjRef, ObjectKind, Prototype, Value};

use super::canon::{canonical_json_bytes, CanonError};
use super::hash::{canonical_hash, ContentHash, DOMAIN_SNAPSHOT};

/// Largest magnitude at which every integer is exactly representable in `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Build the snapshot of the graph reachable from `root`.
///
/// Shape: `{"root": <encoded root>, "nodes": [<node>, ...]}`. Callables are
/// encoded inline as `{"$function": name}` and are not numbered.
#[must_use]
pub fn snapshot_json(root: &Value) -> serde_json::Value {
    let mut numbering = Numbering::default();
    let encoded_root = numbering.encode(root);
    let mut nodes = Vec::new();

    while let Some(obj) = numbering.queue.pop_front() {
        nodes.push(numbering.encode_node(&obj));
    }

    json!({
        "root": encoded_root,
        "nodes": nodes,
    })
}

/// Canonical SHA-256 digest of [`snapshot_json`].
///
/// # Errors
///
/// Returns [`CanonError`] if canonical serialization fails. Heap numbers are
/// pre-encoded so this does not happen for snapshots built by this module.
pub fn structural_digest(root: &Value) -> Result<ContentHash, CanonError> {
    let bytes = canonical_json_bytes(&snapshot_json(root))?;
    Ok(canonical_hash(DOMAIN_SNAPSHOT, &bytes))
}

/// Keyed by handle so objects produced by getters outlive the walk and
/// their addresses are never handed to another node.
#[derive(Default)]
struct Numbering {
    ids: HashMap<ObjRef, usize>,
    queue: VecDeque<ObjRef>,
}

impl Numbering {
    fn encode(&mut self, value: &Value) -> serde_json::Value {
        match value {
            Value::Undefined => json!({"$undefined": true}),
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => json!(b),
            Value::Number(n) => encode_number(*n),
            Value::BigInt(n) => json!({"$bigint": n.to_string()}),
            Value::String(s) => json!(s.as_ref()),
            Value::Symbol(sym) => json!({"$symbol": sym.description().unwrap_or("")}),
            Value::Object(obj) if obj.kind() == ObjectKind::Function => {
                json!({"$function": obj.function_name().as_deref().unwrap_or("")})
            }
            Value::Object(obj) => {
                let next = self.ids.len();
                let id = *self.ids.entry(obj.clone()).or_insert_with(|| {
                    self.queue.push_back(obj.clone());
                    next
                });
                json!({"$ref": id})
            }
        }
    }

    fn encode_node(&mut self, obj: &ObjRef) -> serde_json::Value {
        let mut out = Map::new();
        out.insert("kind".into(), json!(obj.kind().name()));
        match obj.prototype() {
            Some(Prototype::Default) => {
                out.insert("proto".into(), json!("default"));
            }
            Some(Prototype::Null) => {
                out.insert("proto".into(), json!("null"));
            }
            Some(Prototype::Custom(_)) => {
                out.insert("proto".into(), json!("custom"));
            }
            None => {}
        }

        let node = classify_object(obj);
        match &node {
            Node::Opaque(o) => {
                if let Some(ms) = o.time() {
                    out.insert("time".into(), encode_number(ms));
                }
                if let Some((source, flags)) = o.pattern_parts() {
                    out.insert("source".into(), json!(source.as_ref()));
                    out.insert("flags".into(), json!(flags.as_ref()));
                }
            }
            Node::Atomic
            | Node::Callable(_)
            | Node::Sequence(_)
            | Node::Mapping(_)
            | Node::Set(_)
            | Node::PlainRecord(_)
            | Node::CustomRecord(_) => {}
        }

        let children: Vec<serde_json::Value> = node
            .children()
            .iter()
            .map(|(slot, child)| json!([slot.to_string(), self.encode(child)]))
            .collect();
        out.insert("children".into(), serde_json::Value::Array(children));
        serde_json::Value::Object(out)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn encode_number(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        json!(n as i64)
    } else {
        json!({"$number": format!("{n:?}")})
    }
}

//! Graph fixtures used across acceptance tests, benches, and the
//! `snapshot_fixture` binary.
//!
//! Every fixture is built fresh on each call, so tests never share heap state.

use permafrost::{ObjRef, Property, Prototype, Symbol, Value};

/// Record chain `root.next.next...` with `depth` links below the root.
///
/// Returns the root and the tip.
#[must_use]
pub fn deep_chain(depth: usize) -> (ObjRef, ObjRef) {
    let root = ObjRef::record();
    let mut tip = root.clone();
    for _ in 0..depth {
        let next = ObjRef::record();
        // Fresh records accept every assignment.
        let _ = tip.set("next", next.clone());
        tip = next;
    }
    (root, tip)
}

/// Array nesting `[[[...]]]`, `depth` levels below the root.
#[must_use]
pub fn deep_array(depth: usize) -> ObjRef {
    let mut current = ObjRef::array([]);
    for _ in 0..depth {
        current = ObjRef::array([Value::from(current)]);
    }
    current
}

/// Record with `width` keys, each holding its own small record.
#[must_use]
pub fn wide_record(width: usize) -> ObjRef {
    ObjRef::record_from((0..width).map(|i| {
        let child = ObjRef::record_from([("label", Value::from(format!("item {i}")))]);
        (format!("k{i}"), Value::from(child))
    }))
}

/// Two records pointing at each other through `ref`.
#[must_use]
pub fn mutual_cycle() -> (ObjRef, ObjRef) {
    let a = ObjRef::record();
    let b = ObjRef::record_from([("ref", Value::from(&a))]);
    let _ = a.set("ref", b.clone());
    (a, b)
}

/// Breaks every `next`/`ref`/`self` link so `Rc` cycles can be reclaimed.
pub fn break_cycle(objects: &[&ObjRef]) {
    for obj in objects {
        for key in ["next", "ref", "self"] {
            let _ = obj.delete(key);
        }
    }
}

/// A heterogeneous graph exercising every container kind, aliasing, a
/// symbol key, a hidden key, and a custom prototype.
///
/// Shape:
/// ```text
/// root
/// ├── config: { retries: 3, tags: Set{"a", "b"} }
/// ├── items: [shared, shared, 7]
/// ├── index: Map{ shared => "first" }
/// ├── created: Date(86_400_000)
/// ├── matcher: Pattern(/^id-\d+$/g)
/// ├── widget: <custom proto> { hidden internal: { n: 1 } }
/// ├── handler: fn on_change
/// └── [Symbol(meta)]: { version: 2 }
/// ```
#[must_use]
pub fn mixed_graph() -> ObjRef {
    let shared = ObjRef::record_from([("name", "shared")]);
    let tags = ObjRef::set_from([Value::from("a"), Value::from("b")]);
    let config = ObjRef::record_from([("retries", Value::from(3)), ("tags", Value::from(tags))]);
    let items = ObjRef::array([Value::from(&shared), Value::from(&shared), Value::from(7)]);
    let index = ObjRef::map_from([(Value::from(&shared), Value::from("first"))]);

    let proto = ObjRef::record_from([("kind", "widget")]);
    let widget = ObjRef::with_prototype(Prototype::Custom(proto));
    let _ = widget.define(
        "internal",
        Property::hidden(ObjRef::record_from([("n", 1)])),
    );

    let root = ObjRef::record_from([
        ("config", Value::from(config)),
        ("items", Value::from(items)),
        ("index", Value::from(index)),
        ("created", Value::from(ObjRef::date(86_400_000.0))),
        ("matcher", Value::from(ObjRef::pattern(r"^id-\d+$", "g"))),
        ("widget", Value::from(widget)),
        (
            "handler",
            Value::from(ObjRef::function("on_change", |_| Ok(Value::Undefined))),
        ),
    ]);
    let _ = root.set(Symbol::new("meta"), ObjRef::record_from([("version", 2)]));
    root
}

/// Number of containers in [`mixed_graph`] (the callable and the shared
/// custom prototype are not counted).
pub const MIXED_GRAPH_CONTAINERS: usize = 11;

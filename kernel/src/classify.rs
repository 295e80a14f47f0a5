//! Node classifier: the single place that decides what shape a value has and
//! which values it directly reaches.
//!
//! Every traversal (freeze, deep-frozen check, clone, diagnostics) classifies
//! through [`classify`] and matches exhaustively on [`Node`], so a new shape
//! cannot be handled by one traversal and forgotten by another.
//!
//! # Precedence
//!
//! 1. Atomic (every non-object value)
//! 2. Callable
//! 3. Sequence
//! 4. Mapping
//! 5. Set
//! 6. Opaque wrapper (date, pattern)
//! 7. Plain record (default or null prototype)
//! 8. Custom-prototype record

use std::fmt;

use crate::heap::{ObjRef, ObjectKind, Property, PropertyKey, Value};

/// A classified value.
#[derive(Debug, Clone)]
pub enum Node {
    /// Inherently immutable leaf.
    Atomic,
    /// Opaque callable. Never cloned, never frozen, never descended into.
    Callable(ObjRef),
    /// Integer-indexed sequence.
    Sequence(ObjRef),
    /// Key-value mapping; both keys and values are children.
    Mapping(ObjRef),
    /// Distinct-value set.
    Set(ObjRef),
    /// Date or pattern: a container with no children.
    Opaque(ObjRef),
    /// Record with the default prototype or none.
    PlainRecord(ObjRef),
    /// Record with a user-supplied prototype.
    CustomRecord(ObjRef),
}

/// Where a child sits inside its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildSlot {
    /// Element of a sequence.
    Index(usize),
    /// Own property of a record.
    Property(PropertyKey),
    /// Key of the n-th map entry.
    MapKey(usize),
    /// Value of the n-th map entry.
    MapValue(usize),
    /// The n-th member of a set.
    Member(usize),
}

impl fmt::Display for ChildSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "[{i}]"),
            Self::Property(PropertyKey::String(name)) => f.write_str(name),
            Self::Property(PropertyKey::Symbol(sym)) => write!(f, "[{sym}]"),
            Self::MapKey(i) => write!(f, "[key #{i}]"),
            Self::MapValue(i) => write!(f, "[value #{i}]"),
            Self::Member(i) => write!(f, "[member #{i}]"),
        }
    }
}

/// Classify a value.
#[must_use]
pub fn classify(value: &Value) -> Node {
    let Value::Object(obj) = value else {
        return Node::Atomic;
    };
    classify_object(obj)
}

/// Classify an object handle.
#[must_use]
pub fn classify_object(obj: &ObjRef) -> Node {
    let obj = obj.clone();
    match obj.kind() {
        ObjectKind::Function => Node::Callable(obj),
        ObjectKind::Array => Node::Sequence(obj),
        ObjectKind::Map => Node::Mapping(obj),
        ObjectKind::Set => Node::Set(obj),
        ObjectKind::Date | ObjectKind::Pattern => Node::Opaque(obj),
        ObjectKind::Record => {
            if obj.prototype().is_some_and(|p| p.is_custom()) {
                Node::CustomRecord(obj)
            } else {
                Node::PlainRecord(obj)
            }
        }
    }
}

impl Node {
    /// The object behind this node, unless atomic.
    #[must_use]
    pub fn object(&self) -> Option<&ObjRef> {
        match self {
            Self::Atomic => None,
            Self::Callable(obj)
            | Self::Sequence(obj)
            | Self::Mapping(obj)
            | Self::Set(obj)
            | Self::Opaque(obj)
            | Self::PlainRecord(obj)
            | Self::CustomRecord(obj) => Some(obj),
        }
    }

    /// Directly reachable children, in enumeration order:
    ///
    /// - sequence: index order
    /// - mapping: key then value per entry, insertion order
    /// - set: insertion order
    /// - plain record: enumerable string keys, then symbol keys
    /// - custom record: all string keys (enumerable or not), then symbol keys
    ///
    /// A record property whose read throws is skipped.
    #[must_use]
    pub fn children(&self) -> Vec<(ChildSlot, Value)> {
        match self {
            Self::Atomic | Self::Callable(_) | Self::Opaque(_) => Vec::new(),
            Self::Sequence(obj) => obj
                .elements()
                .into_iter()
                .enumerate()
                .map(|(i, v)| (ChildSlot::Index(i), v))
                .collect(),
            Self::Mapping(obj) => obj
                .map_entries()
                .into_iter()
                .enumerate()
                .flat_map(|(i, (k, v))| [(ChildSlot::MapKey(i), k), (ChildSlot::MapValue(i), v)])
                .collect(),
            Self::Set(obj) => obj
                .set_members()
                .into_iter()
                .enumerate()
                .map(|(i, v)| (ChildSlot::Member(i), v))
                .collect(),
            Self::PlainRecord(obj) => record_children(obj, |key, prop| {
                key.is_symbol() || prop.is_enumerable()
            }),
            Self::CustomRecord(obj) => record_children(obj, |_, _| true),
        }
    }
}

fn record_children(
    obj: &ObjRef,
    include: impl Fn(&PropertyKey, &Property) -> bool,
) -> Vec<(ChildSlot, Value)> {
    obj.own_properties()
        .into_iter()
        .filter(|(key, prop)| include(key, prop))
        .filter_map(|(key, prop)| {
            let value = prop.read(obj).ok()?;
            Some((ChildSlot::Property(key), value))
        })
        .collect()
}

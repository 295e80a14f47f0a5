//! Heap objects and the shared `ObjRef` handle.
//!
//! Every object carries a single-level frozen flag. Once set it never clears,
//! and every mutator on this type checks it before touching the body.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};

use super::error::{MutationOp, MutationRejected, Thrown};
use super::property::{NativeFn, Property};
use super::value::{MapKey, PropertyKey, Value};

/// Identity of a heap object, stable while any handle to it is alive.
///
/// Traversals key their visited sets and clone maps by `ObjId`, never by
/// structural equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(usize);

/// The shape of an object's body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Record,
    Array,
    Map,
    Set,
    Date,
    Pattern,
    Function,
}

impl ObjectKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::Array => "array",
            Self::Map => "map",
            Self::Set => "set",
            Self::Date => "date",
            Self::Pattern => "pattern",
            Self::Function => "function",
        }
    }
}

/// The prototype link of a record.
#[derive(Debug, Clone)]
pub enum Prototype {
    /// The ordinary record prototype.
    Default,
    /// No prototype at all.
    Null,
    /// A user-supplied prototype object. Shared, never cloned.
    Custom(ObjRef),
}

impl Prototype {
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

/// Capability for records that freeze themselves.
///
/// When a record carries a hook, the freeze engine calls it instead of
/// traversing the record, and does not schedule the record's children. The
/// hook owns its whole subtree. It may call back into the freeze engine for
/// its children, but must not ask the engine to freeze `target` itself.
pub trait CustomFreeze {
    /// Freeze `target` and return the value the caller of `freeze` receives.
    fn freeze(&self, target: &ObjRef) -> Value;
}

struct Record {
    props: IndexMap<PropertyKey, Property>,
    proto: Prototype,
    hook: Option<Rc<dyn CustomFreeze>>,
}

enum Body {
    Record(RefCell<Record>),
    Array(RefCell<Vec<Value>>),
    Map(RefCell<IndexMap<MapKey, Value>>),
    Set(RefCell<IndexSet<MapKey>>),
    Date(Cell<f64>),
    Pattern { source: Rc<str>, flags: Rc<str> },
    Function { name: Rc<str>, call: NativeFn },
}

struct Obj {
    frozen: Cell<bool>,
    body: Body,
}

impl Body {
    /// Move every owned value out of the body, leaving it empty.
    fn take_values(&mut self, out: &mut Vec<Value>) {
        match self {
            Self::Record(record) => {
                let record = record.get_mut();
                for (_, prop) in record.props.drain(..) {
                    if let Property::Data { value, .. } = prop {
                        out.push(value);
                    }
                }
                if let Prototype::Custom(proto) =
                    std::mem::replace(&mut record.proto, Prototype::Null)
                {
                    out.push(Value::Object(proto));
                }
            }
            Self::Array(items) => out.append(items.get_mut()),
            Self::Map(map) => {
                for (key, value) in map.get_mut().drain(..) {
                    out.push(key.0);
                    out.push(value);
                }
            }
            Self::Set(set) => out.extend(set.get_mut().drain(..).map(|k| k.0)),
            Self::Date(_) | Self::Pattern { .. } | Self::Function { .. } => {}
        }
    }
}

// Deep chains would otherwise drop recursively, one native frame per level.
// Objects whose last handle is being released are emptied onto a local list
// instead, so teardown depth stays constant.
impl Drop for Obj {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.body.take_values(&mut pending);
        while let Some(value) = pending.pop() {
            if let Value::Object(ObjRef(rc)) = value {
                if let Ok(mut obj) = Rc::try_unwrap(rc) {
                    obj.body.take_values(&mut pending);
                }
            }
        }
    }
}

/// Shared handle to a heap object. Equality and hashing are by identity.
#[derive(Clone)]
pub struct ObjRef(Rc<Obj>);

impl ObjRef {
    fn alloc(body: Body) -> Self {
        Self(Rc::new(Obj {
            frozen: Cell::new(false),
            body,
        }))
    }

    fn alloc_record(proto: Prototype, props: IndexMap<PropertyKey, Property>) -> Self {
        Self::alloc(Body::Record(RefCell::new(Record {
            props,
            proto,
            hook: None,
        })))
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Empty record with the default prototype.
    #[must_use]
    pub fn record() -> Self {
        Self::alloc_record(Prototype::Default, IndexMap::new())
    }

    /// Empty record with no prototype.
    #[must_use]
    pub fn null_record() -> Self {
        Self::alloc_record(Prototype::Null, IndexMap::new())
    }

    /// Empty record with the given prototype link.
    #[must_use]
    pub fn with_prototype(proto: Prototype) -> Self {
        Self::alloc_record(proto, IndexMap::new())
    }

    /// Empty record with the given prototype link that freezes itself through `hook`.
    #[must_use]
    pub fn with_freeze_hook(proto: Prototype, hook: Rc<dyn CustomFreeze>) -> Self {
        Self::alloc(Body::Record(RefCell::new(Record {
            props: IndexMap::new(),
            proto,
            hook: Some(hook),
        })))
    }

    /// Record with the default prototype and one ordinary data property per entry.
    #[must_use]
    pub fn record_from<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<PropertyKey>,
        V: Into<Value>,
    {
        let props = entries
            .into_iter()
            .map(|(k, v)| (k.into(), Property::data(v)))
            .collect();
        Self::alloc_record(Prototype::Default, props)
    }

    #[must_use]
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Self::alloc(Body::Array(RefCell::new(items.into_iter().collect())))
    }

    #[must_use]
    pub fn map() -> Self {
        Self::alloc(Body::Map(RefCell::new(IndexMap::new())))
    }

    /// Map from entries; a repeated key keeps its first position and last value.
    #[must_use]
    pub fn map_from(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let map = entries.into_iter().map(|(k, v)| (MapKey(k), v)).collect();
        Self::alloc(Body::Map(RefCell::new(map)))
    }

    #[must_use]
    pub fn empty_set() -> Self {
        Self::alloc(Body::Set(RefCell::new(IndexSet::new())))
    }

    #[must_use]
    pub fn set_from(members: impl IntoIterator<Item = Value>) -> Self {
        let set = members.into_iter().map(MapKey).collect();
        Self::alloc(Body::Set(RefCell::new(set)))
    }

    /// Point-in-time value in epoch milliseconds. `NaN` is an invalid date.
    #[must_use]
    pub fn date(epoch_ms: f64) -> Self {
        Self::alloc(Body::Date(Cell::new(epoch_ms)))
    }

    /// Compiled-pattern value. Source and flags are fixed at construction.
    #[must_use]
    pub fn pattern(source: &str, flags: &str) -> Self {
        Self::alloc(Body::Pattern {
            source: Rc::from(source),
            flags: Rc::from(flags),
        })
    }

    #[must_use]
    pub fn function(
        name: &str,
        call: impl Fn(&[Value]) -> Result<Value, Thrown> + 'static,
    ) -> Self {
        Self::alloc(Body::Function {
            name: Rc::from(name),
            call: Rc::new(call),
        })
    }

    // -----------------------------------------------------------------------
    // Identity and shape
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn id(&self) -> ObjId {
        ObjId(Rc::as_ptr(&self.0).cast::<()>() as usize)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        match &self.0.body {
            Body::Record(_) => ObjectKind::Record,
            Body::Array(_) => ObjectKind::Array,
            Body::Map(_) => ObjectKind::Map,
            Body::Set(_) => ObjectKind::Set,
            Body::Date(_) => ObjectKind::Date,
            Body::Pattern { .. } => ObjectKind::Pattern,
            Body::Function { .. } => ObjectKind::Function,
        }
    }

    /// Single-level frozen check. O(1).
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.0.frozen.get()
    }

    /// Single-level freeze: reject every future write to this object. Record
    /// data properties become read-only and all record properties become
    /// non-configurable. Children are untouched. Idempotent.
    pub fn freeze_shallow(&self) {
        if self.0.frozen.replace(true) {
            return;
        }
        if let Body::Record(record) = &self.0.body {
            for prop in record.borrow_mut().props.values_mut() {
                prop.lock();
            }
        }
    }

    /// Prototype link, for records.
    #[must_use]
    pub fn prototype(&self) -> Option<Prototype> {
        match &self.0.body {
            Body::Record(record) => Some(record.borrow().proto.clone()),
            _ => None,
        }
    }

    /// The custom freeze hook, if this is a record that carries one.
    #[must_use]
    pub fn freeze_hook(&self) -> Option<Rc<dyn CustomFreeze>> {
        match &self.0.body {
            Body::Record(record) => record.borrow().hook.clone(),
            _ => None,
        }
    }

    /// Number of own properties, elements, entries, or members.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.0.body {
            Body::Record(record) => record.borrow().props.len(),
            Body::Array(items) => items.borrow().len(),
            Body::Map(map) => map.borrow().len(),
            Body::Set(set) => set.borrow().len(),
            Body::Date(_) | Body::Pattern { .. } | Body::Function { .. } => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -----------------------------------------------------------------------
    // Records: read
    // -----------------------------------------------------------------------

    /// Own property keys: string keys in insertion order, then symbol keys in
    /// insertion order. Non-enumerable keys are included.
    #[must_use]
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        let Body::Record(record) = &self.0.body else {
            return Vec::new();
        };
        let record = record.borrow();
        let strings = record.props.keys().filter(|k| !k.is_symbol());
        let symbols = record.props.keys().filter(|k| k.is_symbol());
        strings.chain(symbols).cloned().collect()
    }

    /// Own property descriptors in [`ObjRef::own_keys`] order.
    #[must_use]
    pub fn own_properties(&self) -> Vec<(PropertyKey, Property)> {
        let Body::Record(record) = &self.0.body else {
            return Vec::new();
        };
        let record = record.borrow();
        let strings = record.props.iter().filter(|(k, _)| !k.is_symbol());
        let symbols = record.props.iter().filter(|(k, _)| k.is_symbol());
        strings
            .chain(symbols)
            .map(|(k, p)| (k.clone(), p.clone()))
            .collect()
    }

    #[must_use]
    pub fn own_property(&self, key: &PropertyKey) -> Option<Property> {
        match &self.0.body {
            Body::Record(record) => record.borrow().props.get(key).cloned(),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_own(&self, key: impl Into<PropertyKey>) -> bool {
        self.own_property(&key.into()).is_some()
    }

    /// Read a property, walking custom prototype links. Getters run against
    /// `self`. Missing properties read as `undefined`.
    pub fn get(&self, key: impl Into<PropertyKey>) -> Result<Value, Thrown> {
        let key = key.into();
        let mut current = self.clone();
        loop {
            if let Some(prop) = current.own_property(&key) {
                return prop.read(self);
            }
            match current.prototype() {
                Some(Prototype::Custom(proto)) => current = proto,
                _ => return Ok(Value::Undefined),
            }
        }
    }

    // -----------------------------------------------------------------------
    // Records: write
    // -----------------------------------------------------------------------

    /// Assign a property. Accessors run their setter even on a frozen record.
    pub fn set(
        &self,
        key: impl Into<PropertyKey>,
        value: impl Into<Value>,
    ) -> Result<(), MutationRejected> {
        let key = key.into();
        let record = self.record_body(MutationOp::Assign)?;
        let existing = record.borrow().props.get(&key).cloned();
        match existing {
            Some(Property::Accessor { set: Some(set), .. }) => {
                set(self, value.into()).map_err(|source| MutationRejected::SetterThrew {
                    key: key.to_string(),
                    source,
                })
            }
            Some(Property::Accessor { set: None, .. }) => Err(MutationRejected::NoSetter {
                key: key.to_string(),
            }),
            Some(Property::Data { writable, .. }) => {
                self.check_unfrozen(MutationOp::Assign, &key)?;
                if !writable {
                    return Err(MutationRejected::ReadOnly {
                        key: key.to_string(),
                    });
                }
                if let Some(Property::Data { value: slot, .. }) =
                    record.borrow_mut().props.get_mut(&key)
                {
                    *slot = value.into();
                }
                Ok(())
            }
            None => {
                self.check_unfrozen(MutationOp::Assign, &key)?;
                record
                    .borrow_mut()
                    .props
                    .insert(key, Property::data(value));
                Ok(())
            }
        }
    }

    /// Define or replace an own property descriptor.
    pub fn define(
        &self,
        key: impl Into<PropertyKey>,
        prop: Property,
    ) -> Result<(), MutationRejected> {
        let key = key.into();
        let record = self.record_body(MutationOp::Define)?;
        self.check_unfrozen(MutationOp::Define, &key)?;
        let mut record = record.borrow_mut();
        if record.props.get(&key).is_some_and(|p| !p.is_configurable()) {
            return Err(MutationRejected::NonConfigurable {
                op: MutationOp::Define,
                key: key.to_string(),
            });
        }
        record.props.insert(key, prop);
        Ok(())
    }

    /// Delete an own property. Returns whether it existed.
    pub fn delete(&self, key: impl Into<PropertyKey>) -> Result<bool, MutationRejected> {
        let key = key.into();
        let record = self.record_body(MutationOp::Delete)?;
        self.check_unfrozen(MutationOp::Delete, &key)?;
        let mut record = record.borrow_mut();
        match record.props.get(&key) {
            None => Ok(false),
            Some(p) if !p.is_configurable() => Err(MutationRejected::NonConfigurable {
                op: MutationOp::Delete,
                key: key.to_string(),
            }),
            Some(_) => Ok(record.props.shift_remove(&key).is_some()),
        }
    }

    /// Install the custom freeze capability on a record.
    pub fn set_freeze_hook(&self, hook: Rc<dyn CustomFreeze>) -> Result<(), MutationRejected> {
        let record = self.record_body(MutationOp::SetFreezeHook)?;
        self.check_unfrozen(MutationOp::SetFreezeHook, &"freeze hook")?;
        record.borrow_mut().hook = Some(hook);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Arrays
    // -----------------------------------------------------------------------

    /// Snapshot of the elements.
    #[must_use]
    pub fn elements(&self) -> Vec<Value> {
        match &self.0.body {
            Body::Array(items) => items.borrow().clone(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn element(&self, index: usize) -> Option<Value> {
        match &self.0.body {
            Body::Array(items) => items.borrow().get(index).cloned(),
            _ => None,
        }
    }

    pub fn push(&self, value: impl Into<Value>) -> Result<(), MutationRejected> {
        let items = self.array_body()?;
        let len = items.borrow().len();
        self.check_unfrozen(MutationOp::WriteElement, &len)?;
        items.borrow_mut().push(value.into());
        Ok(())
    }

    /// Store at `index`; `index == len` appends.
    pub fn set_index(&self, index: usize, value: impl Into<Value>) -> Result<(), MutationRejected> {
        let items = self.array_body()?;
        self.check_unfrozen(MutationOp::WriteElement, &index)?;
        let mut items = items.borrow_mut();
        let len = items.len();
        match index.cmp(&len) {
            std::cmp::Ordering::Less => items[index] = value.into(),
            std::cmp::Ordering::Equal => items.push(value.into()),
            std::cmp::Ordering::Greater => {
                return Err(MutationRejected::IndexOutOfBounds { index, len })
            }
        }
        Ok(())
    }

    pub fn truncate(&self, len: usize) -> Result<(), MutationRejected> {
        let items = self.array_body()?;
        self.check_unfrozen(MutationOp::WriteElement, &"length")?;
        items.borrow_mut().truncate(len);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Maps
    // -----------------------------------------------------------------------

    /// Snapshot of the entries in insertion order.
    #[must_use]
    pub fn map_entries(&self) -> Vec<(Value, Value)> {
        match &self.0.body {
            Body::Map(map) => map
                .borrow()
                .iter()
                .map(|(k, v)| (k.0.clone(), v.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn map_get(&self, key: &Value) -> Option<Value> {
        match &self.0.body {
            Body::Map(map) => map.borrow().get(&MapKey(key.clone())).cloned(),
            _ => None,
        }
    }

    pub fn map_insert(
        &self,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<(), MutationRejected> {
        let map = self.map_body()?;
        let key = key.into();
        self.check_unfrozen(MutationOp::WriteEntry, &format_args!("{key:?}"))?;
        map.borrow_mut().insert(MapKey(key), value.into());
        Ok(())
    }

    pub fn map_remove(&self, key: &Value) -> Result<bool, MutationRejected> {
        let map = self.map_body()?;
        self.check_unfrozen(MutationOp::WriteEntry, &format_args!("{key:?}"))?;
        Ok(map.borrow_mut().shift_remove(&MapKey(key.clone())).is_some())
    }

    pub fn map_clear(&self) -> Result<(), MutationRejected> {
        let map = self.map_body()?;
        self.check_unfrozen(MutationOp::WriteEntry, &"entries")?;
        map.borrow_mut().clear();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Sets
    // -----------------------------------------------------------------------

    /// Snapshot of the members in insertion order.
    #[must_use]
    pub fn set_members(&self) -> Vec<Value> {
        match &self.0.body {
            Body::Set(set) => set.borrow().iter().map(|k| k.0.clone()).collect(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn set_has(&self, member: &Value) -> bool {
        match &self.0.body {
            Body::Set(set) => set.borrow().contains(&MapKey(member.clone())),
            _ => false,
        }
    }

    /// Add a member. Returns whether it was newly inserted.
    pub fn set_add(&self, member: impl Into<Value>) -> Result<bool, MutationRejected> {
        let set = self.set_body()?;
        let member = member.into();
        self.check_unfrozen(MutationOp::WriteMember, &format_args!("{member:?}"))?;
        Ok(set.borrow_mut().insert(MapKey(member)))
    }

    pub fn set_remove(&self, member: &Value) -> Result<bool, MutationRejected> {
        let set = self.set_body()?;
        self.check_unfrozen(MutationOp::WriteMember, &format_args!("{member:?}"))?;
        Ok(set.borrow_mut().shift_remove(&MapKey(member.clone())))
    }

    pub fn set_clear(&self) -> Result<(), MutationRejected> {
        let set = self.set_body()?;
        self.check_unfrozen(MutationOp::WriteMember, &"members")?;
        set.borrow_mut().clear();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Opaque wrappers and callables
    // -----------------------------------------------------------------------

    /// Epoch milliseconds, for dates.
    #[must_use]
    pub fn time(&self) -> Option<f64> {
        match &self.0.body {
            Body::Date(ms) => Some(ms.get()),
            _ => None,
        }
    }

    pub fn set_time(&self, epoch_ms: f64) -> Result<(), MutationRejected> {
        let Body::Date(ms) = &self.0.body else {
            return Err(self.wrong_kind(MutationOp::SetTime));
        };
        self.check_unfrozen(MutationOp::SetTime, &"time")?;
        ms.set(epoch_ms);
        Ok(())
    }

    /// `(source, flags)`, for patterns.
    #[must_use]
    pub fn pattern_parts(&self) -> Option<(Rc<str>, Rc<str>)> {
        match &self.0.body {
            Body::Pattern { source, flags } => Some((source.clone(), flags.clone())),
            _ => None,
        }
    }

    #[must_use]
    pub fn function_name(&self) -> Option<Rc<str>> {
        match &self.0.body {
            Body::Function { name, .. } => Some(name.clone()),
            _ => None,
        }
    }

    /// Invoke a callable. Non-callables throw.
    pub fn call(&self, args: &[Value]) -> Result<Value, Thrown> {
        match &self.0.body {
            Body::Function { call, .. } => call(args),
            _ => Err(Thrown::new(format!("{} is not callable", self.kind().name()))),
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn check_unfrozen(
        &self,
        op: MutationOp,
        target: &dyn fmt::Display,
    ) -> Result<(), MutationRejected> {
        if self.is_frozen() {
            return Err(MutationRejected::Frozen {
                op,
                target: target.to_string(),
            });
        }
        Ok(())
    }

    fn wrong_kind(&self, op: MutationOp) -> MutationRejected {
        MutationRejected::WrongKind {
            op,
            kind: self.kind().name(),
        }
    }

    fn record_body(&self, op: MutationOp) -> Result<&RefCell<Record>, MutationRejected> {
        match &self.0.body {
            Body::Record(record) => Ok(record),
            _ => Err(self.wrong_kind(op)),
        }
    }

    fn array_body(&self) -> Result<&RefCell<Vec<Value>>, MutationRejected> {
        match &self.0.body {
            Body::Array(items) => Ok(items),
            _ => Err(self.wrong_kind(MutationOp::WriteElement)),
        }
    }

    fn map_body(&self) -> Result<&RefCell<IndexMap<MapKey, Value>>, MutationRejected> {
        match &self.0.body {
            Body::Map(map) => Ok(map),
            _ => Err(self.wrong_kind(MutationOp::WriteEntry)),
        }
    }

    fn set_body(&self) -> Result<&RefCell<IndexSet<MapKey>>, MutationRejected> {
        match &self.0.body {
            Body::Set(set) => Ok(set),
            _ => Err(self.wrong_kind(MutationOp::WriteMember)),
        }
    }
}

impl PartialEq for ObjRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ObjRef {}

impl Hash for ObjRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.kind().name(), self.id().0)?;
        if self.is_frozen() {
            f.write_str(" (frozen)")?;
        }
        Ok(())
    }
}

//! Builders for containers that are frozen from the start.
//!
//! Each builder allocates a fresh container, fills it, and runs [`freeze`]
//! over the result, so nested values passed in are frozen too.

use permafrost_kernel::heap::{ObjRef, PropertyKey, Symbol, Value};

use crate::brand::Frozen;
use crate::ops::freeze;

/// A frozen record with one ordinary data property per entry.
pub fn frozen_object<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Frozen
where
    K: Into<PropertyKey>,
    V: Into<Value>,
{
    freeze(ObjRef::record_from(entries))
}

/// A frozen record with string-keyed and symbol-keyed properties.
///
/// String keys come first in enumeration order, matching every other record.
pub fn frozen_record_with_symbols<K, V, W>(
    entries: impl IntoIterator<Item = (K, V)>,
    symbols: impl IntoIterator<Item = (Symbol, W)>,
) -> Frozen
where
    K: Into<PropertyKey>,
    V: Into<Value>,
    W: Into<Value>,
{
    let strings = entries
        .into_iter()
        .map(|(key, value)| -> (PropertyKey, Value) { (key.into(), value.into()) });
    let symbols = symbols
        .into_iter()
        .map(|(sym, value)| (PropertyKey::from(sym), value.into()));
    freeze(ObjRef::record_from(strings.chain(symbols)))
}

pub fn frozen_array<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Frozen {
    freeze(ObjRef::array(items.into_iter().map(Into::into)))
}

/// A frozen fixed-length sequence.
pub fn frozen_tuple<const N: usize>(items: [Value; N]) -> Frozen {
    freeze(ObjRef::array(items))
}

/// A frozen map. Later entries replace earlier ones with an equal key.
pub fn frozen_map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Frozen
where
    K: Into<Value>,
    V: Into<Value>,
{
    freeze(ObjRef::map_from(
        entries.into_iter().map(|(k, v)| (k.into(), v.into())),
    ))
}

/// A frozen set. Duplicate members collapse to the first.
pub fn frozen_set<V: Into<Value>>(members: impl IntoIterator<Item = V>) -> Frozen {
    freeze(ObjRef::set_from(members.into_iter().map(Into::into)))
}

#[must_use]
pub fn frozen_date(epoch_ms: f64) -> Frozen {
    freeze(ObjRef::date(epoch_ms))
}

#[must_use]
pub fn frozen_pattern(source: &str, flags: &str) -> Frozen {
    freeze(ObjRef::pattern(source, flags))
}

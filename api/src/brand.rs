//! The `Frozen` brand.
//!
//! A `Frozen` is a [`Value`] that went through a freeze entry point (or was
//! checked by [`crate::as_frozen`]). It adds no storage and no heap-side
//! marker; the guarantee lives in the type. Read access goes through `Deref`.

use std::ops::Deref;

use permafrost_kernel::heap::{ObjRef, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Frozen(Value);

impl Frozen {
    /// Brand `value`. Callers must have frozen it or checked it.
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// The object handle, unless the frozen value is atomic.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjRef> {
        self.0.as_object()
    }
}

impl Deref for Frozen {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.0
    }
}

impl AsRef<Value> for Frozen {
    fn as_ref(&self) -> &Value {
        &self.0
    }
}

impl From<Frozen> for Value {
    fn from(frozen: Frozen) -> Self {
        frozen.0
    }
}

impl From<&Frozen> for Value {
    fn from(frozen: &Frozen) -> Self {
        frozen.0.clone()
    }
}

impl PartialEq<Value> for Frozen {
    fn eq(&self, other: &Value) -> bool {
        self.0 == *other
    }
}

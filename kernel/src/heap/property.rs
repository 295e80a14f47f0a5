//! Property descriptors and native function types.

use std::fmt;
use std::rc::Rc;

use super::error::Thrown;
use super::object::ObjRef;
use super::value::Value;

/// A native getter. Receives the object the read started from.
pub type Getter = Rc<dyn Fn(&ObjRef) -> Result<Value, Thrown>>;

/// A native setter. Receives the object the write started from.
pub type Setter = Rc<dyn Fn(&ObjRef, Value) -> Result<(), Thrown>>;

/// A native callable body.
pub type NativeFn = Rc<dyn Fn(&[Value]) -> Result<Value, Thrown>>;

/// An own-property descriptor.
#[derive(Clone)]
pub enum Property {
    Data {
        value: Value,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    Accessor {
        get: Option<Getter>,
        set: Option<Setter>,
        enumerable: bool,
        configurable: bool,
    },
}

impl Property {
    /// Ordinary writable, enumerable, configurable data property.
    #[must_use]
    pub fn data(value: impl Into<Value>) -> Self {
        Self::Data {
            value: value.into(),
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Writable, configurable data property that is skipped by enumerable-only
    /// enumeration.
    #[must_use]
    pub fn hidden(value: impl Into<Value>) -> Self {
        Self::Data {
            value: value.into(),
            writable: true,
            enumerable: false,
            configurable: true,
        }
    }

    /// Enumerable, configurable accessor with only a getter.
    #[must_use]
    pub fn getter(get: impl Fn(&ObjRef) -> Result<Value, Thrown> + 'static) -> Self {
        Self::Accessor {
            get: Some(Rc::new(get)),
            set: None,
            enumerable: true,
            configurable: true,
        }
    }

    #[must_use]
    pub fn is_enumerable(&self) -> bool {
        match self {
            Self::Data { enumerable, .. } | Self::Accessor { enumerable, .. } => *enumerable,
        }
    }

    #[must_use]
    pub fn is_configurable(&self) -> bool {
        match self {
            Self::Data { configurable, .. } | Self::Accessor { configurable, .. } => *configurable,
        }
    }

    /// `Some(writable)` for data properties, `None` for accessors.
    #[must_use]
    pub fn is_writable(&self) -> Option<bool> {
        match self {
            Self::Data { writable, .. } => Some(*writable),
            Self::Accessor { .. } => None,
        }
    }

    #[must_use]
    pub fn is_accessor(&self) -> bool {
        matches!(self, Self::Accessor { .. })
    }

    /// Read the property as seen from `receiver`. Accessors run their getter;
    /// an accessor without a getter reads as `undefined`.
    pub fn read(&self, receiver: &ObjRef) -> Result<Value, Thrown> {
        match self {
            Self::Data { value, .. } => Ok(value.clone()),
            Self::Accessor { get: Some(get), .. } => get(receiver),
            Self::Accessor { get: None, .. } => Ok(Value::Undefined),
        }
    }

    /// Lock the descriptor the way a single-level freeze does: data becomes
    /// read-only, everything becomes non-configurable.
    pub(crate) fn lock(&mut self) {
        match self {
            Self::Data {
                writable,
                configurable,
                ..
            } => {
                *writable = false;
                *configurable = false;
            }
            Self::Accessor { configurable, .. } => *configurable = false,
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data {
                value,
                writable,
                enumerable,
                configurable,
            } => f
                .debug_struct("Data")
                .field("value", value)
                .field("writable", writable)
                .field("enumerable", enumerable)
                .field("configurable", configurable)
                .finish(),
            Self::Accessor {
                get,
                set,
                enumerable,
                configurable,
            } => f
                .debug_struct("Accessor")
                .field("get", &get.is_some())
                .field("set", &set.is_some())
                .field("enumerable", enumerable)
                .field("configurable", configurable)
                .finish(),
        }
    }
}

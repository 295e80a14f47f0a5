//! Dynamic values, symbols, and property keys.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::object::ObjRef;

/// A heap value.
///
/// Every variant except [`Value::Object`] is atomic: it has no identity, no
/// children, and is inherently immutable.
///
/// Equality is SameValueZero: objects and symbols compare by identity, `NaN`
/// equals `NaN`, and `+0` equals `-0`.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(Rc<str>),
    Symbol(Symbol),
    Object(ObjRef),
}

impl Value {
    /// Whether this value is atomic (not an object reference).
    #[must_use]
    pub fn is_atomic(&self) -> bool {
        !matches!(self, Self::Object(_))
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&ObjRef> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// SameValueZero comparison.
    #[must_use]
    pub fn same_value_zero(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }

    /// Short type name used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Object(obj) => obj.kind().name(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same_value_zero(other)
    }
}

// Object values print as handles, never their contents, so cyclic graphs
// format in bounded time.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::BigInt(n) => write!(f, "{n}n"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Symbol(sym) => write!(f, "{sym}"),
            Self::Object(obj) => write!(f, "{obj:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Self::Symbol(value)
    }
}

impl From<ObjRef> for Value {
    fn from(value: ObjRef) -> Self {
        Self::Object(value)
    }
}

impl From<&ObjRef> for Value {
    fn from(value: &ObjRef) -> Self {
        Self::Object(value.clone())
    }
}

/// A unique symbol. Two symbols are equal only if they are the same allocation.
#[derive(Clone)]
pub struct Symbol(Rc<SymbolData>);

struct SymbolData {
    description: Option<Box<str>>,
}

impl Symbol {
    #[must_use]
    pub fn new(description: impl Into<Box<str>>) -> Self {
        Self(Rc::new(SymbolData {
            description: Some(description.into()),
        }))
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self(Rc::new(SymbolData { description: None }))
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.0), state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// An own-property key of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(Rc<str>),
    Symbol(Symbol),
}

impl PropertyKey {
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Symbol(_) => None,
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Symbol(sym) => write!(f, "[{sym}]"),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(value: &str) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<String> for PropertyKey {
    fn from(value: String) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<Symbol> for PropertyKey {
    fn from(value: Symbol) -> Self {
        Self::Symbol(value)
    }
}

impl From<&Symbol> for PropertyKey {
    fn from(value: &Symbol) -> Self {
        Self::Symbol(value.clone())
    }
}

/// Hashable SameValueZero wrapper used to key maps and sets.
#[derive(Clone, Debug)]
pub(crate) struct MapKey(pub(crate) Value);

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.same_value_zero(&other.0)
    }
}

impl Eq for MapKey {}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0 {
            Value::Undefined => state.write_u8(0),
            Value::Null => state.write_u8(1),
            Value::Bool(b) => {
                state.write_u8(2);
                b.hash(state);
            }
            Value::Number(n) => {
                state.write_u8(3);
                // +0/-0 collapse; every NaN hashes alike.
                let bits = if *n == 0.0 {
                    0
                } else if n.is_nan() {
                    f64::NAN.to_bits()
                } else {
                    n.to_bits()
                };
                bits.hash(state);
            }
            Value::BigInt(n) => {
                state.write_u8(4);
                n.hash(state);
            }
            Value::String(s) => {
                state.write_u8(5);
                s.hash(state);
            }
            Value::Symbol(sym) => {
                state.write_u8(6);
                sym.hash(state);
            }
            Value::Object(obj) => {
                state.write_u8(7);
                obj.id().hash(state);
            }
        }
    }
}

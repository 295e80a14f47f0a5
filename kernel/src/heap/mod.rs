//! Heap module: dynamic values, objects, and property descriptors.
//!
//! This is the foundational layer. No other kernel module is imported here.

pub mod error;
pub mod object;
pub mod property;
pub mod value;

pub use error::{MutationOp, MutationRejected, Thrown};
pub use object::{CustomFreeze, ObjId, ObjRef, ObjectKind, Prototype};
pub use property::{Getter, NativeFn, Property, Setter};
pub use value::{PropertyKey, Symbol, Value};

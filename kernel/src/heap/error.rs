//! Heap errors.
//!
//! `MutationRejected` is how immutability is enforced after a freeze: every
//! mutator on a frozen object returns it, and nothing in the workspace catches
//! or rewraps it. `Thrown` is the failure raised by native getters, setters,
//! and callables.

use std::fmt;

use thiserror::Error;

/// The mutation that was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOp {
    /// Assign an existing or new property.
    Assign,
    /// Define a property descriptor.
    Define,
    /// Delete a property.
    Delete,
    /// Write an element of a sequence (push, index store, truncate).
    WriteElement,
    /// Insert into or remove from a map.
    WriteEntry,
    /// Add to or remove from a set.
    WriteMember,
    /// Change the scalar state of a date.
    SetTime,
    /// Install or replace a custom freeze hook.
    SetFreezeHook,
}

impl fmt::Display for MutationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Assign => "assign",
            Self::Define => "define property",
            Self::Delete => "delete",
            Self::WriteElement => "write element",
            Self::WriteEntry => "write entry",
            Self::WriteMember => "write member",
            Self::SetTime => "set time",
            Self::SetFreezeHook => "set freeze hook",
        };
        f.write_str(s)
    }
}

/// A write against an object that does not accept it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationRejected {
    /// The target object is single-level frozen.
    #[error("cannot {op} `{target}`: object is frozen")]
    Frozen { op: MutationOp, target: String },
    /// The property exists and is not writable.
    #[error("cannot assign to read-only property `{key}`")]
    ReadOnly { key: String },
    /// The property exists and is not configurable.
    #[error("cannot {op} non-configurable property `{key}`")]
    NonConfigurable { op: MutationOp, key: String },
    /// The property is an accessor without a setter.
    #[error("property `{key}` has a getter but no setter")]
    NoSetter { key: String },
    /// A sequence index past the end.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    /// The operation does not apply to this kind of object.
    #[error("cannot {op} on a {kind}")]
    WrongKind { op: MutationOp, kind: &'static str },
    /// A native setter failed.
    #[error("setter for `{key}` threw: {source}")]
    SetterThrew {
        key: String,
        #[source]
        source: Thrown,
    },
}

/// A failure raised by native code running inside the heap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Thrown {
    pub message: String,
}

impl Thrown {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

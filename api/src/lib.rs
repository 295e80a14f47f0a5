//! Permafrost: deep-freeze for reference-counted object graphs.
//!
//! The engine crates do the graph work; this crate is the surface callers use:
//!
//! - [`freeze`], [`ensure_frozen`], [`frozen_copy`] and their batch forms
//!   return the [`Frozen`] brand.
//! - [`is_frozen`], [`is_shallow_frozen`], [`as_frozen`] check without
//!   mutating.
//! - [`assert_frozen`], [`assert_shallow_frozen`], [`assert_mutable`] turn the
//!   checks into [`FrozenAssertionError`]s.
//! - The [`builders`] construct containers that are frozen from the start.
//!
//! Mutating a frozen object through the heap API fails with
//! [`MutationRejected`].

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod assert;
pub mod brand;
pub mod builders;
pub mod ops;

pub use assert::{
    assert_frozen, assert_mutable, assert_shallow_frozen, AssertionKind, FrozenAssertionError,
};
pub use brand::Frozen;
pub use builders::{
    frozen_array, frozen_date, frozen_map, frozen_object, frozen_pattern,
    frozen_record_with_symbols, frozen_set, frozen_tuple,
};
pub use ops::{
    as_frozen, count_frozen_objects, ensure_frozen, find_unfrozen_path, freeze, freeze_all,
    freeze_record, frozen_copy, frozen_copy_all, frozen_copy_record, is_frozen,
    is_shallow_frozen, snapshot_history,
};

pub use permafrost_engine::diagnostics::{FrozenCount, GraphPath};
pub use permafrost_kernel::heap::{
    CustomFreeze, MutationRejected, ObjRef, Property, PropertyKey, Prototype, Symbol, Thrown,
    Value,
};
pub use permafrost_engine::policy::{CustomFreezePolicyV1, TraversalPolicyV1};

//! Permafrost Engine: the traversals over the kernel heap.
//!
//! This crate depends only on `permafrost_kernel`. It does NOT depend on the
//! public `permafrost` facade.
//!
//! # Crate dependency graph
//!
//! ```text
//! permafrost_kernel  ←  permafrost_engine  ←  permafrost
//! (heap, classifier)    (traversals)          (brand, assertions, builders)
//! ```
//!
//! # Entry points
//!
//! - [`freeze::freeze`]: in-place deep freeze, idempotent
//! - [`predicate::is_deep_frozen`]: read-only deep check
//! - [`clone::deep_clone`] / [`clone::frozen_copy`]: aliasing-preserving copy
//! - [`diagnostics::find_unfrozen_path`] / [`diagnostics::count_frozen_objects`]
//!
//! Every traversal is iterative: graph depth is bounded by memory, never by
//! the native call stack. Scoped collections (visited set, work stack, clone
//! map) live for exactly one call.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod clone;
pub mod diagnostics;
pub mod error;
pub mod freeze;
pub mod frontier;
pub mod policy;
pub mod predicate;

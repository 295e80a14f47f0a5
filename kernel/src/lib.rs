//! Permafrost Kernel: the object heap that the freeze engine operates on.
//!
//! # API Surface
//!
//! - [`heap`] -- values, objects, property descriptors, single-level freeze
//! - [`classify::classify`] -- decide a value's node kind and enumerate its children
//! - [`proof::snapshot::structural_digest`] -- cycle-safe canonical digest of a graph
//!
//! # Module Dependency Direction
//!
//! `heap` ← `classify` ← `proof`
//!
//! One-way only. No cycles. `heap` depends on nothing internal.
//!
//! The heap is single-threaded (`Rc`/`RefCell`). Values are `!Send` and
//! `!Sync`, so a traversal always has exclusive access to the graph it walks.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod classify;
pub mod heap;
pub mod proof;

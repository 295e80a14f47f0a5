//! Proof module: canonical JSON, content hashing, structural snapshots.
//!
//! Depends on `heap` and `classify`. Nothing depends on `proof` within the kernel.

pub mod canon;
pub mod hash;
pub mod snapshot;

//! Typed engine errors.
//!
//! `TraversalError` represents pre-flight failures and report serialization
//! failures only. Traversals themselves never fail: property-access failures
//! are skipped, and mutation rejections belong to the code that attempts the
//! mutation.

use permafrost_kernel::proof::canon::CanonError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    /// The traversal policy failed validation.
    #[error("invalid traversal policy: {detail}")]
    InvalidPolicy { detail: String },
    /// A diagnostics report could not be canonicalized.
    #[error(transparent)]
    Canon(#[from] CanonError),
}

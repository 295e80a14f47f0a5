//! Assertion helpers that turn the frozen checks into errors.
//!
//! The optional `name` labels the checked value in the message; it defaults
//! to `"value"`.

use permafrost_engine::diagnostics;
use permafrost_engine::predicate;
use permafrost_kernel::heap::Value;
use thiserror::Error;
use tracing::debug;

/// Which assertion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionKind {
    /// [`assert_frozen`]: some reachable container is mutable.
    NotFrozen,
    /// [`assert_shallow_frozen`]: the root is mutable.
    NotShallowFrozen,
    /// [`assert_mutable`]: the root is frozen.
    Frozen,
}

/// A frozen-state assertion did not hold. Carries the offending value.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FrozenAssertionError {
    pub kind: AssertionKind,
    pub message: String,
    pub value: Value,
}

impl FrozenAssertionError {
    fn new(kind: AssertionKind, message: String, value: &Value) -> Self {
        debug!(?kind, %message, "frozen assertion failed");
        Self {
            kind,
            message,
            value: value.clone(),
        }
    }
}

/// Fail unless `value` is deep-frozen. The message names the first unfrozen
/// container.
///
/// # Errors
///
/// Returns [`FrozenAssertionError`] with [`AssertionKind::NotFrozen`].
pub fn assert_frozen(value: &Value, name: Option<&str>) -> Result<(), FrozenAssertionError> {
    if predicate::is_deep_frozen(value) {
        return Ok(());
    }
    let name = name.unwrap_or("value");
    let message = match diagnostics::find_unfrozen_path(value) {
        Some(path) => format!("expected {name} to be deeply frozen, but {path} is mutable"),
        None => format!("expected {name} to be deeply frozen"),
    };
    Err(FrozenAssertionError::new(
        AssertionKind::NotFrozen,
        message,
        value,
    ))
}

/// Fail unless the root of `value` is frozen.
///
/// # Errors
///
/// Returns [`FrozenAssertionError`] with [`AssertionKind::NotShallowFrozen`].
pub fn assert_shallow_frozen(value: &Value, name: Option<&str>) -> Result<(), FrozenAssertionError> {
    if predicate::is_shallow_frozen(value) {
        return Ok(());
    }
    let name = name.unwrap_or("value");
    Err(FrozenAssertionError::new(
        AssertionKind::NotShallowFrozen,
        format!("expected {name} to be frozen"),
        value,
    ))
}

/// Fail if the root of `value` is frozen. Atomics count as frozen.
///
/// # Errors
///
/// Returns [`FrozenAssertionError`] with [`AssertionKind::Frozen`].
pub fn assert_mutable(value: &Value, name: Option<&str>) -> Result<(), FrozenAssertionError> {
    if !predicate::is_shallow_frozen(value) {
        return Ok(());
    }
    let name = name.unwrap_or("value");
    Err(FrozenAssertionError::new(
        AssertionKind::Frozen,
        format!("expected {name} to be mutable, but it is frozen"),
        value,
    ))
}

//! Traversal policy types.

use crate::error::TraversalError;

/// Label rendered for the root of a graph in diagnostics paths.
pub const DEFAULT_ROOT_LABEL: &str = "(root)";

/// Configuration shared by every traversal entry point.
///
/// The plain entry points (`freeze`, `deep_clone`, ...) use
/// [`TraversalPolicyV1::default`]; the `*_with_policy` variants validate the
/// supplied policy first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalPolicyV1 {
    /// Path text used when the root itself is the reported node.
    pub root_label: String,
    /// Pre-allocation for work stacks, visited sets, and clone maps.
    pub initial_capacity: usize,
    /// How the freeze engine treats records carrying a custom freeze hook.
    pub custom_freeze: CustomFreezePolicyV1,
}

impl TraversalPolicyV1 {
    /// Validate the policy.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::InvalidPolicy`] if `root_label` is blank or
    /// `initial_capacity` is zero.
    pub fn validate(&self) -> Result<(), TraversalError> {
        if self.root_label.trim().is_empty() {
            return Err(TraversalError::InvalidPolicy {
                detail: "root_label must not be blank".into(),
            });
        }
        if self.initial_capacity == 0 {
            return Err(TraversalError::InvalidPolicy {
                detail: "initial_capacity must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for TraversalPolicyV1 {
    fn default() -> Self {
        Self {
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            initial_capacity: 64,
            custom_freeze: CustomFreezePolicyV1::Delegate,
        }
    }
}

/// Custom freeze hook handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomFreezePolicyV1 {
    /// Call the hook instead of traversing the record. Default.
    Delegate,
    /// Traverse hook-bearing records like any other record.
    Ignore,
}

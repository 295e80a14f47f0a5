//! Diagnostics: locate the first unfrozen container and count frozen ones.
//!
//! Both walks are read-only, iterative, and cycle-safe. Callables are never
//! reported and never counted.

use permafrost_kernel::classify::{classify_object, ChildSlot};
use permafrost_kernel::heap::{PropertyKey, Value};
use permafrost_kernel::proof::canon::canonical_json_bytes;
use permafrost_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_REPORT};
use serde_json::json;
use tracing::debug;

use crate::error::TraversalError;
use crate::frontier::{schedulable, VisitedSet};
use crate::policy::TraversalPolicyV1;

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// Location of a node relative to the traversal root.
///
/// Renders as the root label when empty, otherwise as accessor notation:
/// `a.b`, `arr[1]`, `[Symbol(id)]`, `m[key #0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphPath {
    root_label: String,
    segments: Vec<ChildSlot>,
}

impl GraphPath {
    #[must_use]
    pub fn segments(&self) -> &[ChildSlot] {
        &self.segments
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl std::fmt::Display for GraphPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            return f.write_str(&self.root_label);
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && matches!(segment, ChildSlot::Property(PropertyKey::String(_))) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Path to the first unfrozen container in depth-first pre-order, or `None`
/// if the graph is deep-frozen.
#[must_use]
pub fn find_unfrozen_path(value: &Value) -> Option<GraphPath> {
    run_find(value, &TraversalPolicyV1::default())
}

/// [`find_unfrozen_path`] with an explicit policy (root label, capacity).
///
/// # Errors
///
/// Returns [`TraversalError::InvalidPolicy`] if the policy fails validation.
pub fn find_unfrozen_path_with_policy(
    value: &Value,
    policy: &TraversalPolicyV1,
) -> Result<Option<GraphPath>, TraversalError> {
    policy.validate()?;
    Ok(run_find(value, policy))
}

fn run_find(value: &Value, policy: &TraversalPolicyV1) -> Option<GraphPath> {
    let root = schedulable(value)?;
    let mut visited = VisitedSet::with_capacity(policy.initial_capacity);
    // Each trail entry is (parent trail index, slot in parent).
    let mut trail: Vec<(usize, Option<ChildSlot>)> = vec![(0, None)];
    let mut stack = vec![(root, 0usize)];

    while let Some((obj, at)) = stack.pop() {
        if !visited.insert(&obj) {
            continue;
        }
        if !obj.is_frozen() {
            let path = rebuild(&trail, at, &policy.root_label);
            debug!(path = %path, "unfrozen container found");
            return Some(path);
        }
        let children = classify_object(&obj).children();
        for (slot, child) in children.into_iter().rev() {
            if let Some(child) = schedulable(&child) {
                if !visited.contains(&child) {
                    trail.push((at, Some(slot)));
                    stack.push((child, trail.len() - 1));
                }
            }
        }
    }
    None
}

fn rebuild(trail: &[(usize, Option<ChildSlot>)], mut at: usize, root_label: &str) -> GraphPath {
    let mut segments = Vec::new();
    while let (parent, Some(slot)) = &trail[at] {
        segments.push(slot.clone());
        at = *parent;
    }
    segments.reverse();
    GraphPath {
        root_label: root_label.to_string(),
        segments,
    }
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Frozen and unfrozen container counts over a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrozenCount {
    pub frozen: usize,
    pub unfrozen: usize,
    /// Always `frozen + unfrozen`.
    pub total: usize,
}

/// Count every distinct reachable container once. Atomics and callables are
/// excluded, so an atomic root yields all zeros.
#[must_use]
pub fn count_frozen_objects(value: &Value) -> FrozenCount {
    run_count(value, TraversalPolicyV1::default().initial_capacity)
}

/// [`count_frozen_objects`] with an explicit policy.
///
/// # Errors
///
/// Returns [`TraversalError::InvalidPolicy`] if the policy fails validation.
pub fn count_frozen_objects_with_policy(
    value: &Value,
    policy: &TraversalPolicyV1,
) -> Result<FrozenCount, TraversalError> {
    policy.validate()?;
    Ok(run_count(value, policy.initial_capacity))
}

fn run_count(value: &Value, capacity: usize) -> FrozenCount {
    let mut count = FrozenCount::default();
    let Some(root) = schedulable(value) else {
        return count;
    };
    let mut visited = VisitedSet::with_capacity(capacity);
    let mut stack = Vec::with_capacity(capacity);
    stack.push(root);

    while let Some(obj) = stack.pop() {
        if !visited.insert(&obj) {
            continue;
        }
        if obj.is_frozen() {
            count.frozen += 1;
        } else {
            count.unfrozen += 1;
        }
        for (_, child) in classify_object(&obj).children() {
            if let Some(child) = schedulable(&child) {
                if !visited.contains(&child) {
                    stack.push(child);
                }
            }
        }
    }
    count.total = count.frozen + count.unfrozen;
    count
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Combined diagnostics for one graph, serializable to canonical JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsReportV1 {
    /// Rendered path of the first unfrozen container, if any.
    pub path: Option<String>,
    pub count: FrozenCount,
}

impl DiagnosticsReportV1 {
    /// Run both diagnostics walks over `value`.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::InvalidPolicy`] if the policy fails validation.
    pub fn inspect(value: &Value, policy: &TraversalPolicyV1) -> Result<Self, TraversalError> {
        policy.validate()?;
        Ok(Self {
            path: run_find(value, policy).map(|p| p.to_string()),
            count: run_count(value, policy.initial_capacity),
        })
    }

    #[must_use]
    pub fn is_deep_frozen(&self) -> bool {
        self.path.is_none()
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "schema_version": "permafrost.diagnostics.v1",
            "deep_frozen": self.is_deep_frozen(),
            "first_unfrozen_path": self.path,
            "frozen": self.count.frozen,
            "unfrozen": self.count.unfrozen,
            "total": self.count.total,
        })
    }

    /// Canonical JSON bytes of [`DiagnosticsReportV1::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::Canon`] if canonicalization fails.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, TraversalError> {
        Ok(canonical_json_bytes(&self.to_json())?)
    }

    /// Domain-separated digest of the canonical report.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::Canon`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, TraversalError> {
        Ok(canonical_hash(DOMAIN_REPORT, &self.canonical_bytes()?))
    }
}

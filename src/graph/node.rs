//! Graph node and edge records.

use crate::dsa::DynArray;

/// A weighted connection to another node.
///
/// Stored as a dense index rather than an id, so traversal never hashes.
/// Every logical road produces two of these, one in each endpoint's
/// adjacency list, with identical weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Dense index of the target node.
    pub to: usize,
    /// Road distance in kilometers; never negative.
    pub weight: f64,
}

/// A registered location.
///
/// `id` is immutable once registered and its dense index is never reused
/// or reassigned. `name`, `category` and the coordinates are descriptive
/// only - no algorithm reads them.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    /// Free-form kind tag: "hospital", "donor_area", ...
    pub category: String,
    pub x: i32,
    pub y: i32,
    /// Outgoing edges, in insertion order.
    pub edges: DynArray<Edge>,
}

impl GraphNode {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        x: i32,
        y: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            x,
            y,
            edges: DynArray::new(),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

//! # Bloodlink
//!
//! In-memory matching core for a blood donation network.
//!
//! ## Architecture
//!
//! The core consists of:
//! - **Dsa**: Hand-rolled containers (dynamic array, chained hash table,
//!   doubly linked list, binary-heap priority queue)
//! - **Graph**: Weighted undirected city graph with Dijkstra and BFS queries
//! - **Types**: Domain records (Donor, Recipient, Transaction, BloodGroup)
//! - **Engine**: Compatibility table and the donor/recipient matching engine
//! - **Registry**: Owning stores for domain records plus the transaction log
//!
//! ## Design Principles
//!
//! 1. **Index-based linkage**: Linked structures live in slab arenas and
//!    link by `usize` handle - no raw pointers, no manual deallocation
//! 2. **Synchronous execution**: Every operation runs to completion on one
//!    thread; the hosting layer serializes access
//! 3. **Sentinels for absence, errors for misuse**: Unknown ids and
//!    unreachable nodes yield empty/optional results; out-of-range indexing
//!    and popping an empty heap fail loudly
//! 4. **External ownership**: Donors and recipients are owned by the
//!    registry; the engine only holds references and only writes `status`

// ============================================================================
// Module declarations
// ============================================================================

/// Hand-rolled containers: DynArray, HashTable, LinkedList, PriorityQueue
pub mod dsa;

/// Weighted undirected graph with shortest-path and breadth-first queries
pub mod graph;

/// Domain records: BloodGroup, Donor, Recipient, Transaction
pub mod types;

/// Compatibility table and matching engine
pub mod engine;

/// Owning stores for donors, recipients and the transaction log
pub mod registry;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use dsa::{DsaError, DynArray, HashTable, LinkedList, PriorityQueue};
pub use engine::{CompatibilityMatrix, MatchingEngine};
pub use graph::{RouteGraph, ShortestPath};
pub use registry::Registry;
pub use types::{
    BloodGroup, Donor, DonorHandle, DonorStatus, Recipient, RecipientHandle, RequestStatus,
    Transaction, Urgency,
};

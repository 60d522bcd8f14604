//! Hand-rolled containers backing the graph and the matching engine.
//!
//! ## Components
//!
//! - [`DynArray`]: Growable contiguous array, the foundation everything
//!   else builds on
//! - [`HashTable`]: Separate-chaining hash map with FNV-1a hashing
//! - [`LinkedList`]: Doubly linked list with O(1) access at both ends
//! - [`PriorityQueue`]: Array-backed binary heap with pluggable ordering
//!
//! ## Memory Model
//!
//! Linked structures (hash chains, list nodes) store their nodes in a
//! `slab::Slab` arena and link by `usize` handle. Per official slab docs
//! (https://docs.rs/slab/0.4.11): O(1) insert, remove, and lookup; keys
//! may be reused after removal.
//!
//! ## Error Contract
//!
//! Out-of-range indexing and popping/peeking an empty heap are contract
//! violations and surface as [`DsaError`]. Missing keys are ordinary
//! lookups and surface as `Option`/`bool` results.

pub mod array;
pub mod error;
pub mod heap;
pub mod list;
pub mod table;

pub use array::DynArray;
pub use error::DsaError;
pub use heap::{Comparator, MinFirst, PriorityQueue};
pub use list::LinkedList;
pub use table::{Fnv32Hasher, HashTable};

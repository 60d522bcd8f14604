//! Donor/recipient matching.
//!
//! ## Matching Rules
//!
//! - A donor can serve a request only if the compatibility table allows
//!   the donor's group to satisfy the requested group
//! - Among compatible donors, only `Available` ones are considered
//! - The winner is the candidate with the smallest shortest-path
//!   distance to the request's location; unreachable candidates never
//!   qualify
//! - Requests queue most-urgent first, FIFO among equal urgency
//!
//! ## Example
//!
//! ```
//! use bloodlink::engine::MatchingEngine;
//! use bloodlink::graph::RouteGraph;
//! use bloodlink::types::{BloodGroup, Donor, Recipient, Urgency};
//!
//! let mut graph = RouteGraph::new();
//! graph.add_node("H1", "PIMS", "hospital", 100, 150);
//! graph.add_node("D1", "F-8 Sector", "donor_area", 120, 130);
//! graph.add_edge("H1", "D1", 5.2);
//!
//! let mut engine = MatchingEngine::new();
//! let donor = Donor::new("Ayesha", 29, BloodGroup::ONeg, "Islamabad", "F-8", "D1")
//!     .into_handle();
//! engine.add_donor(donor);
//!
//! let request = Recipient::new("Hamza", BloodGroup::AbPos, Urgency::High, "PIMS", "H1");
//! let matched = engine.find_best_donor_for(&graph, &request);
//! assert!(matched.is_some());
//! ```

pub mod compat;
pub mod matcher;

pub use compat::CompatibilityMatrix;
pub use matcher::MatchingEngine;

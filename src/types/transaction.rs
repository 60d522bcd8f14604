//! Completed-match transaction record.

use serde::{Deserialize, Serialize};

use crate::types::BloodGroup;

/// The record of one completed donor/recipient match.
///
/// Created by the registry when a match is recorded and kept in the
/// newest-first transaction log. The core attaches no wall-clock
/// timestamp - `sequence` orders transactions, and the surrounding
/// layer may stamp real time when it serializes the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Registry-assigned identifier (`TRN-001`, ...).
    pub id: String,
    pub donor_id: String,
    pub recipient_id: String,
    pub blood_group: BloodGroup,
    pub units: u32,
    /// Shortest-path distance between donor and recipient at match time.
    pub distance_km: f64,
    /// Monotonic registry sequence; higher is more recent.
    pub sequence: u64,
}

// ============================================================================
// Unit Tests
// ============================================================================

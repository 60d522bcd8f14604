//! Donor record and status.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::types::BloodGroup;

/// Shared reference to a donor record.
///
/// The registry owns the record; the engine's pools hold these handles
/// and read/write only the `status` field.
pub type DonorHandle = Rc<RefCell<Donor>>;

/// Whether a donor can currently be matched.
///
/// Transitions are driven by the surrounding layer (a donor accepts a
/// request, finishes a donation, goes on cooldown); the engine only
/// reads this when filtering candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DonorStatus {
    /// Can be matched right now.
    #[default]
    Available,
    /// Mid-donation or reserved for a matched request.
    Busy,
    /// Temporarily out of the pool (cooldown, medical hold).
    Unavailable,
}

/// A registered donor.
///
/// `id` is empty until the registry assigns one (`DON-001`, ...).
/// `location_node_id` names the donor's node in the city graph; an id
/// that is not registered in the graph simply never wins a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    /// Registry-assigned identifier.
    pub id: String,
    pub name: String,
    pub age: u32,
    pub phone: String,
    pub blood_group: BloodGroup,
    pub city: String,
    pub area: String,
    pub status: DonorStatus,
    /// Graph node the donor donates from.
    pub location_node_id: String,
    pub total_donations: u32,
}

impl Donor {
    /// Create an unregistered donor (empty id, `Available`, zero
    /// donations).
    pub fn new(
        name: impl Into<String>,
        age: u32,
        blood_group: BloodGroup,
        city: impl Into<String>,
        area: impl Into<String>,
        location_node_id: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            age,
            phone: String::new(),
            blood_group,
            city: city.into(),
            area: area.into(),
            status: DonorStatus::Available,
            location_node_id: location_node_id.into(),
            total_donations: 0,
        }
    }

    /// Check whether the donor can be matched right now.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == DonorStatus::Available
    }

    /// Wrap into a shared handle.
    pub fn into_handle(self) -> DonorHandle {
        Rc::new(RefCell::new(self))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

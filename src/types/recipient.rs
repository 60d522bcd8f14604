//! Recipient request record, urgency scale and request status.

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::BloodGroup;

/// Shared reference to a recipient request.
pub type RecipientHandle = Rc<RefCell<Recipient>>;

/// Four-level urgency scale; lower rank is served first.
///
/// Derived ordering matches the rank, so `Immediate < Low`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Urgency {
    Immediate,
    High,
    Medium,
    Low,
}

impl Urgency {
    /// Numeric rank, 1 (Immediate) through 4 (Low).
    #[inline]
    pub fn rank(self) -> u32 {
        match self {
            Urgency::Immediate => 1,
            Urgency::High => 2,
            Urgency::Medium => 3,
            Urgency::Low => 4,
        }
    }
}

impl FromStr for Urgency {
    type Err = UnknownUrgency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Immediate" => Ok(Urgency::Immediate),
            "High" => Ok(Urgency::High),
            "Medium" => Ok(Urgency::Medium),
            "Low" => Ok(Urgency::Low),
            other => Err(UnknownUrgency(other.to_string())),
        }
    }
}

/// Parse failure for an urgency string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown urgency level: {0:?}")]
pub struct UnknownUrgency(pub String);

/// Lifecycle of a request.
///
/// Transitions are owned by the surrounding layer; the engine never
/// moves a request between states on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequestStatus {
    #[default]
    Pending,
    Searching,
    Matched,
    Completed,
    Cancelled,
}

/// A pending request for blood at a hospital location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    /// Registry-assigned identifier.
    pub id: String,
    pub patient_name: String,
    pub blood_group_needed: BloodGroup,
    pub urgency: Urgency,
    pub hospital_name: String,
    /// Graph node where the blood is needed.
    pub location_node_id: String,
    pub units_needed: u32,
    pub status: RequestStatus,
    /// Set once a donor has been matched.
    pub matched_donor_id: Option<String>,
}

impl Recipient {
    /// Create an unregistered request (empty id, `Pending`, one unit).
    pub fn new(
        patient_name: impl Into<String>,
        blood_group_needed: BloodGroup,
        urgency: Urgency,
        hospital_name: impl Into<String>,
        location_node_id: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            patient_name: patient_name.into(),
            blood_group_needed,
            urgency,
            hospital_name: hospital_name.into(),
            location_node_id: location_node_id.into(),
            units_needed: 1,
            status: RequestStatus::Pending,
            matched_donor_id: None,
        }
    }

    /// Wrap into a shared handle.
    pub fn into_handle(self) -> RecipientHandle {
        Rc::new(RefCell::new(self))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgency_ranks() {
        assert_eq!(Urgency::Immediate.rank(), 1);
        assert_eq!(Urgency::High.rank(), 2);
        assert_eq!(Urgency::Medium.rank(), 3);
        assert_eq!(Urgency::Low.rank(), 4);
    }

    #[test]
    fn test_urgency_ordering_matches_rank() {
        assert!(Urgency::Immediate < Urgency::High);
        assert!(Urgency::High < Urgency::Medium);
        assert!(Urgency::Medium < Urgency::Low);
    }

    #[test]
    fn test_urgency_parse() {
        assert_eq!("Immediate".parse(), Ok(Urgency::Immediate));
        assert_eq!("Low".parse(), Ok(Urgency::Low));
        assert!("Critical".parse::<Urgency>().is_err());
    }

    #[test]
    fn test_new_defaults() {
        let request = Recipient::new(
            "Hamza",
            BloodGroup::AbPos,
            Urgency::High,
            "PIMS",
            "H1",
        );

        assert!(request.id.is_empty());
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.units_needed, 1);
        assert!(request.matched_donor_id.is_none());
    }
}

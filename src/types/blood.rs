//! Blood group enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The eight ABO/Rh blood groups.
///
/// Serialized in the conventional clinical notation (`"O-"`, `"AB+"`).
///
/// ## Example
///
/// ```
/// use bloodlink::types::BloodGroup;
///
/// let group: BloodGroup = "O-".parse().unwrap();
/// assert_eq!(group, BloodGroup::ONeg);
/// assert_eq!(group.to_string(), "O-");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "O+")]
    OPos,
    #[serde(rename = "O-")]
    ONeg,
    #[serde(rename = "A+")]
    APos,
    #[serde(rename = "A-")]
    ANeg,
    #[serde(rename = "B+")]
    BPos,
    #[serde(rename = "B-")]
    BNeg,
    #[serde(rename = "AB+")]
    AbPos,
    #[serde(rename = "AB-")]
    AbNeg,
}

impl BloodGroup {
    /// Every group, in a fixed enumeration order.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::OPos,
        BloodGroup::ONeg,
        BloodGroup::APos,
        BloodGroup::ANeg,
        BloodGroup::BPos,
        BloodGroup::BNeg,
        BloodGroup::AbPos,
        BloodGroup::AbNeg,
    ];

    /// Clinical notation for this group.
    pub fn as_str(self) -> &'static str {
        match self {
            BloodGroup::OPos => "O+",
            BloodGroup::ONeg => "O-",
            BloodGroup::APos => "A+",
            BloodGroup::ANeg => "A-",
            BloodGroup::BPos => "B+",
            BloodGroup::BNeg => "B-",
            BloodGroup::AbPos => "AB+",
            BloodGroup::AbNeg => "AB-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = UnknownBloodGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "O+" => Ok(BloodGroup::OPos),
            "O-" => Ok(BloodGroup::ONeg),
            "A+" => Ok(BloodGroup::APos),
            "A-" => Ok(BloodGroup::ANeg),
            "B+" => Ok(BloodGroup::BPos),
            "B-" => Ok(BloodGroup::BNeg),
            "AB+" => Ok(BloodGroup::AbPos),
            "AB-" => Ok(BloodGroup::AbNeg),
            other => Err(UnknownBloodGroup(other.to_string())),
        }
    }
}

/// Parse failure for a blood group string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blood group: {0:?}")]
pub struct UnknownBloodGroup(pub String);

// ============================================================================
// Unit Tests
// ============================================================================

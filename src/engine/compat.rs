//! Blood group compatibility table.
//!
//! ## Construction
//!
//! The donor-to-recipient direction is authored once from the ABO/Rh
//! rules; the recipient-to-donor direction is derived by inverting it.
//! Hand-authoring both directions invites silent asymmetry, so the
//! inverse is always mechanical.

use crate::dsa::{DynArray, HashTable};
use crate::types::BloodGroup;

/// Bidirectional can-satisfy relation over the eight blood groups.
///
/// Both lookup directions are precomputed; membership tests walk a set
/// of at most eight entries.
///
/// ## Example
///
/// ```
/// use bloodlink::engine::CompatibilityMatrix;
/// use bloodlink::types::BloodGroup;
///
/// let table = CompatibilityMatrix::new();
/// // O- is the universal donor.
/// assert!(table.can_satisfy(BloodGroup::ONeg, BloodGroup::AbPos));
/// // A+ cannot serve an O+ request.
/// assert!(!table.can_satisfy(BloodGroup::APos, BloodGroup::OPos));
/// ```
#[derive(Debug, Clone)]
pub struct CompatibilityMatrix {
    /// Donor group -> groups it may serve.
    donor_to_recipient: HashTable<BloodGroup, DynArray<BloodGroup>>,
    /// Recipient group -> groups that may serve it (derived).
    recipient_to_donor: HashTable<BloodGroup, DynArray<BloodGroup>>,
}

impl Default for CompatibilityMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl CompatibilityMatrix {
    /// Build the table from the ABO/Rh donation rules.
    pub fn new() -> Self {
        use BloodGroup::*;

        let mut donor_to_recipient: HashTable<BloodGroup, DynArray<BloodGroup>> = HashTable::new();
        let mut author = |donor: BloodGroup, recipients: &[BloodGroup]| {
            donor_to_recipient.insert(donor, recipients.iter().copied().collect());
        };

        author(OPos, &[OPos, APos, BPos, AbPos]);
        // O- is the universal donor.
        author(ONeg, &[OPos, ONeg, APos, ANeg, BPos, BNeg, AbPos, AbNeg]);
        author(APos, &[APos, AbPos]);
        author(ANeg, &[APos, ANeg, AbPos, AbNeg]);
        author(BPos, &[BPos, AbPos]);
        author(BNeg, &[BPos, BNeg, AbPos, AbNeg]);
        // AB+ is the universal recipient; AB donors serve only AB.
        author(AbPos, &[AbPos]);
        author(AbNeg, &[AbPos, AbNeg]);

        // Derive the inverse so the two directions cannot disagree.
        let mut recipient_to_donor: HashTable<BloodGroup, DynArray<BloodGroup>> =
            HashTable::new();
        for group in BloodGroup::ALL {
            recipient_to_donor.insert(group, DynArray::new());
        }
        for donor in BloodGroup::ALL {
            if let Some(recipients) = donor_to_recipient.get(&donor) {
                for &recipient in recipients.iter() {
                    if let Some(suppliers) = recipient_to_donor.get_mut(&recipient) {
                        suppliers.push(donor);
                    }
                }
            }
        }

        Self {
            donor_to_recipient,
            recipient_to_donor,
        }
    }

    /// Check whether `donor` blood may be given to a `recipient` request.
    pub fn can_satisfy(&self, donor: BloodGroup, recipient: BloodGroup) -> bool {
        self.donor_to_recipient
            .get(&donor)
            .map(|set| set.iter().any(|&r| r == recipient))
            .unwrap_or(false)
    }

    /// Donor groups that may serve `recipient`, in table order.
    pub fn acceptable_suppliers_for(&self, recipient: BloodGroup) -> DynArray<BloodGroup> {
        self.recipient_to_donor
            .get(&recipient)
            .cloned()
            .unwrap_or_default()
    }

    /// Recipient groups that `donor` may serve, in table order.
    pub fn acceptable_consumers_for(&self, donor: BloodGroup) -> DynArray<BloodGroup> {
        self.donor_to_recipient
            .get(&donor)
            .cloned()
            .unwrap_or_default()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use BloodGroup::*;

    #[test]
    fn test_universal_donor() {
        let table = CompatibilityMatrix::new();
        for recipient in BloodGroup::ALL {
            assert!(
                table.can_satisfy(ONeg, recipient),
                "O- must serve {recipient}"
            );
        }
    }

    #[test]
    fn test_universal_recipient() {
        let table = CompatibilityMatrix::new();
        for donor in BloodGroup::ALL {
            assert!(
                table.can_satisfy(donor, AbPos),
                "{donor} must serve AB+"
            );
        }
    }

    #[test]
    fn test_o_neg_only_receives_o_neg() {
        let table = CompatibilityMatrix::new();
        let suppliers = table.acceptable_suppliers_for(ONeg);

        assert_eq!(suppliers.len(), 1);
        assert_eq!(suppliers[0], ONeg);
    }

    #[test]
    fn test_rh_negative_never_receives_positive() {
        let table = CompatibilityMatrix::new();
        for donor in [OPos, APos, BPos, AbPos] {
            for recipient in [ONeg, ANeg, BNeg, AbNeg] {
                assert!(
                    !table.can_satisfy(donor, recipient),
                    "{donor} must not serve {recipient}"
                );
            }
        }
    }

    #[test]
    fn test_spot_checks() {
        let table = CompatibilityMatrix::new();

        assert!(table.can_satisfy(OPos, APos));
        assert!(table.can_satisfy(ANeg, AbNeg));
        assert!(table.can_satisfy(BNeg, BPos));
        assert!(!table.can_satisfy(APos, BPos));
        assert!(!table.can_satisfy(AbPos, APos));
        assert!(!table.can_satisfy(BPos, ANeg));
    }

    #[test]
    fn test_closure_between_directions() {
        // can_satisfy(x, y) iff y in consumers(x) iff x in suppliers(y).
        let table = CompatibilityMatrix::new();
        for x in BloodGroup::ALL {
            for y in BloodGroup::ALL {
                let direct = table.can_satisfy(x, y);
                let via_consumers =
                    table.acceptable_consumers_for(x).iter().any(|&g| g == y);
                let via_suppliers =
                    table.acceptable_suppliers_for(y).iter().any(|&g| g == x);

                assert_eq!(direct, via_consumers, "consumers disagree for ({x}, {y})");
                assert_eq!(direct, via_suppliers, "suppliers disagree for ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_pair_count() {
        // The ABO/Rh table admits exactly 27 compatible (donor, recipient)
        // pairs.
        let table = CompatibilityMatrix::new();
        let mut count = 0;
        for x in BloodGroup::ALL {
            for y in BloodGroup::ALL {
                if table.can_satisfy(x, y) {
                    count += 1;
                }
            }
        }
        assert_eq!(count, 27);
    }
}

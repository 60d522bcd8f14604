//! Owning stores for domain records.
//!
//! The hosting layer constructs one [`Registry`] next to the graph and
//! the engine and passes records through it. The registry owns every
//! donor/recipient record (the engine's pools only hold handles) and
//! keeps the newest-first transaction log.

use std::rc::Rc;

use tracing::info;

use crate::dsa::{HashTable, LinkedList};
use crate::types::{Donor, DonorHandle, Recipient, RecipientHandle, Transaction};

/// Id-keyed stores for donors and recipients plus the transaction log.
///
/// ## Example
///
/// ```
/// use bloodlink::registry::Registry;
/// use bloodlink::types::{BloodGroup, Donor};
///
/// let mut registry = Registry::new();
/// let donor = Donor::new("Ayesha", 29, BloodGroup::ONeg, "Islamabad", "F-8", "D1");
/// let handle = registry.register_donor(donor);
///
/// assert_eq!(handle.borrow().id, "DON-001");
/// assert!(registry.donor("DON-001").is_some());
/// ```
#[derive(Default)]
pub struct Registry {
    donors: HashTable<String, DonorHandle>,
    recipients: HashTable<String, RecipientHandle>,
    /// Completed matches, newest first.
    transactions: LinkedList<Transaction>,
    next_donor: u32,
    next_recipient: u32,
    next_transaction: u64,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Donors
    // ========================================================================

    /// Take ownership of a donor record and return its shared handle.
    ///
    /// Assigns the next sequential id (`DON-001`, ...) when the record
    /// arrives without one; a record that already carries an id keeps it.
    pub fn register_donor(&mut self, mut donor: Donor) -> DonorHandle {
        if donor.id.is_empty() {
            self.next_donor += 1;
            donor.id = format!("DON-{:03}", self.next_donor);
        }
        info!(id = %donor.id, group = %donor.blood_group, "donor registered");

        let handle = donor.into_handle();
        let id = handle.borrow().id.clone();
        self.donors.insert(id, Rc::clone(&handle));
        handle
    }

    /// Look up a donor handle by id.
    pub fn donor(&self, id: &str) -> Option<DonorHandle> {
        self.donors.get(id).cloned()
    }

    /// Number of registered donors.
    #[inline]
    pub fn donor_count(&self) -> usize {
        self.donors.len()
    }

    // ========================================================================
    // Recipients
    // ========================================================================

    /// Take ownership of a recipient request and return its handle.
    ///
    /// Assigns `REC-001`, ... when the record arrives without an id.
    pub fn register_recipient(&mut self, mut recipient: Recipient) -> RecipientHandle {
        if recipient.id.is_empty() {
            self.next_recipient += 1;
            recipient.id = format!("REC-{:03}", self.next_recipient);
        }
        info!(
            id = %recipient.id,
            group = %recipient.blood_group_needed,
            urgency = ?recipient.urgency,
            "request registered"
        );

        let handle = recipient.into_handle();
        let id = handle.borrow().id.clone();
        self.recipients.insert(id, Rc::clone(&handle));
        handle
    }

    /// Look up a recipient handle by id.
    pub fn recipient(&self, id: &str) -> Option<RecipientHandle> {
        self.recipients.get(id).cloned()
    }

    /// Number of registered recipients.
    #[inline]
    pub fn recipient_count(&self) -> usize {
        self.recipients.len()
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Record a completed match and return the transaction.
    ///
    /// Creates a `TRN-…` record at the front of the log and bumps the
    /// donor's donation count. Status transitions on the two records
    /// stay with the caller.
    pub fn record_match(
        &mut self,
        donor: &DonorHandle,
        recipient: &RecipientHandle,
        distance_km: f64,
    ) -> Transaction {
        self.next_transaction += 1;
        let transaction = {
            let donor = donor.borrow();
            let recipient = recipient.borrow();
            Transaction {
                id: format!("TRN-{:03}", self.next_transaction),
                donor_id: donor.id.clone(),
                recipient_id: recipient.id.clone(),
                blood_group: donor.blood_group,
                units: recipient.units_needed,
                distance_km,
                sequence: self.next_transaction,
            }
        };
        donor.borrow_mut().total_donations += 1;

        info!(id = %transaction.id, donor = %transaction.donor_id, "match recorded");
        self.transactions.push_front(transaction.clone());
        transaction
    }

    /// Iterate the transaction log, newest first.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Number of recorded transactions.
    #[inline]
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BloodGroup, Urgency};

    fn sample_donor() -> Donor {
        Donor::new("Ayesha", 29, BloodGroup::ONeg, "Islamabad", "F-8", "D1")
    }

    fn sample_recipient() -> Recipient {
        Recipient::new("Hamza", BloodGroup::AbPos, Urgency::High, "PIMS", "H1")
    }

    #[test]
    fn test_sequential_donor_ids() {
        let mut registry = Registry::new();
        let a = registry.register_donor(sample_donor());
        let b = registry.register_donor(sample_donor());

        assert_eq!(a.borrow().id, "DON-001");
        assert_eq!(b.borrow().id, "DON-002");
        assert_eq!(registry.donor_count(), 2);
    }

    #[test]
    fn test_preassigned_id_kept() {
        let mut registry = Registry::new();
        let mut donor = sample_donor();
        donor.id = "DON-777".to_string();

        let handle = registry.register_donor(donor);
        assert_eq!(handle.borrow().id, "DON-777");
        assert!(registry.donor("DON-777").is_some());
    }

    #[test]
    fn test_lookup_shares_record() {
        let mut registry = Registry::new();
        let handle = registry.register_donor(sample_donor());

        let looked_up = registry.donor("DON-001").unwrap();
        looked_up.borrow_mut().total_donations = 9;

        assert_eq!(handle.borrow().total_donations, 9);
        assert!(registry.donor("DON-999").is_none());
    }

    #[test]
    fn test_recipient_ids() {
        let mut registry = Registry::new();
        let r = registry.register_recipient(sample_recipient());

        assert_eq!(r.borrow().id, "REC-001");
        assert!(registry.recipient("REC-001").is_some());
        assert_eq!(registry.recipient_count(), 1);
    }

    #[test]
    fn test_record_match_log_newest_first() {
        let mut registry = Registry::new();
        let donor = registry.register_donor(sample_donor());
        let recipient = registry.register_recipient(sample_recipient());

        registry.record_match(&donor, &recipient, 5.2);
        registry.record_match(&donor, &recipient, 3.8);

        assert_eq!(registry.transaction_count(), 2);
        let ids: Vec<&str> = registry.transactions().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["TRN-002", "TRN-001"]);
        assert_eq!(donor.borrow().total_donations, 2);
    }

    #[test]
    fn test_transaction_fields() {
        let mut registry = Registry::new();
        let donor = registry.register_donor(sample_donor());
        let recipient = registry.register_recipient(sample_recipient());

        let txn = registry.record_match(&donor, &recipient, 5.2);

        assert_eq!(txn.donor_id, "DON-001");
        assert_eq!(txn.recipient_id, "REC-001");
        assert_eq!(txn.blood_group, BloodGroup::ONeg);
        assert_eq!(txn.units, 1);
        assert_eq!(txn.distance_km, 5.2);
    }
}

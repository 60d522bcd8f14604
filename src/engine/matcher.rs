//! Matching engine: nearest compatible available donor, most urgent
//! request first.

use std::rc::Rc;

use tracing::debug;

use crate::dsa::{Comparator, DynArray, HashTable, PriorityQueue};
use crate::engine::CompatibilityMatrix;
use crate::graph::RouteGraph;
use crate::types::{BloodGroup, DonorHandle, Recipient, RecipientHandle};

/// Baseline minutes for a match estimate, scaled by urgency rank.
const BASE_MATCH_MINUTES: u32 = 5;

/// A queued request plus its arrival sequence.
///
/// The sequence stabilizes the heap: among equal urgency, requests pop
/// in FIFO arrival order.
#[derive(Debug, Clone)]
struct QueuedRequest {
    seq: u64,
    recipient: RecipientHandle,
}

/// Heap order for queued requests: urgency rank ascending, then arrival.
#[derive(Debug, Clone, Copy, Default)]
struct UrgencyOrder;

impl Comparator<QueuedRequest> for UrgencyOrder {
    fn precedes(&self, a: &QueuedRequest, b: &QueuedRequest) -> bool {
        let rank_a = a.recipient.borrow().urgency.rank();
        let rank_b = b.recipient.borrow().urgency.rank();
        (rank_a, a.seq) < (rank_b, b.seq)
    }
}

/// Assigns the geographically nearest compatible donor to a request.
///
/// Donor records are owned by the registry; the engine's pools hold
/// shared handles and read `status` when filtering. Status transitions
/// themselves are driven by the surrounding layer.
pub struct MatchingEngine {
    /// Blood group -> pool of donor handles, in registration order.
    donor_pools: HashTable<BloodGroup, DynArray<DonorHandle>>,
    /// Pending requests, most urgent first.
    request_queue: PriorityQueue<QueuedRequest, UrgencyOrder>,
    compatibility: CompatibilityMatrix,
    next_seq: u64,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    /// Create an engine with the standard ABO/Rh compatibility table.
    pub fn new() -> Self {
        Self {
            donor_pools: HashTable::new(),
            request_queue: PriorityQueue::with_comparator(UrgencyOrder),
            compatibility: CompatibilityMatrix::new(),
            next_seq: 0,
        }
    }

    /// The engine's compatibility table.
    #[inline]
    pub fn compatibility(&self) -> &CompatibilityMatrix {
        &self.compatibility
    }

    // ========================================================================
    // Donor pools
    // ========================================================================

    /// Add a donor handle to its blood group's pool.
    ///
    /// No identity dedup: registering the same donor twice leaves two
    /// pool entries.
    pub fn add_donor(&mut self, donor: DonorHandle) {
        let group = donor.borrow().blood_group;
        match self.donor_pools.get_mut(&group) {
            Some(pool) => pool.push(donor),
            None => {
                let mut pool = DynArray::new();
                pool.push(donor);
                self.donor_pools.insert(group, pool);
            }
        }
    }

    /// Drop every pool entry whose donor id matches.
    ///
    /// Rebuilds the group's pool - O(n) in pool size, by deliberate
    /// policy (pools are small and removal is rare).
    pub fn remove_donor(&mut self, donor_id: &str, group: BloodGroup) {
        if let Some(pool) = self.donor_pools.get_mut(&group) {
            let kept: DynArray<DonorHandle> = pool
                .iter()
                .filter(|d| d.borrow().id != donor_id)
                .cloned()
                .collect();
            *pool = kept;
        }
    }

    /// Donors of `group` whose status is `Available`, in pool order.
    pub fn available_donors(&self, group: BloodGroup) -> DynArray<DonorHandle> {
        let mut result = DynArray::new();
        if let Some(pool) = self.donor_pools.get(&group) {
            for donor in pool.iter() {
                if donor.borrow().is_available() {
                    result.push(Rc::clone(donor));
                }
            }
        }
        result
    }

    // ========================================================================
    // Request queue
    // ========================================================================

    /// Queue a request; it will pop before anything less urgent and
    /// after earlier arrivals of equal urgency.
    pub fn add_recipient_request(&mut self, recipient: RecipientHandle) {
        let seq = self.next_seq;
        self.next_seq += 1;
        debug!(
            id = %recipient.borrow().id,
            urgency = ?recipient.borrow().urgency,
            seq,
            "request queued"
        );
        self.request_queue.push(QueuedRequest { seq, recipient });
    }

    /// Dequeue the most urgent pending request, if any.
    pub fn pop_urgent_request(&mut self) -> Option<RecipientHandle> {
        self.request_queue.pop().ok().map(|q| q.recipient)
    }

    /// Number of queued requests.
    #[inline]
    pub fn pending_requests(&self) -> usize {
        self.request_queue.len()
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Find the nearest available compatible donor for a request.
    ///
    /// One shortest-path search rooted at the request's location prices
    /// every candidate (the graph is undirected, so distance is
    /// symmetric); each compatible pool is then scanned and the strict
    /// minimum kept. Candidates that are busy, unreachable, or at an
    /// unregistered location never qualify.
    ///
    /// # Returns
    ///
    /// `None` when the request's location is unregistered or no
    /// compatible donor is available and reachable - an expected
    /// outcome, not an error. Distance ties keep the first candidate
    /// encountered (supplier-group order, then pool order).
    pub fn find_best_donor_for(
        &self,
        graph: &RouteGraph,
        recipient: &Recipient,
    ) -> Option<DonorHandle> {
        let distances = graph.distances_from(&recipient.location_node_id)?;

        let mut best: Option<(f64, DonorHandle)> = None;
        let mut considered = 0usize;

        let suppliers = self
            .compatibility
            .acceptable_suppliers_for(recipient.blood_group_needed);
        for &group in suppliers.iter() {
            let Some(pool) = self.donor_pools.get(&group) else {
                continue;
            };
            for handle in pool.iter() {
                let donor = handle.borrow();
                if !donor.is_available() {
                    continue;
                }
                let Some(node) = graph.node_index(&donor.location_node_id) else {
                    continue;
                };
                let distance = distances[node];
                if !distance.is_finite() {
                    continue;
                }
                considered += 1;
                let improves = match &best {
                    None => true,
                    Some((current, _)) => distance < *current,
                };
                if improves {
                    best = Some((distance, Rc::clone(handle)));
                }
            }
        }

        debug!(
            request = %recipient.id,
            needed = %recipient.blood_group_needed,
            considered,
            matched = best.is_some(),
            "match search finished"
        );
        best.map(|(_, handle)| handle)
    }

    /// Rough minutes-to-match estimate: baseline scaled by urgency rank.
    pub fn estimate_match_time(&self, recipient: &Recipient) -> u32 {
        BASE_MATCH_MINUTES * recipient.urgency.rank()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

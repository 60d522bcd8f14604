//! Domain records for the donor matching core.
//!
//! Records are constructed by the surrounding API/persistence layer and
//! handed to the registry and engine; everything derives serde so that
//! layer can encode them however it likes. The core never parses
//! transport formats itself.
//!
//! ## Types
//!
//! - [`BloodGroup`]: The eight ABO/Rh groups
//! - [`Donor`]: A typed, statusful resource at a graph location
//! - [`Recipient`]: An urgency-ranked request for blood at a location
//! - [`Transaction`]: The record of one completed match
//!
//! ## Ownership
//!
//! Shared handles ([`DonorHandle`], [`RecipientHandle`]) are
//! `Rc<RefCell<_>>`: the registry owns the records, the engine holds
//! references and only ever writes the `status` field. Single-threaded
//! by construction.

mod blood;
mod donor;
mod recipient;
mod transaction;

pub use blood::{BloodGroup, UnknownBloodGroup};
pub use donor::{Donor, DonorHandle, DonorStatus};
pub use recipient::{Recipient, RecipientHandle, RequestStatus, UnknownUrgency, Urgency};
pub use transaction::Transaction;

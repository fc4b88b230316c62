//! Capture of donation pledges and contact messages as JSON records.

mod store;
mod submission;

pub use store::JsonArrayStore;
pub use submission::{ContactMessage, ContactRequest, Donation, DonationRequest};

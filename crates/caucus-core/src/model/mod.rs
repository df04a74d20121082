//! Record types for bills and legislators.
//!
//! [`Bill`] and [`Legislator`] mirror the API's JSON and keep unread fields
//! so cached records round-trip. [`LegislatorAttrs`] is the cleaned form
//! attached to graph nodes.

pub mod bill;
pub mod chamber;
pub mod legislator;

pub use bill::Bill;
pub use chamber::Chamber;
pub use legislator::{DROPPED_FIELDS, Legislator, LegislatorAttrs, Party, party_affiliation};

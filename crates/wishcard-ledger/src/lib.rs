//! WishCard Ledger - Per-user usage accounting
//!
//! Tracks monthly card generation counts and the tier label against a
//! persistent store, with an optimistic local view so callers see updated
//! counts without waiting on the store round-trip.

pub mod error;
pub mod ledger;

pub use error::LedgerError;
pub use ledger::{UsageLedger, UsageRecord};

//! WishCard Types - Shared domain types
//!
//! This crate contains domain types used across WishCard services:
//! - Subscription tiers and pricing
//! - Card request enumerations and the validated request record
//! - Generated artifacts and gallery items

pub mod artifact;
pub mod card;
pub mod tier;
pub mod user;

pub use artifact::*;
pub use card::*;
pub use tier::*;
pub use user::*;

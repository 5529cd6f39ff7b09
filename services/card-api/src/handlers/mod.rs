//! REST API handlers

pub mod checkout;
pub mod gallery;
pub mod generate;
pub mod health;
pub mod usage;
pub mod webhook;

pub use checkout::*;
pub use gallery::*;
pub use generate::*;
pub use health::*;
pub use usage::*;
pub use webhook::*;

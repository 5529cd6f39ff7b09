//! WishCard DB - Database abstractions
//!
//! SQLx-based persistence layer backing the usage ledger and the card gallery.
//!
//! # Example
//!
//! ```rust,ignore
//! use wishcard_db::{create_pool, Repositories};
//!
//! let pool = create_pool("postgres://localhost/wishcard").await?;
//! let repos = Repositories::new(pool);
//!
//! let record = repos.ledger.find("user@example.com").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, DbPool};
pub use repo::*;

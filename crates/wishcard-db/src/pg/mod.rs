//! PostgreSQL repository implementations

mod gallery;
mod ledger;

pub use gallery::PgGalleryRepository;
pub use ledger::PgLedgerRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub ledger: PgLedgerRepository,
    pub gallery: PgGalleryRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            ledger: PgLedgerRepository::new(pool.clone()),
            gallery: PgGalleryRepository::new(pool),
        }
    }
}

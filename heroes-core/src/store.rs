//! Persistence seam for hero records.
//!
//! Lets the service run against PostgreSQL in production and an in-memory
//! map in tests without changing any handler logic.

use async_trait::async_trait;

use crate::{Hero, HeroId, HeroPatch, NewHero, Page, StoreError};

/// Storage backend for heroes.
///
/// Each call is a self-contained unit of work: it acquires whatever
/// connection or transaction it needs and releases it before returning.
/// Implementations must be `Send + Sync` to be shared across request tasks.
///
/// Listing methods return records in ascending identifier order.
#[async_trait]
pub trait HeroStore: Send + Sync {
    /// Insert a new hero and return it with its assigned identifier.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend rejects the insert.
    async fn insert(&self, hero: NewHero) -> Result<Hero, StoreError>;

    /// Return one page of all heroes.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend query fails.
    async fn list(&self, page: Page) -> Result<Vec<Hero>, StoreError>;

    /// Return one page of heroes whose era equals `era` exactly.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend query fails.
    async fn list_by_era(&self, era: &str, page: Page) -> Result<Vec<Hero>, StoreError>;

    /// Fetch a hero by identifier.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend query fails.
    async fn get(&self, id: HeroId) -> Result<Option<Hero>, StoreError>;

    /// Merge `patch` into the stored hero and commit, returning the refreshed
    /// record, or `None` if no hero has this identifier.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend write fails; nothing is committed.
    async fn update(&self, id: HeroId, patch: HeroPatch) -> Result<Option<Hero>, StoreError>;

    /// Remove a hero permanently and return the removed record, or `None` if
    /// no hero has this identifier.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend delete fails.
    async fn delete(&self, id: HeroId) -> Result<Option<Hero>, StoreError>;
}

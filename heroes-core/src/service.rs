//! Catalogue operations over a [`HeroStore`].
//!
//! Each operation is one request/response cycle: validate, issue a single
//! store call, map the outcome. Existence is checked before any mutation.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::{Hero, HeroError, HeroId, HeroPatch, HeroStore, NewHero, Page};

/// Identity of a hero captured just before it was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedHero {
    pub id: HeroId,
    pub name: Option<String>,
    pub role: Option<String>,
}

/// Confirmation payload returned by [`HeroService::delete`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionReceipt {
    pub status: &'static str,
    pub message: String,
    pub deleted_hero: DeletedHero,
}

impl DeletionReceipt {
    fn for_removed(hero: Hero) -> Self {
        Self {
            status: "success",
            message: format!("hero with id {} deleted", hero.id),
            deleted_hero: DeletedHero {
                id: hero.id,
                name: hero.attributes.name,
                role: hero.attributes.role,
            },
        }
    }
}

/// The hero resource: create, read, update, delete and list operations.
///
/// Holds no per-request state; safe to share behind an `Arc` across tasks.
pub struct HeroService {
    store: Arc<dyn HeroStore>,
}

impl HeroService {
    /// Create a service backed by the given store.
    #[must_use]
    pub fn new(store: Arc<dyn HeroStore>) -> Self {
        Self { store }
    }

    /// Insert a new hero.
    ///
    /// # Errors
    /// Returns [`HeroError::Invalid`] if the payload fails validation and
    /// [`HeroError::Store`] if the insert fails.
    pub async fn create(&self, hero: NewHero) -> Result<Hero, HeroError> {
        hero.validate()?;
        let created = self.store.insert(hero).await?;
        info!(hero_id = %created.id, "hero created");
        Ok(created)
    }

    /// Return one page of all heroes.
    ///
    /// # Errors
    /// Returns [`HeroError::Store`] if the query fails.
    pub async fn list(&self, page: Page) -> Result<Vec<Hero>, HeroError> {
        let heroes = self.store.list(page).await?;
        debug!(skip = page.skip(), limit = page.limit(), count = heroes.len(), "heroes listed");
        Ok(heroes)
    }

    /// Fetch a single hero.
    ///
    /// # Errors
    /// Returns [`HeroError::NotFound`] if no hero has this identifier.
    pub async fn get(&self, id: HeroId) -> Result<Hero, HeroError> {
        self.store.get(id).await?.ok_or(HeroError::NotFound(id))
    }

    /// Apply a partial update.
    ///
    /// An empty patch returns the stored hero unchanged without writing.
    ///
    /// # Errors
    /// Returns [`HeroError::Invalid`] if a supplied field fails validation,
    /// [`HeroError::NotFound`] if no hero has this identifier and
    /// [`HeroError::Store`] if the write fails.
    pub async fn update(&self, id: HeroId, patch: HeroPatch) -> Result<Hero, HeroError> {
        patch.validate()?;
        if patch.is_empty() {
            debug!(hero_id = %id, "empty update, nothing to write");
            return self.get(id).await;
        }
        let updated = self.store.update(id, patch).await?.ok_or(HeroError::NotFound(id))?;
        info!(hero_id = %id, "hero updated");
        Ok(updated)
    }

    /// Remove a hero permanently.
    ///
    /// # Errors
    /// Returns [`HeroError::NotFound`] if no hero has this identifier and
    /// [`HeroError::Store`] if the delete fails.
    pub async fn delete(&self, id: HeroId) -> Result<DeletionReceipt, HeroError> {
        let removed = self.store.delete(id).await?.ok_or(HeroError::NotFound(id))?;
        info!(hero_id = %id, "hero deleted");
        Ok(DeletionReceipt::for_removed(removed))
    }

    /// Return one page of heroes from the given era (exact, case-sensitive).
    ///
    /// `only_active` is accepted for interface compatibility but does not
    /// filter anything: heroes carry no activity status.
    ///
    /// # Errors
    /// Returns [`HeroError::Store`] if the query fails.
    pub async fn list_by_era(
        &self,
        era: &str,
        page: Page,
        only_active: bool,
    ) -> Result<Vec<Hero>, HeroError> {
        let heroes = self.store.list_by_era(era, page).await?;
        debug!(era, only_active, count = heroes.len(), "heroes listed by era");
        Ok(heroes)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::{CoreError, HeroAttributes, StoreError};

    /// Holds at most one hero (id 1) and counts write calls.
    #[derive(Default)]
    struct SingleHeroStore {
        writes: AtomicUsize,
    }

    fn stored() -> Hero {
        Hero {
            id: HeroId(1),
            attributes: HeroAttributes {
                name: Some("Perseus".to_owned()),
                role: Some("Demigod".to_owned()),
                ..HeroAttributes::default()
            },
        }
    }

    #[async_trait]
    impl HeroStore for SingleHeroStore {
        async fn insert(&self, hero: NewHero) -> Result<Hero, StoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(Hero::from_new(HeroId(2), hero))
        }

        async fn list(&self, _page: Page) -> Result<Vec<Hero>, StoreError> {
            Ok(vec![stored()])
        }

        async fn list_by_era(&self, _era: &str, _page: Page) -> Result<Vec<Hero>, StoreError> {
            Err(StoreError::Corrupt("era column unreadable".to_owned()))
        }

        async fn get(&self, id: HeroId) -> Result<Option<Hero>, StoreError> {
            Ok((id == HeroId(1)).then(stored))
        }

        async fn update(&self, id: HeroId, patch: HeroPatch) -> Result<Option<Hero>, StoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok((id == HeroId(1)).then(|| {
                let mut hero = stored();
                patch.apply_to(&mut hero);
                hero
            }))
        }

        async fn delete(&self, id: HeroId) -> Result<Option<Hero>, StoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok((id == HeroId(1)).then(stored))
        }
    }

    fn service() -> (Arc<SingleHeroStore>, HeroService) {
        let store = Arc::new(SingleHeroStore::default());
        (store.clone(), HeroService::new(store))
    }

    #[tokio::test]
    async fn empty_update_returns_hero_without_writing() {
        let (store, svc) = service();
        let hero = match svc.update(HeroId(1), HeroPatch::default()).await {
            Ok(h) => h,
            Err(e) => panic!("empty update failed: {e}"),
        };
        assert_eq!(hero, stored());
        assert_eq!(store.writes.load(Ordering::SeqCst), 0, "empty update must not write");
    }

    #[tokio::test]
    async fn empty_update_of_missing_hero_is_not_found() {
        let (_, svc) = service();
        let result = svc.update(HeroId(9), HeroPatch::default()).await;
        assert!(matches!(result, Err(HeroError::NotFound(HeroId(9)))));
    }

    #[tokio::test]
    async fn invalid_create_is_rejected_before_store() {
        let (store, svc) = service();
        let result = svc.create(NewHero::default()).await;
        assert!(matches!(
            result,
            Err(HeroError::Invalid(CoreError::MissingField { field: "name" }))
        ));
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delete_receipt_echoes_removed_identity() {
        let (_, svc) = service();
        let receipt = match svc.delete(HeroId(1)).await {
            Ok(r) => r,
            Err(e) => panic!("delete failed: {e}"),
        };
        assert_eq!(receipt.status, "success");
        assert_eq!(receipt.deleted_hero.id, HeroId(1));
        assert_eq!(receipt.deleted_hero.name.as_deref(), Some("Perseus"));
        assert_eq!(receipt.deleted_hero.role.as_deref(), Some("Demigod"));
        assert!(receipt.message.contains('1'));
    }

    #[tokio::test]
    async fn missing_hero_maps_to_not_found_for_every_lookup() {
        let (_, svc) = service();
        assert!(matches!(svc.get(HeroId(5)).await, Err(HeroError::NotFound(_))));
        assert!(matches!(svc.delete(HeroId(5)).await, Err(HeroError::NotFound(_))));
        let patch = HeroPatch::new(HeroAttributes {
            era: Some("Greek".to_owned()),
            ..HeroAttributes::default()
        });
        assert!(matches!(svc.update(HeroId(5), patch).await, Err(HeroError::NotFound(_))));
    }

    #[tokio::test]
    async fn store_errors_propagate_unchanged() {
        let (_, svc) = service();
        let result = svc.list_by_era("Greek", Page::default(), true).await;
        assert!(matches!(result, Err(HeroError::Store(StoreError::Corrupt(_)))));
    }

    #[test]
    fn not_found_message_names_the_identifier() {
        assert_eq!(HeroError::NotFound(HeroId(42)).to_string(), "hero with id 42 not found");
    }
}

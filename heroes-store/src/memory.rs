//! Process-local hero store.
//!
//! Identifiers come from a monotonically increasing counter, so a deleted
//! hero's identifier is never handed out again.

use std::collections::BTreeMap;

use async_trait::async_trait;
use heroes_core::{Hero, HeroId, HeroPatch, HeroStore, NewHero, Page, StoreError};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug)]
struct Inner {
    next_id: i64,
    heroes: BTreeMap<HeroId, Hero>,
}

/// Heroes held in a `BTreeMap` keyed by identifier.
#[derive(Debug)]
pub struct MemoryHeroStore {
    inner: RwLock<Inner>,
}

impl MemoryHeroStore {
    /// Create an empty store whose first identifier is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner { next_id: 1, heroes: BTreeMap::new() }),
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.inner.read().await.heroes.len()
    }

    #[cfg(test)]
    async fn is_empty(&self) -> bool {
        self.inner.read().await.heroes.is_empty()
    }
}

impl Default for MemoryHeroStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HeroStore for MemoryHeroStore {
    async fn insert(&self, hero: NewHero) -> Result<Hero, StoreError> {
        let mut inner = self.inner.write().await;
        let id = HeroId(inner.next_id);
        inner.next_id += 1;
        let hero = Hero::from_new(id, hero);
        inner.heroes.insert(id, hero.clone());
        Ok(hero)
    }

    async fn list(&self, page: Page) -> Result<Vec<Hero>, StoreError> {
        let inner = self.inner.read().await;
        Ok(page.window(inner.heroes.values()).cloned().collect())
    }

    async fn list_by_era(&self, era: &str, page: Page) -> Result<Vec<Hero>, StoreError> {
        let inner = self.inner.read().await;
        let matching = inner
            .heroes
            .values()
            .filter(|hero| hero.attributes.era.as_deref() == Some(era));
        Ok(page.window(matching).cloned().collect())
    }

    async fn get(&self, id: HeroId) -> Result<Option<Hero>, StoreError> {
        Ok(self.inner.read().await.heroes.get(&id).cloned())
    }

    async fn update(&self, id: HeroId, patch: HeroPatch) -> Result<Option<Hero>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(hero) = inner.heroes.get_mut(&id) else {
            return Ok(None);
        };
        let fields = patch.apply_to(hero);
        debug!(hero_id = %id, ?fields, "hero fields written");
        Ok(Some(hero.clone()))
    }

    async fn delete(&self, id: HeroId) -> Result<Option<Hero>, StoreError> {
        Ok(self.inner.write().await.heroes.remove(&id))
    }
}

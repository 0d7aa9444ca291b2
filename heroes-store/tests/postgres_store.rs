//! Integration test: the PostgreSQL store against a live database.
//!
//! Requires: a reachable PostgreSQL instance named by `DATABASE_URL`. Each
//! test works on heroes it creates itself, under a unique era, so runs do not
//! interfere with existing rows.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use heroes_core::{HeroAttributes, HeroPatch, HeroStore, NewHero, Page};
use heroes_store::{create_pool, ensure_schema, DatabaseConfig, PgHeroStore};

async fn make_store() -> PgHeroStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = create_pool(&DatabaseConfig::new(url))
        .await
        .unwrap_or_else(|e| panic!("failed to connect: {e}"));
    ensure_schema(&pool)
        .await
        .unwrap_or_else(|e| panic!("failed to create schema: {e}"));
    PgHeroStore::new(pool)
}

fn unique_era(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_nanos();
    format!("{prefix}-{nanos}")
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn postgres_full_lifecycle() {
    let store = make_store().await;
    let era = unique_era("Greek");

    let created = store
        .insert(NewHero::new(HeroAttributes {
            name: Some("Perseus".to_owned()),
            role: Some("Demigod".to_owned()),
            era: Some(era.clone()),
            tags: Some(vec!["gorgon".to_owned(), "argos".to_owned()]),
            birth_date: NaiveDate::from_ymd_opt(1200, 3, 1),
            achievements: Some(vec!["Slew Medusa".to_owned()]),
            ..HeroAttributes::default()
        }))
        .await
        .unwrap_or_else(|e| panic!("insert failed: {e}"));
    assert!(created.id.get() > 0, "store must assign a positive id");

    let fetched = store
        .get(created.id)
        .await
        .unwrap_or_else(|e| panic!("get failed: {e}"))
        .expect("hero must exist after insert");
    assert_eq!(fetched, created);

    let patch = HeroPatch::new(HeroAttributes {
        name: Some("Perseus Updated".to_owned()),
        ..HeroAttributes::default()
    });
    let updated = store
        .update(created.id, patch)
        .await
        .unwrap_or_else(|e| panic!("update failed: {e}"))
        .expect("hero must exist for update");
    assert_eq!(updated.attributes.name.as_deref(), Some("Perseus Updated"));
    assert_eq!(updated.attributes.role.as_deref(), Some("Demigod"));
    assert_eq!(updated.attributes.tags, created.attributes.tags);

    let by_era = store
        .list_by_era(&era, Page::default())
        .await
        .unwrap_or_else(|e| panic!("list_by_era failed: {e}"));
    assert_eq!(by_era.len(), 1);
    assert!(store
        .list_by_era(&era.to_lowercase(), Page::default())
        .await
        .unwrap_or_else(|e| panic!("list_by_era failed: {e}"))
        .is_empty());

    let removed = store
        .delete(created.id)
        .await
        .unwrap_or_else(|e| panic!("delete failed: {e}"))
        .expect("hero must exist for delete");
    assert_eq!(removed.attributes.name.as_deref(), Some("Perseus Updated"));
    assert!(store
        .get(created.id)
        .await
        .unwrap_or_else(|e| panic!("get failed: {e}"))
        .is_none());
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn postgres_update_missing_hero_commits_nothing() {
    let store = make_store().await;
    let patch = HeroPatch::new(HeroAttributes {
        era: Some(unique_era("Nowhere")),
        ..HeroAttributes::default()
    });
    let result = store
        .update(heroes_core::HeroId(i64::MAX), patch)
        .await
        .unwrap_or_else(|e| panic!("update failed: {e}"));
    assert!(result.is_none());
}

//! PostgreSQL hero store.
//!
//! Every method checks a connection out of the pool for the duration of the
//! call only. Updates run inside a transaction that locks the row, so a
//! missing hero or a failed write commits nothing.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use heroes_core::{Hero, HeroAttributes, HeroId, HeroPatch, HeroStore, NewHero, Page, StoreError};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::{debug, info, instrument};

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// How long a request may wait for a free connection.
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Settings for `url` with default pool sizing.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Open a connection pool.
///
/// # Errors
/// Returns [`StoreError::Backend`] if the database cannot be reached.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    info!(max_connections = config.max_connections, "creating database connection pool");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
        .map_err(StoreError::backend)?;
    Ok(pool)
}

/// Create the `heroes` table and its era index if they do not exist yet.
///
/// # Errors
/// Returns [`StoreError::Backend`] if either statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS heroes (
            id           BIGSERIAL PRIMARY KEY,
            name         TEXT,
            role         TEXT,
            description  TEXT,
            image_url    TEXT,
            era          TEXT,
            tags         TEXT[],
            birth_date   DATE,
            death_date   DATE,
            achievements TEXT[],
            biography    TEXT
        )
        ",
    )
    .execute(pool)
    .await
    .map_err(StoreError::backend)?;

    sqlx::query("CREATE INDEX IF NOT EXISTS heroes_era_idx ON heroes (era)")
        .execute(pool)
        .await
        .map_err(StoreError::backend)?;

    debug!("heroes schema ready");
    Ok(())
}

/// [`HeroStore`] backed by the `heroes` table.
#[derive(Debug, Clone)]
pub struct PgHeroStore {
    pool: PgPool,
}

impl PgHeroStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_hero(row: &PgRow) -> Result<Hero, StoreError> {
        fn col<'r, T>(row: &'r PgRow, name: &str) -> Result<T, StoreError>
        where
            T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
        {
            row.try_get(name)
                .map_err(|e| StoreError::Corrupt(format!("column '{name}': {e}")))
        }

        Ok(Hero {
            id: HeroId(col(row, "id")?),
            attributes: HeroAttributes {
                name: col(row, "name")?,
                role: col(row, "role")?,
                description: col(row, "description")?,
                image_url: col(row, "image_url")?,
                era: col(row, "era")?,
                tags: col::<Option<Vec<String>>>(row, "tags")?,
                birth_date: col::<Option<NaiveDate>>(row, "birth_date")?,
                death_date: col::<Option<NaiveDate>>(row, "death_date")?,
                achievements: col::<Option<Vec<String>>>(row, "achievements")?,
                biography: col(row, "biography")?,
            },
        })
    }
}

#[async_trait]
impl HeroStore for PgHeroStore {
    #[instrument(skip(self, hero))]
    async fn insert(&self, hero: NewHero) -> Result<Hero, StoreError> {
        let a = hero.attributes;
        let row = sqlx::query(
            r"
            INSERT INTO heroes (name, role, description, image_url, era, tags,
                                birth_date, death_date, achievements, biography)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, role, description, image_url, era, tags,
                      birth_date, death_date, achievements, biography
            ",
        )
        .bind(a.name)
        .bind(a.role)
        .bind(a.description)
        .bind(a.image_url)
        .bind(a.era)
        .bind(a.tags)
        .bind(a.birth_date)
        .bind(a.death_date)
        .bind(a.achievements)
        .bind(a.biography)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Self::row_to_hero(&row)
    }

    #[instrument(skip(self))]
    async fn list(&self, page: Page) -> Result<Vec<Hero>, StoreError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, role, description, image_url, era, tags,
                   birth_date, death_date, achievements, biography
            FROM heroes
            ORDER BY id
            OFFSET $1 LIMIT $2
            ",
        )
        .bind(page.skip())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        rows.iter().map(Self::row_to_hero).collect()
    }

    #[instrument(skip(self))]
    async fn list_by_era(&self, era: &str, page: Page) -> Result<Vec<Hero>, StoreError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, role, description, image_url, era, tags,
                   birth_date, death_date, achievements, biography
            FROM heroes
            WHERE era = $1
            ORDER BY id
            OFFSET $2 LIMIT $3
            ",
        )
        .bind(era)
        .bind(page.skip())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        rows.iter().map(Self::row_to_hero).collect()
    }

    #[instrument(skip(self))]
    async fn get(&self, id: HeroId) -> Result<Option<Hero>, StoreError> {
        let row = sqlx::query(
            r"
            SELECT id, name, role, description, image_url, era, tags,
                   birth_date, death_date, achievements, biography
            FROM heroes
            WHERE id = $1
            ",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.as_ref().map(Self::row_to_hero).transpose()
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: HeroId, patch: HeroPatch) -> Result<Option<Hero>, StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;

        let row = sqlx::query(
            r"
            SELECT id, name, role, description, image_url, era, tags,
                   birth_date, death_date, achievements, biography
            FROM heroes
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(StoreError::backend)?;

        // Dropping `tx` without commit rolls back and releases the connection.
        let Some(row) = row else {
            return Ok(None);
        };

        let mut hero = Self::row_to_hero(&row)?;
        let fields = patch.apply_to(&mut hero);
        debug!(hero_id = %id, ?fields, "writing hero fields");

        let a = hero.attributes;
        let row = sqlx::query(
            r"
            UPDATE heroes
            SET name = $2, role = $3, description = $4, image_url = $5, era = $6,
                tags = $7, birth_date = $8, death_date = $9, achievements = $10,
                biography = $11
            WHERE id = $1
            RETURNING id, name, role, description, image_url, era, tags,
                      birth_date, death_date, achievements, biography
            ",
        )
        .bind(id.get())
        .bind(a.name)
        .bind(a.role)
        .bind(a.description)
        .bind(a.image_url)
        .bind(a.era)
        .bind(a.tags)
        .bind(a.birth_date)
        .bind(a.death_date)
        .bind(a.achievements)
        .bind(a.biography)
        .fetch_one(&mut *tx)
        .await
        .map_err(StoreError::backend)?;

        tx.commit().await.map_err(StoreError::backend)?;
        Self::row_to_hero(&row).map(Some)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: HeroId) -> Result<Option<Hero>, StoreError> {
        let row = sqlx::query(
            r"
            DELETE FROM heroes
            WHERE id = $1
            RETURNING id, name, role, description, image_url, era, tags,
                      birth_date, death_date, achievements, biography
            ",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.as_ref().map(Self::row_to_hero).transpose()
    }
}

//! Axum route handlers for the heroes API.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use heroes_core::{DeletionReceipt, Hero, HeroId, HeroPatch, HeroService, NewHero, Page};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    auth::{require_admin, AdminGuard},
    error::GatewayError,
};

// ── Shared state ─────────────────────────────────────────────────────────────

type Service = Arc<HeroService>;

// ── Query parameters ─────────────────────────────────────────────────────────

fn default_limit() -> i64 {
    Page::DEFAULT_LIMIT
}

fn default_only_active() -> bool {
    true
}

/// `?skip=&limit=` for the plain listing.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// `?skip=&limit=&only_active=` for the era listing.
#[derive(Debug, Deserialize)]
pub struct EraQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Accepted and logged; does not filter.
    #[serde(default = "default_only_active")]
    pub only_active: bool,
}

// ── Router ────────────────────────────────────────────────────────────────────

// Extractors are taken as `Result<_, Rejection>` so malformed input is
// answered through `GatewayError` with the JSON error body.

/// Build the application router.
///
/// Update and delete sit behind [`require_admin`]; the guard runs before
/// the body is parsed or the store is touched.
pub fn create_router(service: Service, guard: Arc<AdminGuard>) -> Router {
    let admin = Router::new()
        .route("/heroes/updateHero/{hero_id}", put(update_hero))
        .route("/heroes/deleteHero/{hero_id}", delete(delete_hero))
        .route_layer(middleware::from_fn_with_state(guard, require_admin));

    Router::new()
        .route("/heroes/createHero", post(create_hero))
        .route("/heroes/getAllHeroes", get(get_all_heroes))
        .route("/heroes/getHero/{hero_id}", get(get_hero))
        .route("/heroes/getHeroesByEra/{era}", get(get_heroes_by_era))
        .merge(admin)
        .route("/health", get(health))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health` — liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `POST /heroes/createHero` — insert a hero and return it with its id.
///
/// # Errors
/// Returns [`GatewayError::Hero`] if validation or the insert fails.
pub async fn create_hero(
    State(service): State<Service>,
    body: Result<Json<NewHero>, JsonRejection>,
) -> Result<Json<Hero>, GatewayError> {
    let Json(body) = body?;
    Ok(Json(service.create(body).await?))
}

/// `GET /heroes/getAllHeroes` — one page of heroes in insertion order.
///
/// # Errors
/// Returns a 400 if `skip` or `limit` is out of range.
pub async fn get_all_heroes(
    State(service): State<Service>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<Hero>>, GatewayError> {
    let Query(query) = query?;
    let page = Page::new(query.skip, query.limit)?;
    Ok(Json(service.list(page).await?))
}

/// `GET /heroes/getHero/{hero_id}`
///
/// # Errors
/// Returns a 404 if no hero has this id.
pub async fn get_hero(
    State(service): State<Service>,
    hero_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Hero>, GatewayError> {
    let Path(hero_id) = hero_id?;
    Ok(Json(service.get(HeroId(hero_id)).await?))
}

/// `PUT /heroes/updateHero/{hero_id}` — partial update, admin only.
///
/// # Errors
/// Returns a 404 if no hero has this id, or a 400 if a supplied field is
/// invalid.
pub async fn update_hero(
    State(service): State<Service>,
    hero_id: Result<Path<i64>, PathRejection>,
    patch: Result<Json<HeroPatch>, JsonRejection>,
) -> Result<Json<Hero>, GatewayError> {
    let Path(hero_id) = hero_id?;
    let Json(patch) = patch?;
    Ok(Json(service.update(HeroId(hero_id), patch).await?))
}

/// `DELETE /heroes/deleteHero/{hero_id}` — admin only.
///
/// # Errors
/// Returns a 404 if no hero has this id.
pub async fn delete_hero(
    State(service): State<Service>,
    hero_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletionReceipt>, GatewayError> {
    let Path(hero_id) = hero_id?;
    Ok(Json(service.delete(HeroId(hero_id)).await?))
}

/// `GET /heroes/getHeroesByEra/{era}` — exact, case-sensitive era match.
///
/// # Errors
/// Returns a 400 if `skip` or `limit` is out of range.
pub async fn get_heroes_by_era(
    State(service): State<Service>,
    era: Result<Path<String>, PathRejection>,
    query: Result<Query<EraQuery>, QueryRejection>,
) -> Result<Json<Vec<Hero>>, GatewayError> {
    let Path(era) = era?;
    let Query(query) = query?;
    let page = Page::new(query.skip, query.limit)?;
    Ok(Json(service.list_by_era(&era, page, query.only_active).await?))
}

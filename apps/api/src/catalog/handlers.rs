//! Axum route handlers for the Catalog API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::ingest::{ingest_entry, NewEntry};
use crate::catalog::seed::{COUNTRY_OPTIONS, GENRE_OPTIONS};
use crate::catalog::view::GroupedView;
use crate::errors::AppError;
use crate::models::entry::Entry;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub genre: String,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub genres: &'static [&'static str],
    pub countries: &'static [&'static str],
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/options
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        genres: GENRE_OPTIONS,
        countries: COUNTRY_OPTIONS,
    })
}

/// GET /api/v1/entries?q=&genre=
///
/// Filtered entries grouped by title initial.
pub async fn handle_list_entries(
    State(state): State<AppState>,
    Query(params): Query<ViewQuery>,
) -> Json<GroupedView> {
    let catalog = state.catalog.read().await;
    Json(catalog.view(&params.q, &params.genre))
}

/// POST /api/v1/entries
///
/// Runs the ingest flow. Only one create may wait on the enricher at a time.
pub async fn handle_create_entry(
    State(state): State<AppState>,
    Json(request): Json<NewEntry>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let _guard = state
        .try_begin_ingest()
        .ok_or_else(|| AppError::Conflict("another entry is still being scanned".to_string()))?;

    let entry = ingest_entry(&state.catalog, state.enricher.as_ref(), request).await?;
    state.persist_catalog().await;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/entries/:id
pub async fn handle_get_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Entry>, AppError> {
    let catalog = state.catalog.read().await;
    catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Entry {id} not found")))
}

/// PUT /api/v1/entries/:id
///
/// Full-record replace. Unknown ids are a silent no-op.
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(record): Json<Entry>,
) -> Result<StatusCode, AppError> {
    if record.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if record.genre.iter().all(|g| g.trim().is_empty()) {
        return Err(AppError::Validation("genre must list at least one tag".to_string()));
    }

    let updated = state.catalog.write().await.update(&id, record);
    if updated {
        info!("Updated entry {id}");
        state.persist_catalog().await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/entries/:id
///
/// Unknown ids are a silent no-op. Closes the details panel if it shows this entry.
pub async fn handle_delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> StatusCode {
    let removed = state.catalog.write().await.delete(&id);
    if removed {
        info!("Deleted entry {id}");
        state.details.lock().await.forget(&id);
        state.persist_catalog().await;
    }

    StatusCode::NO_CONTENT
}

/// GET /api/v1/entries/:id/link
///
/// Redirects to the entry's external link. Entries without one get 204 and no navigation.
pub async fn handle_open_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let catalog = state.catalog.read().await;
    let entry = catalog
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Entry {id} not found")))?;

    Ok(match entry.external_link() {
        Some(link) => Redirect::temporary(link).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

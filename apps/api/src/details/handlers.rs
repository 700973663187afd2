//! Axum route handlers for the details panel.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::entry::{AnalysisResult, Entry};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DetailsResponse {
    pub entry: Entry,
    pub analysis: Option<AnalysisResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub entry_id: String,
    pub analysis: AnalysisResult,
    /// False when the panel moved on before the analysis finished.
    pub applied: bool,
}

fn panel_closed() -> AppError {
    AppError::NotFound("No entry is open in the details panel".to_string())
}

/// GET /api/v1/details
pub async fn handle_get_details(
    State(state): State<AppState>,
) -> Result<Json<DetailsResponse>, AppError> {
    let (entry_id, analysis) = {
        let panel = state.details.lock().await;
        let entry_id = panel.entry_id().ok_or_else(panel_closed)?.to_string();
        (entry_id, panel.analysis().cloned())
    };

    let entry = state
        .catalog
        .read()
        .await
        .get(&entry_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Entry {entry_id} not found")))?;

    Ok(Json(DetailsResponse { entry, analysis }))
}

/// POST /api/v1/details/:id
///
/// Opens the panel on an entry. Any earlier analysis is discarded.
pub async fn handle_open_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DetailsResponse>, AppError> {
    let entry = state
        .catalog
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Entry {id} not found")))?;

    state.details.lock().await.open(id);

    Ok(Json(DetailsResponse {
        entry,
        analysis: None,
    }))
}

/// DELETE /api/v1/details
pub async fn handle_close_details(State(state): State<AppState>) -> StatusCode {
    state.details.lock().await.close();
    StatusCode::NO_CONTENT
}

/// POST /api/v1/details/analysis
///
/// Analyzes the open entry's synopsis. The result is stored on the panel only
/// if the panel has not changed since the request started.
pub async fn handle_analyze(
    State(state): State<AppState>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let ticket = state
        .details
        .lock()
        .await
        .begin_analysis()
        .ok_or_else(panel_closed)?;

    let entry = state
        .catalog
        .read()
        .await
        .get(ticket.entry_id())
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Entry {} not found", ticket.entry_id())))?;

    let analysis = state.enricher.analyze(&entry.title, &entry.synopsis).await;

    let applied = state
        .details
        .lock()
        .await
        .complete_analysis(&ticket, analysis.clone());

    if applied {
        info!("Analysis ready for entry {}", entry.id);
    } else {
        debug!("Discarded stale analysis for entry {}", entry.id);
    }

    Ok(Json(AnalyzeResponse {
        entry_id: entry.id,
        analysis,
        applied,
    }))
}

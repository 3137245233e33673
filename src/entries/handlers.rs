use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::entries::dto::{NewEntryForm, UpdateEntryBody};
use crate::entries::repo::{Entry, EntryError};
use crate::state::AppState;
use crate::views;

pub fn routes() -> Router<AppState> {
    // One pattern for /entries/{..}: the GET reads the segment as a user id,
    // PATCH and DELETE as an entry id.
    Router::new()
        .route("/journal/:user_id", get(journal))
        .route("/entries", post(create_entry))
        .route(
            "/entries/:id",
            get(list_entries).patch(update_entry).delete(delete_entry),
        )
}

/// Browser view of one user's journal. Any failure, including an unparseable
/// user id, falls back to the landing page.
#[instrument(skip(state))]
pub async fn journal(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Html<String>, Redirect> {
    let user_id: Uuid = user_id.parse().map_err(|_| {
        warn!(raw = %user_id, "unparseable user id in journal path");
        Redirect::to("/")
    })?;

    match Entry::list_by_user(&state.db, user_id).await {
        Ok(entries) => Ok(views::journal_page(user_id, &entries)),
        Err(e) => {
            error!(error = %e, %user_id, "journal listing failed");
            Err(Redirect::to("/"))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Entry>>, (StatusCode, Json<serde_json::Value>)> {
    match Entry::list_by_user(&state.db, user_id).await {
        Ok(entries) => Ok(Json(entries)),
        Err(e) => {
            error!(error = %e, %user_id, "list entries failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch entries" })),
            ))
        }
    }
}

#[instrument(skip(state, form))]
pub async fn create_entry(
    State(state): State<AppState>,
    Form(form): Form<NewEntryForm>,
) -> Result<Redirect, (StatusCode, String)> {
    match Entry::create(&state.db, form.user_id, form.date, &form.content).await {
        Ok(entry) => {
            info!(entry_id = %entry.id, user_id = %entry.user_id, "entry created");
            Ok(Redirect::to(&format!("/journal/{}", entry.user_id)))
        }
        Err(EntryError::UnknownUser(user_id)) => {
            warn!(%user_id, "entry rejected, owner does not exist");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create entry".into(),
            ))
        }
        Err(e) => {
            error!(error = %e, "create entry failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create entry".into(),
            ))
        }
    }
}

/// Responds with the updated entry, or JSON `null` when the id matched
/// nothing. A missing entry is not an error here.
#[instrument(skip(state, body))]
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateEntryBody>,
) -> Result<Json<Option<Entry>>, (StatusCode, Json<serde_json::Value>)> {
    match Entry::update_content(&state.db, id, &body.content).await {
        Ok(entry) => {
            if entry.is_none() {
                warn!(%id, "update matched no entry");
            }
            Ok(Json(entry))
        }
        Err(e) => {
            error!(error = %e, %id, "update entry failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to update entry" })),
            ))
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_entry(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match Entry::delete_by_id(&state.db, id).await {
        Ok(()) => {
            info!(%id, "entry deleted");
            Json(json!({ "message": "Entry deleted successfully" })).into_response()
        }
        Err(e) => {
            error!(error = %e, %id, "delete entry failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to delete entry" })),
            )
                .into_response()
        }
    }
}

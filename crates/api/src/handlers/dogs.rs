//! Handlers for dog records.
//!
//! Absence is answered with `204 No Content` everywhere (read, update,
//! delete); it is not treated as an error.

use std::num::IntErrorKind;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kennel_core::dog::{validate_dog_patch, validate_new_dog};
use kennel_core::error::CoreError;
use kennel_core::types::DbId;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A raw JSON object body, or the reason it could not be read.
type RawBody = Result<Json<Map<String, Value>>, JsonRejection>;

/// Parse an `{id}` path segment. Must run before any store call.
///
/// An integer too large for `DbId` cannot name a stored row, so it parses to
/// `None` and the handler answers as for any absent dog.
pub fn parse_dog_id(raw: &str) -> Result<Option<DbId>, AppError> {
    match raw.parse::<DbId>() {
        Ok(id) => Ok(Some(id)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Ok(None)
        }
        Err(_) => Err(AppError::Core(CoreError::InvalidId(raw.to_string()))),
    }
}

/// GET /dogs
pub async fn list_dogs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let dogs = state.store.list().await?;

    Ok(Json(dogs))
}

/// GET /dogs/{id}
pub async fn get_dog(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Response> {
    let Some(id) = parse_dog_id(&raw_id)? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    match state.store.find_by_id(id).await? {
        Some(dog) => Ok(Json(dog).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// POST /dogs
///
/// Validates the body before touching the store; a rejected body is never
/// persisted.
pub async fn create_dog(
    State(state): State<AppState>,
    body: RawBody,
) -> AppResult<impl IntoResponse> {
    let Json(body) = body?;
    let input = validate_new_dog(&body).map_err(CoreError::Validation)?;

    let dog = state.store.create(&input).await?;

    tracing::info!(dog_id = dog.id, "Dog created");

    Ok((StatusCode::CREATED, Json(dog)))
}

/// PATCH /dogs/{id}
///
/// Merges the given fields into the stored dog. Answers 201 with the merged
/// record, matching create.
pub async fn update_dog(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: RawBody,
) -> AppResult<Response> {
    let id = parse_dog_id(&raw_id)?;
    let Json(body) = body?;
    let patch = validate_dog_patch(&body).map_err(CoreError::Validation)?;
    let Some(id) = id else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    match state.store.update(id, &patch).await? {
        Some(dog) => {
            tracing::info!(dog_id = dog.id, "Dog updated");
            Ok((StatusCode::CREATED, Json(dog)).into_response())
        }
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// DELETE /dogs/{id}
///
/// Answers 200 with the removed record.
pub async fn delete_dog(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Response> {
    let Some(id) = parse_dog_id(&raw_id)? else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    match state.store.delete(id).await? {
        Some(dog) => {
            tracing::info!(dog_id = dog.id, "Dog deleted");
            Ok(Json(dog).into_response())
        }
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

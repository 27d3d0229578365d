//! Deposition API handlers.
//!
//! Request bodies are parsed leniently: a missing or malformed JSON body
//! degrades to an empty object instead of rejecting the request, matching
//! the endpoint's historical behavior.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Map, Value};

use crate::deposition::{Deposition, DepositionFile, ServiceStatus};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Metadata keys accepted when a patch is sent without a `metadata` wrapper.
const KNOWN_METADATA_KEYS: [&str; 5] = [
    "title",
    "description",
    "tags",
    "publication_type",
    "publication_doi",
];

/// GET /fakenodo/ — liveness blurb.
pub async fn index() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Fakenodo mock alive" }))
}

/// GET /fakenodo/test — status payload consumed by the connectivity probe.
pub async fn service_status(State(state): State<AppState>) -> Json<ServiceStatus> {
    Json(state.service.status())
}

/// POST /fakenodo/deposit/depositions
pub async fn create_deposition(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<Deposition>) {
    let payload = lenient_json(&body);
    let metadata = payload
        .get("metadata")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let deposition = state.service.create(metadata);
    tracing::info!(id = deposition.id, "Deposition created");
    (StatusCode::CREATED, Json(deposition))
}

/// GET /fakenodo/deposit/depositions
pub async fn list_depositions(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "depositions": state.service.list() }))
}

/// GET /fakenodo/deposit/depositions/{id}
pub async fn get_deposition(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Deposition>, ApiError> {
    state
        .service
        .get(id)
        .map(Json)
        .ok_or_else(ApiError::deposition_not_found)
}

/// DELETE /fakenodo/deposit/depositions/{id}
pub async fn delete_deposition(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    if state.service.delete(id) {
        tracing::info!(id, "Deposition removed");
        Ok(Json(json!({ "status": "removed", "id": id })))
    } else {
        Err(ApiError::deposition_not_found())
    }
}

/// POST /fakenodo/deposit/depositions/{id}/files
pub async fn upload_file(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Bytes,
) -> Result<(StatusCode, Json<DepositionFile>), ApiError> {
    let payload = lenient_json(&body);
    let name = payload
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::InvalidRequest("No file name provided".to_string()))?;
    let content = payload.get("content").and_then(Value::as_str);

    let file = state
        .service
        .upload_file(id, name, content.map(str::as_bytes))
        .ok_or_else(ApiError::deposition_not_found)?;

    tracing::info!(id, filename = %file.filename, "File uploaded");
    Ok((StatusCode::CREATED, Json(file)))
}

/// POST /fakenodo/deposit/depositions/{id}/actions/publish
pub async fn publish_deposition(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<(StatusCode, Json<Deposition>), ApiError> {
    let deposition = state
        .service
        .publish(id)
        .ok_or_else(ApiError::deposition_not_found)?;

    tracing::info!(id, doi = ?deposition.doi, "Deposition published");
    Ok((StatusCode::ACCEPTED, Json(deposition)))
}

/// PATCH /fakenodo/deposit/depositions/{id}/metadata
pub async fn update_metadata(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let payload = lenient_json(&body);
    let patch = metadata_patch(&payload);

    let updated = state
        .service
        .update_metadata(id, patch)
        .ok_or_else(ApiError::deposition_not_found)?;

    Ok(Json(json!({
        "id": id,
        "metadata": updated.metadata,
        "dirty": updated.dirty_files,
        "versions": state.service.versions(id),
    })))
}

/// GET /fakenodo/deposit/depositions/{id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> (StatusCode, Json<Value>) {
    match state.service.get(id) {
        Some(_) => (
            StatusCode::OK,
            Json(json!({ "versions": state.service.versions(id) })),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Deposition not found", "versions": [] })),
        ),
    }
}

/// Parse a body as JSON, degrading to `null` on any failure.
fn lenient_json(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

/// Extract a metadata patch from either `{ "metadata": {…} }` or bare
/// known fields at the top level. A `tags` array is joined into a
/// comma-separated string.
fn metadata_patch(payload: &Value) -> Map<String, Value> {
    let mut patch = match payload.get("metadata") {
        Some(Value::Object(map)) => map.clone(),
        _ => {
            let mut map = Map::new();
            if let Value::Object(obj) = payload {
                for key in KNOWN_METADATA_KEYS {
                    if let Some(value) = obj.get(key) {
                        map.insert(key.to_string(), value.clone());
                    }
                }
            }
            map
        }
    };

    let joined = match patch.get("tags") {
        Some(Value::Array(tags)) => Some(
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(","),
        ),
        _ => None,
    };
    if let Some(tags) = joined {
        patch.insert("tags".to_string(), Value::String(tags));
    }

    patch
}

//! AQI record CRUD API
//!
//! - `GET    /api/records`        list all records
//! - `POST   /api/records`        create (all six fields required)
//! - `GET    /api/records/:id`    fetch one
//! - `PUT    /api/records/:id`    partial update (any subset of the six fields)
//! - `DELETE /api/records/:id`    remove
//! - `POST   /api/records/reset`  clear everything

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};
use crate::store::Record;
use crate::AppState;

/// Build record API routes
pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/api/records", get(list_records).post(create_record))
        .route("/api/records/reset", post(reset_records))
        .route(
            "/api/records/:id",
            get(get_record).put(update_record).delete(delete_record),
        )
}

/// Parse a request body as a JSON object
///
/// The body is taken raw so that a missing content type or malformed JSON
/// yields the same `Invalid input data` response as a bad field.
fn parse_object(body: &[u8]) -> ApiResult<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(map),
        _ => Err(ApiError::InvalidInput),
    }
}

/// GET /api/records
pub async fn list_records(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.store.list().await)
}

/// POST /api/records
pub async fn create_record(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Record>)> {
    let fields = parse_object(&body)?;
    let record = state.store.create(&fields).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/records/:id
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Record>> {
    Ok(Json(state.store.get(&id).await?))
}

/// PUT /api/records/:id
///
/// An unknown id is reported as 404 even when the body is also invalid.
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Record>> {
    let fields = match parse_object(&body) {
        Ok(fields) => fields,
        Err(err) => {
            state.store.get(&id).await?;
            return Err(err);
        }
    };
    Ok(Json(state.store.update(&id, &fields).await?))
}

/// DELETE /api/records/:id
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/records/reset
pub async fn reset_records(State(state): State<AppState>) -> StatusCode {
    state.store.reset().await;
    StatusCode::NO_CONTENT
}

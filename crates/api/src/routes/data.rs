//! Brand record routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use brandtrack_core::Brand;
use brandtrack_core::orders::OrderStore;
use brandtrack_core::record::{ConflictQuery, RecordEnvelope, RecordFilter, RecordStore};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, error::ApiError, middleware::Actor};

/// Creates the brand record routes.
pub fn routes<R, O>() -> Router<AppState<R, O>>
where
    R: RecordStore + 'static,
    O: OrderStore + 'static,
{
    Router::new()
        .route("/data", get(list_records::<R, O>).post(save_record::<R, O>))
        .route("/data/brands", get(list_brands))
        .route("/data/check-conflict", get(check_conflict::<R, O>))
        .route("/data/batch", post(batch_save::<R, O>))
        .route("/data/{brand}/{id}", get(get_record::<R, O>))
}

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters for listing records.
#[derive(Debug, Default, Deserialize)]
pub struct ListRecordsQuery {
    /// Brand to list; every brand when absent.
    pub brand: Option<String>,
    /// Calendar year.
    pub year: Option<i32>,
    /// Item label.
    pub item: Option<String>,
    /// Location label.
    pub location: Option<String>,
}

impl ListRecordsQuery {
    fn filter(&self) -> RecordFilter {
        RecordFilter {
            year: self.year,
            item: self.item.clone(),
            location: self.location.clone(),
        }
    }
}

/// Query parameters for a batch save.
#[derive(Debug, Default, Deserialize)]
pub struct BatchQuery {
    /// Brand for payloads that do not name one.
    pub brand: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET `/data` - List records of one brand, or of every brand.
async fn list_records<R, O>(
    State(state): State<AppState<R, O>>,
    Query(query): Query<ListRecordsQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    R: RecordStore + 'static,
    O: OrderStore + 'static,
{
    let records = state
        .records
        .list(query.brand.as_deref(), &query.filter())
        .await?;
    Ok((StatusCode::OK, Json(records)))
}

/// GET `/data/brands` - List the registered brand names.
async fn list_brands() -> impl IntoResponse {
    (StatusCode::OK, Json(Brand::names()))
}

/// GET `/data/check-conflict` - Whether a month already holds data.
async fn check_conflict<R, O>(
    State(state): State<AppState<R, O>>,
    Query(query): Query<ConflictQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    R: RecordStore + 'static,
    O: OrderStore + 'static,
{
    let result = state.records.check_conflict(&query).await?;
    Ok((StatusCode::OK, Json(result)))
}

/// GET `/data/{brand}/{id}` - Fetch one record.
async fn get_record<R, O>(
    State(state): State<AppState<R, O>>,
    Path((brand, id)): Path<(String, i32)>,
) -> Result<impl IntoResponse, ApiError>
where
    R: RecordStore + 'static,
    O: OrderStore + 'static,
{
    let record = state.records.get(&brand, id).await?;
    Ok((StatusCode::OK, Json(record)))
}

/// POST `/data` - Create or update a record; the body names its brand.
async fn save_record<R, O>(
    State(state): State<AppState<R, O>>,
    actor: Actor,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError>
where
    R: RecordStore + 'static,
    O: OrderStore + 'static,
{
    let envelope = RecordEnvelope::from_value(&body, None)?;
    let saved = state
        .records
        .save_record(envelope.brand, envelope.record, actor.name())
        .await?;
    Ok((StatusCode::OK, Json(saved)))
}

/// POST `/data/batch` - Save many records with a single commit.
async fn batch_save<R, O>(
    State(state): State<AppState<R, O>>,
    Query(query): Query<BatchQuery>,
    actor: Actor,
    Json(payloads): Json<Vec<Value>>,
) -> Result<impl IntoResponse, ApiError>
where
    R: RecordStore + 'static,
    O: OrderStore + 'static,
{
    let saved = state
        .records
        .batch_save(query.brand.as_deref(), &payloads, actor.name())
        .await?;
    Ok((StatusCode::OK, Json(json!({ "saved": saved }))))
}

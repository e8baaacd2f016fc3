//! Kmart daily order routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use brandtrack_core::orders::{KmartOrderInput, OrderQuery, OrderStore};
use brandtrack_core::record::RecordStore;
use serde_json::json;

use crate::{AppState, error::ApiError, middleware::Actor};

/// Creates the order routes.
pub fn routes<R, O>() -> Router<AppState<R, O>>
where
    R: RecordStore + 'static,
    O: OrderStore + 'static,
{
    Router::new().route(
        "/order/kmart",
        get(list_kmart::<R, O>).post(save_kmart::<R, O>),
    )
}

/// GET `/order/kmart` - Orders of a year, month or year-to-date range.
async fn list_kmart<R, O>(
    State(state): State<AppState<R, O>>,
    Query(query): Query<OrderQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    R: RecordStore + 'static,
    O: OrderStore + 'static,
{
    let rows = state.orders.list(&query).await?;
    Ok((StatusCode::OK, Json(rows)))
}

/// POST `/order/kmart` - Upsert daily quantities by slot.
async fn save_kmart<R, O>(
    State(state): State<AppState<R, O>>,
    actor: Actor,
    Json(inputs): Json<Vec<KmartOrderInput>>,
) -> Result<impl IntoResponse, ApiError>
where
    R: RecordStore + 'static,
    O: OrderStore + 'static,
{
    let saved = state.orders.save_batch(inputs, actor.name()).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "saved": saved, "message": "Records saved successfully" })),
    ))
}

//! API route definitions.

use axum::Router;
use brandtrack_core::orders::OrderStore;
use brandtrack_core::record::RecordStore;

use crate::AppState;

pub mod data;
pub mod health;
pub mod orders;


/// Creates the API router with all routes.
pub fn api_routes<R, O>() -> Router<AppState<R, O>>
where
    R: RecordStore + 'static,
    O: OrderStore + 'static,
{
    Router::new()
        .merge(health::routes())
        .merge(data::routes())
        .merge(orders::routes())
}

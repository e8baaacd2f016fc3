//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for brand records and Kmart orders
//! - The caller identity extractor
//! - Error-to-response mapping

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use brandtrack_core::orders::{OrderService, OrderStore};
use brandtrack_core::record::{RecordService, RecordStore};
use brandtrack_db::{BrandRecordRepository, KmartOrderRepository};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
///
/// Generic over the stores so the same routes serve PostgreSQL in production
/// and in-memory stores in tests.
pub struct AppState<R = BrandRecordRepository, O = KmartOrderRepository>
where
    R: RecordStore,
    O: OrderStore,
{
    /// Brand record service.
    pub records: RecordService<R>,
    /// Kmart order service.
    pub orders: OrderService<O>,
}

impl<R: RecordStore, O: OrderStore> Clone for AppState<R, O> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            orders: self.orders.clone(),
        }
    }
}

impl<R: RecordStore, O: OrderStore> AppState<R, O> {
    /// Builds state over the given stores.
    #[must_use]
    pub fn new(records: Arc<R>, orders: Arc<O>) -> Self {
        Self {
            records: RecordService::new(records),
            orders: OrderService::new(orders),
        }
    }
}

impl AppState {
    /// Builds PostgreSQL-backed state from a connection pool.
    #[must_use]
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self::new(
            Arc::new(BrandRecordRepository::new(db.clone())),
            Arc::new(KmartOrderRepository::new(db)),
        )
    }
}

/// Creates the main application router.
pub fn create_router<R, O>(state: AppState<R, O>) -> Router
where
    R: RecordStore + 'static,
    O: OrderStore + 'static,
{
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

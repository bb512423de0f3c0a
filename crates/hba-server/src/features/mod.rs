//! Feature modules implementing the HBA API
//!
//! This module contains all feature slices following the CQRS (Command
//! Query Responsibility Segregation) pattern. Each feature is organized as
//! a vertical slice with its own commands, queries, and routes.
//!
//! # Features
//!
//! - **bookings**: the row store - CSV upload (whole-table replace), list,
//!   get, search, and summary statistics
//! - **analytics**: the fixed catalog of aggregation queries over the
//!   booking dataset file
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations
//! - `queries/` - Read operations
//! - `routes.rs` - HTTP route definitions
//! - `types.rs` - Shared types (if needed)
//!
//! Commands and queries implement the mediator pattern using the `mediator`
//! crate; see [`crate::cqrs::build_mediator`] for the dispatch table.

pub mod analytics;
pub mod bookings;
pub mod shared;

use std::sync::Arc;

use axum::Router;

use crate::auth::AuthCredentials;
use crate::dataset::DatasetSource;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// PostgreSQL connection pool for the booking row store
    pub db: sqlx::PgPool,
    /// Handle on the booking dataset file
    pub dataset: DatasetSource,
    /// Static credentials for the gated analytics routes
    pub credentials: Arc<AuthCredentials>,
}

/// Creates the main API router with all feature routes mounted
///
/// - `/bookings` - Row store operations
/// - `/analytics` - The aggregation catalog
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest(
            "/bookings",
            bookings::bookings_routes().with_state(state.db.clone()),
        )
        .nest(
            "/analytics",
            analytics::analytics_routes(state.credentials.clone())
                .with_state(state.dataset.clone()),
        )
}

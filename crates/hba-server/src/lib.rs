//! HBA Server Library
//!
//! HTTP server exposing hotel booking records through a query and
//! aggregation API.
//!
//! # Overview
//!
//! Two independent data sources feed the API:
//!
//! - **Row Store**: PostgreSQL table of uploaded booking records, populated
//!   by whole-table replace and read by id/filter
//! - **Dataset**: a CSV file of historical booking rows, re-read on every
//!   analytics call and aggregated in memory
//!
//! # Architecture
//!
//! The server follows a **CQRS (Command Query Responsibility Segregation)**
//! architecture. Each feature is a vertical slice with its own commands,
//! queries, and routes:
//!
//! - **Commands** (write operations): the booking upload, a destructive
//!   whole-table replace executed in one transaction
//! - **Queries** (read operations): row-store lookups and the fixed catalog
//!   of analytics aggregations
//!
//! Commands and queries implement the mediator pattern using the `mediator`
//! crate; [`cqrs::build_mediator`] is the single dispatch table mapping each
//! operation to its handler.
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework
//! - **SQLx**: PostgreSQL access
//! - **Tower**: middleware and service abstractions
//!
//! # Example
//!
//! ```no_run
//! use hba_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod cqrs;
pub mod dataset;
pub mod db;
pub mod features;
pub mod middleware;

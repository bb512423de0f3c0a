//! HBA Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging for the HBA workspace.
//!
//! # Overview
//!
//! This crate provides functionality used across all HBA workspace members:
//!
//! - **Error Handling**: the [`HbaError`] type and [`Result`] alias
//! - **Logging**: `tracing`-based logging with configurable output targets,
//!   formats, and daily file rotation
//!
//! # Example
//!
//! ```no_run
//! use hba_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> hba_common::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     tracing::info!("Application started");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{HbaError, Result};

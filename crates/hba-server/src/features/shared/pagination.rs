//! Shared pagination utilities
//!
//! The row-store list and search queries paginate with `skip`/`limit`
//! offsets. Defaults: skip 0, limit 100; limit is clamped to 1-500.

use serde::{Deserialize, Serialize};

/// Default number of rows returned when no limit is given
pub const DEFAULT_LIMIT: i64 = 100;

/// Upper bound on the number of rows a single request may return
pub const MAX_LIMIT: i64 = 500;

/// Common offset pagination parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct PageParams {
    /// Number of rows to skip. Defaults to 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,

    /// Maximum rows to return. Defaults to 100, clamped to 1-500.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Self {
        Self { skip, limit }
    }

    /// Number of rows to skip, defaulting to 0
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    /// Row cap, defaulting to 100 and clamped to 1-500
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Validate pagination parameters
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(skip) = self.skip {
            if skip < 0 {
                return Err("Skip cannot be negative");
            }
        }
        if let Some(limit) = self.limit {
            if limit < 1 || limit > MAX_LIMIT {
                return Err("Limit must be between 1 and 500");
            }
        }
        Ok(())
    }
}

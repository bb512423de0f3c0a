//! Most popular meal package (mode over meal codes)

use std::collections::BTreeMap;

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::dataset::{BookingDatasetRow, DatasetSource};
use crate::features::analytics::AnalyticsError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PopularMealPackageQuery {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularMealPackage {
    pub meal: String,
}

impl Request<Result<PopularMealPackage, AnalyticsError>> for PopularMealPackageQuery {}

impl crate::cqrs::middleware::Query for PopularMealPackageQuery {}

#[tracing::instrument(skip(source))]
pub async fn handle(
    source: DatasetSource,
    _query: PopularMealPackageQuery,
) -> Result<PopularMealPackage, AnalyticsError> {
    let rows = source.load().await?;
    compute(&rows)
}

fn compute(rows: &[BookingDatasetRow]) -> Result<PopularMealPackage, AnalyticsError> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.meal.as_str()).or_default() += 1;
    }

    // Ascending iteration with a strict comparison keeps the smallest meal
    // code among frequency ties, so repeated calls agree.
    let mut best: Option<(&str, u64)> = None;
    for (meal, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((meal, count));
        }
    }

    match best {
        Some((meal, _)) => Ok(PopularMealPackage {
            meal: meal.to_string(),
        }),
        None => Err(AnalyticsError::NoData(
            "No meal package information found",
        )),
    }
}

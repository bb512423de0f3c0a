//! CQRS mediator wiring
//!
//! [`build_mediator`] is the single dispatch table mapping every operation
//! in the API - the booking upload command, the row-store queries, and the
//! full analytics catalog - to its handler function.

pub use mediator::DefaultAsyncMediator;
use sqlx::PgPool;

use crate::dataset::DatasetSource;

pub mod middleware;

pub type AppMediator = DefaultAsyncMediator;

pub fn build_mediator(pool: PgPool, dataset: DatasetSource) -> AppMediator {
    DefaultAsyncMediator::builder()
        // Bookings
        .add_handler({
            let pool = pool.clone();
            move |cmd| {
                let pool = pool.clone();
                async move { crate::features::bookings::commands::upload::handle(pool, cmd).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::bookings::queries::list::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::bookings::queries::get::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::bookings::queries::search::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::bookings::queries::stats::handle(pool, query).await }
            }
        })
        // Analytics catalog
        .add_handler({
            let dataset = dataset.clone();
            move |query| {
                let dataset = dataset.clone();
                async move {
                    crate::features::analytics::queries::bookings_by_month::handle(dataset, query)
                        .await
                }
            }
        })
        .add_handler({
            let dataset = dataset.clone();
            move |query| {
                let dataset = dataset.clone();
                async move {
                    crate::features::analytics::queries::bookings_by_nationality::handle(
                        dataset, query,
                    )
                    .await
                }
            }
        })
        .add_handler({
            let dataset = dataset.clone();
            move |query| {
                let dataset = dataset.clone();
                async move {
                    crate::features::analytics::queries::popular_meal_package::handle(
                        dataset, query,
                    )
                    .await
                }
            }
        })
        .add_handler({
            let dataset = dataset.clone();
            move |query| {
                let dataset = dataset.clone();
                async move {
                    crate::features::analytics::queries::avg_length_of_stay::handle(dataset, query)
                        .await
                }
            }
        })
        .add_handler({
            let dataset = dataset.clone();
            move |query| {
                let dataset = dataset.clone();
                async move {
                    crate::features::analytics::queries::total_revenue::handle(dataset, query)
                        .await
                }
            }
        })
        .add_handler({
            let dataset = dataset.clone();
            move |query| {
                let dataset = dataset.clone();
                async move {
                    crate::features::analytics::queries::top_countries::handle(dataset, query)
                        .await
                }
            }
        })
        .add_handler({
            let dataset = dataset.clone();
            move |query| {
                let dataset = dataset.clone();
                async move {
                    crate::features::analytics::queries::repeated_guests_percentage::handle(
                        dataset, query,
                    )
                    .await
                }
            }
        })
        .add_handler({
            let dataset = dataset.clone();
            move |query| {
                let dataset = dataset.clone();
                async move {
                    crate::features::analytics::queries::total_guests_by_year::handle(
                        dataset, query,
                    )
                    .await
                }
            }
        })
        .add_handler({
            let dataset = dataset.clone();
            move |query| {
                let dataset = dataset.clone();
                async move {
                    crate::features::analytics::queries::avg_daily_rate_resort::handle(
                        dataset, query,
                    )
                    .await
                }
            }
        })
        .add_handler({
            let dataset = dataset.clone();
            move |query| {
                let dataset = dataset.clone();
                async move {
                    crate::features::analytics::queries::common_arrival_day_city::handle(
                        dataset, query,
                    )
                    .await
                }
            }
        })
        .add_handler({
            let dataset = dataset.clone();
            move |query| {
                let dataset = dataset.clone();
                async move {
                    crate::features::analytics::queries::count_by_hotel_meal::handle(
                        dataset, query,
                    )
                    .await
                }
            }
        })
        .add_handler({
            let dataset = dataset.clone();
            move |query| {
                let dataset = dataset.clone();
                async move {
                    crate::features::analytics::queries::revenue_resort_by_country::handle(
                        dataset, query,
                    )
                    .await
                }
            }
        })
        .add_handler({
            let dataset = dataset.clone();
            move |query| {
                let dataset = dataset.clone();
                async move {
                    crate::features::analytics::queries::count_by_hotel_repeated_guest::handle(
                        dataset, query,
                    )
                    .await
                }
            }
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mediator_builds() {
        // connect_lazy performs no I/O; this checks that every handler
        // registration type-checks against its request type.
        let pool = PgPool::connect_lazy("postgres://localhost/hba").unwrap();
        let dataset = DatasetSource::new("./hotel_booking_data.csv");
        let _mediator = build_mediator(pool, dataset);
    }
}

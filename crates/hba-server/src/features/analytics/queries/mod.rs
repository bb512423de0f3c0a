//! Analytics catalog queries
//!
//! One module per catalog operation.

pub mod avg_daily_rate_resort;
pub mod avg_length_of_stay;
pub mod bookings_by_month;
pub mod bookings_by_nationality;
pub mod common_arrival_day_city;
pub mod count_by_hotel_meal;
pub mod count_by_hotel_repeated_guest;
pub mod popular_meal_package;
pub mod repeated_guests_percentage;
pub mod revenue_resort_by_country;
pub mod top_countries;
pub mod total_guests_by_year;
pub mod total_revenue;

pub use avg_daily_rate_resort::AvgDailyRateResortQuery;
pub use avg_length_of_stay::AvgLengthOfStayQuery;
pub use bookings_by_month::BookingsByMonthQuery;
pub use bookings_by_nationality::BookingsByNationalityQuery;
pub use common_arrival_day_city::CommonArrivalDayCityQuery;
pub use count_by_hotel_meal::CountByHotelMealQuery;
pub use count_by_hotel_repeated_guest::CountByHotelRepeatedGuestQuery;
pub use popular_meal_package::PopularMealPackageQuery;
pub use repeated_guests_percentage::RepeatedGuestsPercentageQuery;
pub use revenue_resort_by_country::RevenueResortByCountryQuery;
pub use top_countries::TopCountriesQuery;
pub use total_guests_by_year::TotalGuestsByYearQuery;
pub use total_revenue::TotalRevenueQuery;

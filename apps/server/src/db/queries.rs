//! SQL for the rental read model

use rentals_query::{BindValue, Statement};

/// Every rental joined with its owner. Filter, sort and paging clauses are
/// appended directly, so this must not end in `;` or contain a WHERE.
///
/// NUMERIC columns are cast to float8 here so rows decode into `f64`.
pub const SELECT_RENTALS: &str = "
    SELECT rentals.id,
           rentals.name,
           rentals.description,
           rentals.type,
           rentals.vehicle_make,
           rentals.vehicle_model,
           rentals.vehicle_year,
           rentals.vehicle_length::float8 AS vehicle_length,
           rentals.sleeps,
           rentals.primary_image_url,
           rentals.price_per_day,
           rentals.home_city,
           rentals.home_state,
           rentals.home_zip,
           rentals.home_country,
           rentals.lat::float8 AS lat,
           rentals.lng::float8 AS lng,
           users.id AS user_id,
           users.first_name,
           users.last_name
    FROM rentals
             LEFT JOIN users ON users.id = rentals.user_id";

pub fn select_all_rentals() -> Statement {
    Statement::new(SELECT_RENTALS)
}

pub fn select_rental_by_id(id: i64) -> Statement {
    Statement::new(format!("{} WHERE rentals.id = $1", SELECT_RENTALS)).bind(BindValue::Int(id))
}

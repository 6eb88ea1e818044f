//! Rental read model
//!
//! A rental listing joined with the identity of the user who listed it.
//! Rows come flat out of the database and are regrouped into the nested
//! JSON shape clients see.

use serde::{Deserialize, Serialize};

/// Flat row as returned by the rental base query.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct RentalRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    #[sqlx(rename = "type")]
    pub rental_type: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub vehicle_length: f64,
    pub sleeps: i32,
    pub primary_image_url: String,
    pub price_per_day: i64,
    pub home_city: String,
    pub home_state: String,
    pub home_zip: String,
    pub home_country: String,
    pub lat: f64,
    pub lng: f64,
    // Listing owner comes from a LEFT JOIN and may be missing.
    pub user_id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub id: i32,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub rental_type: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub length: f64,
    pub sleeps: i32,
    pub primary_image_url: String,
    pub price: Price,
    pub location: Location,
    pub user: RentalUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub day: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalUser {
    pub id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<RentalRow> for Rental {
    fn from(row: RentalRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            rental_type: row.rental_type,
            make: row.vehicle_make,
            model: row.vehicle_model,
            year: row.vehicle_year,
            length: row.vehicle_length,
            sleeps: row.sleeps,
            primary_image_url: row.primary_image_url,
            price: Price {
                day: row.price_per_day,
            },
            location: Location {
                city: row.home_city,
                state: row.home_state,
                zip: row.home_zip,
                country: row.home_country,
                lat: row.lat,
                lng: row.lng,
            },
            user: RentalUser {
                id: row.user_id,
                first_name: row.first_name,
                last_name: row.last_name,
            },
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_row(id: i32, price_per_day: i64) -> RentalRow {
    RentalRow {
        id,
        name: format!("Rental {id}"),
        description: "Sleeps the whole family".to_string(),
        rental_type: "camper-van".to_string(),
        vehicle_make: "Volkswagen".to_string(),
        vehicle_model: "Bay Window".to_string(),
        vehicle_year: 1978,
        vehicle_length: 15.5,
        sleeps: 4,
        primary_image_url: format!("https://img.example.com/{id}.jpg"),
        price_per_day,
        home_city: "Costa Mesa".to_string(),
        home_state: "CA".to_string(),
        home_zip: "92627".to_string(),
        home_country: "US".to_string(),
        lat: 33.64,
        lng: -117.93,
        user_id: Some(1),
        first_name: Some("John".to_string()),
        last_name: Some("Smith".to_string()),
    }
}

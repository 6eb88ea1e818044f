//! Rental routes

use crate::api::handlers::rentals;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn rental_routes() -> Router<AppState> {
    Router::new()
        .route("/rentals", get(rentals::list_rentals))
        .route("/rentals/:id", get(rentals::get_rental))
}

//! Domain models for the rentals API

pub mod rental;

pub use rental::{Location, Price, Rental, RentalRow, RentalUser};

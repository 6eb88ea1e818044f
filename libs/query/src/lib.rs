//! Rental listing query composition.
//!
//! Turns untrusted URL query parameters into a SQL fragment appended to the
//! rental base query:
//! - [`QueryParams`] holds the raw `key=value` pairs as received
//! - [`validate`] checks every recognized parameter and produces a typed [`RentalFilter`]
//! - [`ClauseBuilder`] renders WHERE / ORDER BY / LIMIT / OFFSET in a fixed order,
//!   with filter values carried as bind parameters
//!
//! Everything here is pure and synchronous; executing the statement is left
//! to the caller.

mod bind;
mod clause;
mod params;
mod validate;

pub use bind::{BindValue, Statement};
pub use clause::{ClauseBuilder, QueryFragment};
pub use params::{QueryParams, RecognizedParam};
pub use validate::{validate, Coordinates, RentalFilter, ValidationError, ValidationOutcome};

//! Rental repository
//!
//! Validates listing parameters, composes the statement and hands it to the
//! store. Storage errors pass through untouched.

use crate::{
    db::{
        queries::{select_all_rentals, select_rental_by_id, SELECT_RENTALS},
        traits::RentalStore,
    },
    metrics::{RENTAL_QUERIES_TOTAL, RENTAL_RESULTS},
    models::Rental,
    Error, Result,
};
use rentals_query::{validate, ClauseBuilder, QueryParams, RentalFilter};
use std::sync::Arc;

#[derive(Clone)]
pub struct RentalRepository {
    store: Arc<dyn RentalStore>,
}

impl RentalRepository {
    pub fn new(store: Arc<dyn RentalStore>) -> Self {
        Self { store }
    }

    /// Fetch a single rental by id.
    ///
    /// # Errors
    /// * `NotFound` - no rental has this id
    /// * `Database` / `Timeout` - the store failed
    pub async fn get_one(&self, id: i64) -> Result<Rental> {
        let result = self
            .store
            .fetch_one(&select_rental_by_id(id))
            .await
            .map(Rental::from);

        record("get_one", &result);
        result
    }

    /// List rentals matching `params`.
    ///
    /// With no parameters at all every rental is returned. Otherwise the
    /// parameters are validated first; a rejected parameter yields an error
    /// for which [`Error::failed_validation`] is true and the store is never called.
    pub async fn get_many(&self, params: &QueryParams) -> Result<Vec<Rental>> {
        let result = self.list(params).await;
        record("get_many", &result);

        result.map(|(rentals, filtered)| {
            RENTAL_RESULTS
                .with_label_values(&[if filtered { "true" } else { "false" }])
                .observe(rentals.len() as f64);
            rentals
        })
    }

    /// Runs the listing and reports whether any filter, sort or page was applied.
    async fn list(&self, params: &QueryParams) -> Result<(Vec<Rental>, bool)> {
        let filter = if params.is_empty() {
            RentalFilter::default()
        } else {
            validate(params).map_err(|e| {
                tracing::debug!(reason = %e, "Rejected rental listing parameters");
                Error::from(e)
            })?
        };

        let filtered = !filter.is_unfiltered();
        let statement = if filtered {
            ClauseBuilder::build(&filter).append_to(SELECT_RENTALS)
        } else {
            select_all_rentals()
        };

        tracing::debug!(sql = %statement.sql, binds = statement.binds.len(), "Listing rentals");

        let rows = self.store.fetch_all(&statement).await?;
        Ok((rows.into_iter().map(Rental::from).collect(), filtered))
    }
}

fn record<T>(operation: &str, result: &Result<T>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) if e.failed_validation() => "validation_failed",
        Err(e) if e.is_not_found() => "not_found",
        Err(_) => "storage_error",
    };
    RENTAL_QUERIES_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}

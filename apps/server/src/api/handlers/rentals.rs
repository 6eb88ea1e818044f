//! Rental handlers

use crate::{
    models::Rental, request_context::RequestContext, state::AppState, Error, Result,
};
use axum::{
    extract::{Path, RawQuery, State},
    Extension, Json,
};
use rentals_query::QueryParams;

const INVALID_ID: &str = "provided parameter should be of type int";

/// `GET /rentals/{id}`
///
/// A missing rental is answered with 204 and no body.
pub async fn get_rental(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(raw_id): Path<String>,
) -> Result<Json<Rental>> {
    let id = parse_id(&raw_id)?;

    match state.rentals.get_one(id).await {
        Ok(rental) => Ok(Json(rental)),
        Err(e) if e.is_not_found() => {
            tracing::debug!(request_id = %ctx.request_id, id, "Rental not found");
            Err(e)
        }
        Err(e) => {
            tracing::error!(request_id = %ctx.request_id, id, error = %e, "Failed to load rental");
            Err(e)
        }
    }
}

/// `GET /rentals`
pub async fn list_rentals(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Rental>>> {
    let params = QueryParams::parse(query.as_deref().unwrap_or_default());

    for name in params.unrecognized() {
        tracing::debug!(request_id = %ctx.request_id, param = name, "Ignoring unrecognized parameter");
    }

    match state.rentals.get_many(&params).await {
        Ok(rentals) => Ok(Json(rentals)),
        Err(e) if e.failed_validation() => Err(e),
        Err(e) => {
            tracing::error!(request_id = %ctx.request_id, error = %e, "Failed to list rentals");
            Err(e)
        }
    }
}

fn parse_id(raw: &str) -> Result<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 0 => Ok(id),
        _ => Err(Error::InvalidParameter(INVALID_ID.to_string())),
    }
}

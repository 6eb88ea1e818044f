use anyhow::Context as _;
use axum::{body::Bytes, http::StatusCode};
use serde_json::Value;

pub fn assert_status(actual: StatusCode, expected: StatusCode, what: &str) {
    assert_eq!(actual, expected, "unexpected status for {what}");
}

pub fn json(body: &Bytes) -> anyhow::Result<Value> {
    serde_json::from_slice(body).context("parse response body as JSON")
}

/// Ids of a JSON array of rentals, in response order.
pub fn rental_ids(body: &Bytes) -> anyhow::Result<Vec<i64>> {
    json(body)?
        .as_array()
        .context("response is a JSON array")?
        .iter()
        .map(|r| r["id"].as_i64().context("rental id is an integer"))
        .collect()
}

pub fn assert_error(body: &Bytes, reason: &str) -> anyhow::Result<()> {
    assert_eq!(json(body)?, serde_json::json!({ "error": reason }));
    Ok(())
}

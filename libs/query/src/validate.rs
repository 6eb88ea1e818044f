//! Validation of rental listing parameters.
//!
//! Checks run in a fixed order and the first failure wins:
//! price_min, price_max, the min/max relation, limit, offset, ids, near.
//! Unrecognized keys never fail validation.

use crate::params::{QueryParams, RecognizedParam};
use thiserror::Error;

/// Reason a parameter set was rejected. The messages are returned to API
/// clients verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("price must be a positive number")]
    InvalidPrice,

    #[error("price_min must be less than price_max")]
    PriceRange,

    #[error("limit and offset must be a positive integer")]
    InvalidPaging,

    #[error("ids should be int values")]
    NonIntegerIds,

    #[error("ids should be positive numbers greater than 0")]
    NonPositiveIds,

    #[error("there should be comma separator for the near parameter")]
    NearMissingSeparator,

    #[error("near values should be a comma separated pair")]
    NearNotPair,

    #[error("near values should be numeric")]
    NearNotNumeric,
}

/// `Ok` is the valid outcome and carries the parsed values.
pub type ValidationOutcome = Result<RentalFilter, ValidationError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Typed, validated listing parameters. Only values in here ever reach SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentalFilter {
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub ids: Option<Vec<i64>>,
    pub near: Option<Coordinates>,
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl RentalFilter {
    /// True when no recognized parameter was supplied.
    pub fn is_unfiltered(&self) -> bool {
        *self == Self::default()
    }

    /// Best-effort variant: each recognized key is parsed on its own and
    /// values that do not parse are dropped instead of failing.
    pub fn lenient(params: &QueryParams) -> Self {
        Self {
            price_min: params
                .value(RecognizedParam::PriceMin)
                .and_then(|v| parse_price(v).ok()),
            price_max: params
                .value(RecognizedParam::PriceMax)
                .and_then(|v| parse_price(v).ok()),
            ids: params
                .value(RecognizedParam::Ids)
                .and_then(|v| parse_ids(v).ok()),
            near: params
                .value(RecognizedParam::Near)
                .and_then(|v| parse_near(v).ok()),
            sort: params.value(RecognizedParam::Sort).map(str::to_string),
            limit: params
                .value(RecognizedParam::Limit)
                .and_then(|v| parse_positive_int(v).ok()),
            offset: params
                .value(RecognizedParam::Offset)
                .and_then(|v| parse_positive_int(v).ok()),
        }
    }
}

/// Validate `params` and return the typed filter, or the first failure.
pub fn validate(params: &QueryParams) -> ValidationOutcome {
    let mut filter = RentalFilter::default();

    if let Some(raw) = params.value(RecognizedParam::PriceMin) {
        filter.price_min = Some(parse_price(raw)?);
    }
    if let Some(raw) = params.value(RecognizedParam::PriceMax) {
        filter.price_max = Some(parse_price(raw)?);
    }
    if let (Some(min), Some(max)) = (filter.price_min, filter.price_max) {
        if min >= max {
            return Err(ValidationError::PriceRange);
        }
    }
    if let Some(raw) = params.value(RecognizedParam::Limit) {
        filter.limit = Some(parse_positive_int(raw)?);
    }
    if let Some(raw) = params.value(RecognizedParam::Offset) {
        filter.offset = Some(parse_positive_int(raw)?);
    }
    if let Some(raw) = params.value(RecognizedParam::Ids) {
        filter.ids = Some(parse_ids(raw)?);
    }
    if let Some(raw) = params.value(RecognizedParam::Near) {
        filter.near = Some(parse_near(raw)?);
    }
    filter.sort = params.value(RecognizedParam::Sort).map(str::to_string);

    Ok(filter)
}

/// Plain decimal: ASCII digits with at most one `.`. Signs, exponents,
/// `NaN` and `inf` are all rejected.
fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let mut digits = 0usize;
    let mut dots = 0usize;
    for b in raw.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return Err(ValidationError::InvalidPrice),
        }
    }
    if digits == 0 || dots > 1 {
        return Err(ValidationError::InvalidPrice);
    }
    raw.parse::<f64>()
        .map_err(|_| ValidationError::InvalidPrice)
}

fn parse_positive_int(raw: &str) -> Result<i64, ValidationError> {
    raw.parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or(ValidationError::InvalidPaging)
}

// The integer check covers the whole list before positivity is looked at.
fn parse_ids(raw: &str) -> Result<Vec<i64>, ValidationError> {
    let ids = raw
        .split(',')
        .map(str::parse::<i64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ValidationError::NonIntegerIds)?;

    if ids.iter().any(|id| *id <= 0) {
        return Err(ValidationError::NonPositiveIds);
    }
    Ok(ids)
}

fn parse_near(raw: &str) -> Result<Coordinates, ValidationError> {
    if !raw.contains(',') {
        return Err(ValidationError::NearMissingSeparator);
    }

    let parts: Vec<&str> = raw.split(',').collect();
    let [lat, lng] = parts.as_slice() else {
        return Err(ValidationError::NearNotPair);
    };

    Ok(Coordinates {
        lat: parse_coordinate(lat)?,
        lng: parse_coordinate(lng)?,
    })
}

fn parse_coordinate(raw: &str) -> Result<f64, ValidationError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::NearNotNumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().copied().collect()
    }

    fn reason(pairs: &[(&str, &str)]) -> String {
        validate(&params(pairs)).unwrap_err().to_string()
    }

    #[test]
    fn negative_or_non_numeric_prices_are_rejected() {
        for bad in ["-1", "abc", "1e3", "NaN", "inf", "1.2.3", ".", "+5", " 5"] {
            assert_eq!(
                reason(&[("price_min", bad)]),
                "price must be a positive number",
                "price_min={bad}"
            );
            assert_eq!(
                reason(&[("price_max", bad)]),
                "price must be a positive number",
                "price_max={bad}"
            );
        }
    }

    #[test]
    fn zero_and_decimal_prices_are_accepted() {
        let filter = validate(&params(&[("price_min", "0"), ("price_max", "1000.01")])).unwrap();
        assert_eq!(filter.price_min, Some(0.0));
        assert_eq!(filter.price_max, Some(1000.01));
    }

    #[test]
    fn price_min_must_be_strictly_below_price_max() {
        assert_eq!(
            reason(&[("price_min", "1000.01"), ("price_max", "1000")]),
            "price_min must be less than price_max"
        );
        assert_eq!(
            reason(&[("price_min", "1000"), ("price_max", "1000")]),
            "price_min must be less than price_max"
        );
        assert!(validate(&params(&[("price_min", "1000"), ("price_max", "1000.01")])).is_ok());
    }

    #[test]
    fn limit_and_offset_must_be_positive_integers() {
        for bad in ["0", "1.5", "-1", "ten"] {
            assert_eq!(
                reason(&[("limit", bad)]),
                "limit and offset must be a positive integer"
            );
            assert_eq!(
                reason(&[("offset", bad)]),
                "limit and offset must be a positive integer"
            );
        }
        let filter = validate(&params(&[("limit", "5"), ("offset", "10")])).unwrap();
        assert_eq!(filter.limit, Some(5));
        assert_eq!(filter.offset, Some(10));
    }

    #[test]
    fn ids_format_check_precedes_positivity_check() {
        assert_eq!(reason(&[("ids", "1.2,2,5")]), "ids should be int values");
        assert_eq!(reason(&[("ids", "holla,cute code")]), "ids should be int values");
        assert_eq!(reason(&[("ids", "-1,abc")]), "ids should be int values");
        assert_eq!(reason(&[("ids", "1,,2")]), "ids should be int values");
        assert_eq!(
            reason(&[("ids", "1,10,-1")]),
            "ids should be positive numbers greater than 0"
        );
        assert_eq!(
            reason(&[("ids", "0")]),
            "ids should be positive numbers greater than 0"
        );
    }

    #[test]
    fn valid_ids_keep_input_order() {
        let filter = validate(&params(&[("ids", "11,1,6")])).unwrap();
        assert_eq!(filter.ids, Some(vec![11, 1, 6]));
    }

    #[test]
    fn near_reports_each_failure_kind() {
        assert_eq!(
            reason(&[("near", "33.6")]),
            "there should be comma separator for the near parameter"
        );
        assert_eq!(
            reason(&[("near", "1,2,3")]),
            "near values should be a comma separated pair"
        );
        assert_eq!(
            reason(&[("near", "north,west")]),
            "near values should be numeric"
        );
        assert_eq!(reason(&[("near", "1,")]), "near values should be numeric");
    }

    #[test]
    fn near_accepts_negative_coordinates() {
        let filter = validate(&params(&[("near", "33.64,-117.93")])).unwrap();
        assert_eq!(
            filter.near,
            Some(Coordinates {
                lat: 33.64,
                lng: -117.93
            })
        );
    }

    #[test]
    fn first_failure_in_check_order_wins() {
        // price beats paging, paging beats ids, ids beat near
        assert_eq!(
            reason(&[("near", "x"), ("ids", "a"), ("limit", "0"), ("price_max", "-3")]),
            "price must be a positive number"
        );
        assert_eq!(
            reason(&[("near", "x"), ("ids", "a"), ("offset", "0")]),
            "limit and offset must be a positive integer"
        );
        assert_eq!(reason(&[("near", "x"), ("ids", "a")]), "ids should be int values");
    }

    #[test]
    fn unrecognized_and_empty_parameters_are_ignored() {
        let filter = validate(&params(&[
            ("color", "blue"),
            ("price_min", ""),
            ("ids", ""),
            ("sort", ""),
        ]))
        .unwrap();
        assert!(filter.is_unfiltered());
    }

    #[test]
    fn sort_is_carried_verbatim() {
        let filter = validate(&params(&[("sort", "vehicle_year")])).unwrap();
        assert_eq!(filter.sort.as_deref(), Some("vehicle_year"));
    }

    #[test]
    fn lenient_drops_values_that_do_not_parse() {
        let filter = RentalFilter::lenient(&params(&[
            ("price_min", "-1"),
            ("price_max", "200"),
            ("ids", "1,x"),
            ("limit", "3"),
            ("near", "nowhere"),
        ]));
        assert_eq!(filter.price_min, None);
        assert_eq!(filter.price_max, Some(200.0));
        assert_eq!(filter.ids, None);
        assert_eq!(filter.near, None);
        assert_eq!(filter.limit, Some(3));
    }
}

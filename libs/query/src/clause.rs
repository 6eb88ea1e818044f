//! SQL clause composition for validated rental filters.
//!
//! Clauses are emitted in a fixed order regardless of how the parameters
//! arrived: WHERE, ORDER BY, LIMIT, OFFSET. Filter values never appear in
//! the SQL text; they are pushed as binds and referenced as `$n`.
//!
//! The one exception is `sort`: anything other than `price` is used as the
//! ORDER BY expression as-is. There is no column allow-list.

use crate::bind::{push_bind, BindValue, Statement};
use crate::params::QueryParams;
use crate::validate::RentalFilter;

/// Clause fragments in emission order, plus the binds they reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryFragment {
    clauses: Vec<String>,
    binds: Vec<BindValue>,
}

impl QueryFragment {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    pub fn binds(&self) -> &[BindValue] {
        &self.binds
    }

    /// The concatenated fragment text with any `[` / `]` removed.
    pub fn sql(&self) -> String {
        self.clauses.concat().replace(&['[', ']'][..], "")
    }

    /// Append this fragment to `base` (which must not end in `;`).
    pub fn append_to(self, base: &str) -> Statement {
        let sql = format!("{}{}", base, self.sql());
        Statement {
            sql,
            binds: self.binds,
        }
    }
}

/// Builds a [`QueryFragment`] from a [`RentalFilter`].
#[derive(Debug, Default)]
pub struct ClauseBuilder {
    clauses: Vec<String>,
    binds: Vec<BindValue>,
}

impl ClauseBuilder {
    /// Compose the fragment for an already validated filter.
    pub fn build(filter: &RentalFilter) -> QueryFragment {
        let mut builder = Self::default();
        builder.push_where_clause(filter);
        builder.push_sorting_clause(filter);
        builder.push_final_clauses(filter);
        QueryFragment {
            clauses: builder.clauses,
            binds: builder.binds,
        }
    }

    /// Compose a fragment without validating first. Values that do not parse
    /// are skipped, as are unrecognized keys.
    pub fn lenient(params: &QueryParams) -> QueryFragment {
        Self::build(&RentalFilter::lenient(params))
    }

    fn bind(&mut self, value: BindValue) -> usize {
        push_bind(&mut self.binds, value)
    }

    fn push_where_clause(&mut self, filter: &RentalFilter) {
        let mut predicates = Vec::new();

        if let Some(min) = filter.price_min {
            let idx = self.bind(BindValue::Float(min));
            predicates.push(format!("price_per_day >= ${}", idx));
        }
        if let Some(max) = filter.price_max {
            let idx = self.bind(BindValue::Float(max));
            predicates.push(format!("price_per_day <= ${}", idx));
        }
        if let Some(ids) = filter.ids.as_deref().filter(|ids| !ids.is_empty()) {
            let placeholders = ids
                .iter()
                .map(|id| format!("${}", self.bind(BindValue::Int(*id))))
                .collect::<Vec<_>>()
                .join(", ");
            predicates.push(format!("rentals.id IN ({})", placeholders));
        }
        if let Some(near) = filter.near {
            let lat_idx = self.bind(BindValue::Float(near.lat));
            let lng_idx = self.bind(BindValue::Float(near.lng));
            predicates.push(format!("lat >= ${} AND lng >= ${}", lat_idx, lng_idx));
        }

        if !predicates.is_empty() {
            self.clauses
                .push(format!(" WHERE {}", predicates.join(" AND ")));
        }
    }

    fn push_sorting_clause(&mut self, filter: &RentalFilter) {
        match filter.sort.as_deref() {
            None | Some("") => {}
            Some("price") => self.clauses.push(" ORDER BY price_per_day".to_string()),
            Some(column) => self.clauses.push(format!(" ORDER BY {}", column)),
        }
    }

    fn push_final_clauses(&mut self, filter: &RentalFilter) {
        if let Some(limit) = filter.limit {
            let idx = self.bind(BindValue::Int(limit));
            self.clauses.push(format!(" LIMIT ${}", idx));
        }
        if let Some(offset) = filter.offset {
            let idx = self.bind(BindValue::Int(offset));
            self.clauses.push(format!(" OFFSET ${}", idx));
        }
    }
}

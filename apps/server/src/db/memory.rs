//! In-memory store for unit tests

use crate::{
    db::traits::{PoolStatus, RentalStore},
    models::RentalRow,
    Error, Result,
};
use async_trait::async_trait;
use rentals_query::{BindValue, Statement};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Serves a fixed set of rows and records every statement it receives.
///
/// `fetch_all` returns all rows regardless of the SQL; `fetch_one` returns
/// the row whose id matches the first integer bind.
#[derive(Default)]
pub struct RecordingStore {
    rows: Vec<RentalRow>,
    statements: Mutex<Vec<Statement>>,
    failing: AtomicBool,
}

impl RecordingStore {
    pub fn with_rows(rows: Vec<RentalRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// A store whose every call fails with a pool timeout.
    pub fn failing() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.statements
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(Error::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }

    fn record(&self, statement: &Statement) {
        if let Ok(mut statements) = self.statements.lock() {
            statements.push(statement.clone());
        }
    }
}

#[async_trait]
impl RentalStore for RecordingStore {
    async fn fetch_one(&self, statement: &Statement) -> Result<RentalRow> {
        self.record(statement);
        self.check()?;

        let id = statement.binds.iter().find_map(|b| match b {
            BindValue::Int(v) => Some(*v),
            BindValue::Float(_) => None,
        });

        self.rows
            .iter()
            .find(|row| Some(i64::from(row.id)) == id)
            .cloned()
            .ok_or_else(|| Error::NotFound("no rows in result set".to_string()))
    }

    async fn fetch_all(&self, statement: &Statement) -> Result<Vec<RentalRow>> {
        self.record(statement);
        self.check()?;
        Ok(self.rows.clone())
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }

    fn pool_status(&self) -> Option<PoolStatus> {
        Some(PoolStatus { size: 1, idle: 1 })
    }
}

//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database, a clock that only moves
//! when told to, and sessions wired to both.

use crate::{
    config::tracker::TrackerSettings,
    core::{
        catalog::Catalog,
        day::{Clock, DayKey},
        session::Session,
        store::MemoryStore,
    },
    errors::Result,
};
use chrono::{Days, NaiveDate};
use sea_orm::DatabaseConnection;
use std::sync::{Arc, Mutex};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all store tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Clock frozen on a date until advanced. Clones share the same date, so a
/// test can keep one handle and move time under a session that owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    date: Arc<Mutex<NaiveDate>>,
}

impl ManualClock {
    /// Clock set to the given date.
    ///
    /// # Panics
    /// Panics on an impossible date.
    #[allow(clippy::expect_used)]
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid test date");
        Self {
            date: Arc::new(Mutex::new(date)),
        }
    }

    /// Moves every clone forward by `days`.
    #[allow(clippy::unwrap_used)]
    pub fn advance_days(&self, days: u64) {
        let mut date = self.date.lock().unwrap();
        *date = date.checked_add_days(Days::new(days)).unwrap();
    }
}

impl Clock for ManualClock {
    #[allow(clippy::unwrap_used)]
    fn today(&self) -> DayKey {
        DayKey::new(*self.date.lock().unwrap())
    }

    fn time_label(&self) -> String {
        "12:00".to_string()
    }
}

/// Loads a session over a fresh [`MemoryStore`] with default settings and the
/// mess catalog.
pub async fn memory_session(clock: ManualClock) -> Session<MemoryStore, ManualClock> {
    Session::load(
        MemoryStore::new(),
        clock,
        TrackerSettings::default(),
        Arc::new(Catalog::mess()),
    )
    .await
}

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

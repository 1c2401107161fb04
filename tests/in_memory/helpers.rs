//! Shared test helpers for in-memory task store integration tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use focusboard::config::StoreConfig;
use focusboard::task::{adapters::memory::InMemoryStatePersistence, services::TaskStore};
use mockable::Clock;
use rstest::fixture;
use std::sync::Arc;

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Store type used across the in-memory suites.
pub type TestStore = TaskStore<FixedClock>;

/// Provides the instant every test treats as "now".
#[fixture]
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 8, 30, 0)
        .single()
        .expect("valid fixed instant")
}

/// Provides fresh in-memory persistence for each test.
#[fixture]
pub fn persistence() -> InMemoryStatePersistence {
    InMemoryStatePersistence::new()
}

/// Opens a store over `persistence` with the default configuration.
pub async fn open_store(persistence: &InMemoryStatePersistence, now: DateTime<Utc>) -> TestStore {
    TaskStore::open(
        Arc::new(persistence.clone()),
        Arc::new(FixedClock(now)),
        StoreConfig::default(),
    )
    .await
    .expect("store should open")
}

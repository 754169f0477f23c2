//! Persisted snapshot store.
//!
//! The tracker persists itself as a handful of named JSON documents. Storage
//! is last-write-wins with no atomicity across names; the session treats every
//! call here as best-effort and falls back to defaults when a blob is missing
//! or unreadable.

use crate::entities::{Snapshot, snapshot};
use crate::errors::{Error, Result};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Profile (`UserProfile`)
pub const USER: &str = "aahar_user";
/// Onboarding completed flag
pub const ONBOARDED: &str = "aahar_onboarded";
/// Meal log per slot
pub const MEALS: &str = "aahar_meals";
/// Water state
pub const WATER: &str = "aahar_water";
/// Dietary preferences
pub const PREFERENCES: &str = "aahar_preferences";
/// Per-day weight/water history
pub const DAILY_STATS: &str = "aahar_daily_stats";
/// Day key the accumulators belong to
pub const LAST_DATE: &str = "aahar_last_date";
/// Booking flags per slot
pub const BOOKED: &str = "aahar_booked";

/// Every snapshot the tracker writes.
pub const ALL_SNAPSHOTS: [&str; 8] = [
    USER,
    ONBOARDED,
    MEALS,
    WATER,
    PREFERENCES,
    DAILY_STATS,
    LAST_DATE,
    BOOKED,
];

/// Named-blob key/value persistence.
pub trait SnapshotStore: Send + Sync {
    /// Reads a blob, `None` if it was never written.
    fn load(&self, name: &str) -> impl Future<Output = Result<Option<Value>>> + Send;

    /// Writes a blob, replacing any previous value.
    fn save(&self, name: &str, value: &Value) -> impl Future<Output = Result<()>> + Send;

    /// Drops every blob owned by this store.
    fn clear_all(&self) -> impl Future<Output = Result<()>> + Send;
}

impl<T: SnapshotStore> SnapshotStore for Arc<T> {
    fn load(&self, name: &str) -> impl Future<Output = Result<Option<Value>>> + Send {
        (**self).load(name)
    }

    fn save(&self, name: &str, value: &Value) -> impl Future<Output = Result<()>> + Send {
        (**self).save(name, value)
    }

    fn clear_all(&self) -> impl Future<Output = Result<()>> + Send {
        (**self).clear_all()
    }
}

/// In-process store; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_blobs<T>(&self, f: impl FnOnce(&mut HashMap<String, Value>) -> T) -> Result<T> {
        let mut blobs = self.blobs.lock().map_err(|e| Error::Snapshot {
            name: "*".to_string(),
            message: format!("memory store lock poisoned: {e}"),
        })?;
        Ok(f(&mut blobs))
    }
}

impl SnapshotStore for MemoryStore {
    async fn load(&self, name: &str) -> Result<Option<Value>> {
        self.with_blobs(|blobs| blobs.get(name).cloned())
    }

    async fn save(&self, name: &str, value: &Value) -> Result<()> {
        self.with_blobs(|blobs| {
            blobs.insert(name.to_string(), value.clone());
        })
    }

    async fn clear_all(&self) -> Result<()> {
        self.with_blobs(HashMap::clear)
    }
}

/// SQLite-backed store scoped to one owner.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: DatabaseConnection,
    owner_id: String,
}

impl SqliteStore {
    /// Store for `owner_id`'s snapshots on `db`.
    #[must_use]
    pub fn new(db: DatabaseConnection, owner_id: impl Into<String>) -> Self {
        Self {
            db,
            owner_id: owner_id.into(),
        }
    }

    /// Owner this store reads and writes for.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    async fn find(&self, name: &str) -> Result<Option<snapshot::Model>> {
        Snapshot::find()
            .filter(snapshot::Column::OwnerId.eq(self.owner_id.as_str()))
            .filter(snapshot::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }
}

impl SnapshotStore for SqliteStore {
    async fn load(&self, name: &str) -> Result<Option<Value>> {
        let Some(row) = self.find(name).await? else {
            return Ok(None);
        };
        debug!("Loaded snapshot {} for {}", name, self.owner_id);

        serde_json::from_str(&row.value)
            .map(Some)
            .map_err(|e| Error::Snapshot {
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    async fn save(&self, name: &str, value: &Value) -> Result<()> {
        let text = value.to_string();
        let now = Utc::now().naive_utc();

        if let Some(row) = self.find(name).await? {
            let mut active_model: snapshot::ActiveModel = row.into();
            active_model.value = Set(text);
            active_model.updated_at = Set(now);
            active_model.update(&self.db).await?;
        } else {
            let new_row = snapshot::ActiveModel {
                owner_id: Set(self.owner_id.clone()),
                name: Set(name.to_string()),
                value: Set(text),
                updated_at: Set(now),
                ..Default::default()
            };
            new_row.insert(&self.db).await?;
        }

        debug!("Saved snapshot {} for {}", name, self.owner_id);
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        let result = Snapshot::delete_many()
            .filter(snapshot::Column::OwnerId.eq(self.owner_id.as_str()))
            .exec(&self.db)
            .await?;
        debug!(
            "Cleared {} snapshot(s) for {}",
            result.rows_affected, self.owner_id
        );
        Ok(())
    }
}

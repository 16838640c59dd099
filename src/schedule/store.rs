use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::models::DayRecord;
use crate::error::ScheduleResult;

/// Persistence boundary for weekly schedules
///
/// Owners are opaque ids assigned elsewhere (a brand or worker id). A save
/// replaces the owner's schedule in full; `None` from `get_schedule` means
/// the owner has never saved one.
#[async_trait]
pub trait ScheduleStore: Send + Sync + 'static {
    /// Fetch the persisted schedule for an owner
    async fn get_schedule(&self, owner: &str) -> ScheduleResult<Option<Vec<DayRecord>>>;

    /// Replace the persisted schedule for an owner in full
    async fn set_schedule(&self, owner: &str, days: &[DayRecord]) -> ScheduleResult<()>;

    /// Delete the persisted schedule for an owner
    async fn delete_schedule(&self, owner: &str) -> ScheduleResult<()>;

    /// List all owners with a persisted schedule
    async fn list_owners(&self) -> ScheduleResult<Vec<String>>;
}

/// In-memory implementation of the store (tests, local development)
#[derive(Debug, Default)]
pub struct InMemoryStore {
    schedules: RwLock<HashMap<String, Vec<DayRecord>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScheduleStore for InMemoryStore {
    async fn get_schedule(&self, owner: &str) -> ScheduleResult<Option<Vec<DayRecord>>> {
        let schedules = self.schedules.read().await;
        Ok(schedules.get(owner).cloned())
    }

    async fn set_schedule(&self, owner: &str, days: &[DayRecord]) -> ScheduleResult<()> {
        let mut schedules = self.schedules.write().await;
        schedules.insert(owner.to_string(), days.to_vec());
        Ok(())
    }

    async fn delete_schedule(&self, owner: &str) -> ScheduleResult<()> {
        let mut schedules = self.schedules.write().await;
        schedules.remove(owner);
        Ok(())
    }

    async fn list_owners(&self) -> ScheduleResult<Vec<String>> {
        let schedules = self.schedules.read().await;
        Ok(schedules.keys().cloned().collect())
    }
}

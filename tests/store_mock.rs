use async_trait::async_trait;
use aukiolo::config::Config;
use aukiolo::error::{store_error, Error, ScheduleResult};
use aukiolo::schedule::models::DayRecord;
use aukiolo::schedule::{ScheduleHandle, ScheduleStore};
use chrono::Weekday;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

/// Mock store that round-trips schedules through JSON like a real backend
/// and can be switched into a failing state
#[derive(Debug, Default)]
struct MockStore {
    data: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MockStore {
    fn new() -> Self {
        Self::default()
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> ScheduleResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(store_error("Schedule backend unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ScheduleStore for MockStore {
    async fn get_schedule(&self, owner: &str) -> ScheduleResult<Option<Vec<DayRecord>>> {
        self.check()?;
        let data = self.data.lock().await;
        match data.get(owner) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    async fn set_schedule(&self, owner: &str, days: &[DayRecord]) -> ScheduleResult<()> {
        self.check()?;
        let json = serde_json::to_string(days)?;
        let mut data = self.data.lock().await;
        data.insert(owner.to_string(), json);
        Ok(())
    }

    async fn delete_schedule(&self, owner: &str) -> ScheduleResult<()> {
        self.check()?;
        let mut data = self.data.lock().await;
        data.remove(owner);
        Ok(())
    }

    async fn list_owners(&self) -> ScheduleResult<Vec<String>> {
        self.check()?;
        let data = self.data.lock().await;
        Ok(data.keys().cloned().collect())
    }
}

fn new_handle() -> (ScheduleHandle, Arc<MockStore>) {
    let config = Arc::new(RwLock::new(Config::default()));
    let store = Arc::new(MockStore::new());
    let handle = ScheduleHandle::new(config, store.clone());
    (handle, store)
}

/// Schedules survive the JSON round trip a real backend would perform
#[tokio::test]
async fn test_mock_store_json_round_trip() {
    let (handle, _store) = new_handle();

    let mut editor = handle.open_editor("brand-1").await.unwrap();
    editor.toggle_day(Weekday::Mon);
    editor.add_break(Weekday::Mon).unwrap();
    handle.save_schedule("brand-1", editor.state()).await.unwrap();

    let reloaded = handle.load_schedule("brand-1").await.unwrap();
    let monday = reloaded.day(Weekday::Mon).unwrap();
    assert_eq!(monday.start_time, "09:00");
    assert_eq!(monday.breaks.len(), 1);
}

/// Store failures surface as store errors, distinct from validation errors
#[tokio::test]
async fn test_store_failures_propagate() {
    let (handle, store) = new_handle();

    store.set_failing(true);
    let result = handle.load_schedule("brand-1").await;
    assert!(matches!(result, Err(Error::Store(_))));

    // The store recovers and the same owner loads normally
    store.set_failing(false);
    assert!(handle.load_schedule("brand-1").await.unwrap().is_empty());
}

/// A failing save does not mask a validation failure: validation runs first
#[tokio::test]
async fn test_validation_runs_before_the_store() {
    let (handle, store) = new_handle();
    store.set_failing(true);

    let editor = handle.open_editor("brand-1").await;
    // Loading hits the store, so opening the editor fails while the backend
    // is down
    assert!(editor.is_err());

    let empty = aukiolo::schedule::WeeklyAvailability::default();
    let result = handle.save_schedule("brand-1", &empty).await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

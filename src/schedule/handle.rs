use super::actor::{ScheduleActor, ScheduleActorHandle};
use super::editor::ScheduleEditor;
use super::models::WeeklyAvailability;
use super::store::ScheduleStore;
use crate::config::Config;
use crate::error::ScheduleResult;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Handle for interacting with the Schedule actor
///
/// Both presentation surfaces (the full-screen editor and the bottom-sheet
/// editor) go through this one handle, so defaults and normalization rules
/// cannot drift between them.
#[derive(Clone)]
pub struct ScheduleHandle {
    actor_handle: ScheduleActorHandle,
    config: Arc<RwLock<Config>>,
    _actor_task: Arc<JoinHandle<()>>,
}

impl ScheduleHandle {
    /// Create a new ScheduleHandle and spawn the actor
    pub fn new(config: Arc<RwLock<Config>>, store: Arc<dyn ScheduleStore>) -> Self {
        // Create the actor and get its handle
        let (mut actor, handle) = ScheduleActor::new(Arc::clone(&config), store);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            config,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Load an owner's schedule, normalized for display
    pub async fn load_schedule(
        &self,
        owner: impl Into<String>,
    ) -> ScheduleResult<WeeklyAvailability> {
        self.actor_handle.load_schedule(owner).await
    }

    /// Load an owner's schedule wrapped in an editor seeded with the
    /// configured defaults
    pub async fn open_editor(&self, owner: impl Into<String>) -> ScheduleResult<ScheduleEditor> {
        let state = self.actor_handle.load_schedule(owner).await?;
        let defaults = self.config.read().await.defaults.clone();
        Ok(ScheduleEditor::new(state, defaults))
    }

    /// Validate and persist a schedule, returning the normalized form
    pub async fn save_schedule(
        &self,
        owner: impl Into<String>,
        state: &WeeklyAvailability,
    ) -> ScheduleResult<WeeklyAvailability> {
        self.actor_handle.save_schedule(owner, state.clone()).await
    }

    /// Delete an owner's persisted schedule
    pub async fn delete_schedule(&self, owner: impl Into<String>) -> ScheduleResult<()> {
        self.actor_handle.delete_schedule(owner).await
    }

    /// List all owners with a persisted schedule
    pub async fn list_owners(&self) -> ScheduleResult<Vec<String>> {
        self.actor_handle.list_owners().await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> ScheduleResult<()> {
        self.actor_handle.shutdown().await
    }
}

use crate::config::Config;
use crate::error::{schedule_error, ScheduleResult};
use crate::schedule::editor::ScheduleEditor;
use crate::schedule::models::WeeklyAvailability;
use crate::schedule::store::ScheduleStore;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn};

/// The Schedule actor that processes messages
pub struct ScheduleActor {
    config: Arc<RwLock<Config>>,
    store: Arc<dyn ScheduleStore>,
    command_rx: mpsc::Receiver<ScheduleCommand>,
}

/// Commands that can be sent to the Schedule actor
pub enum ScheduleCommand {
    LoadSchedule(String, mpsc::Sender<ScheduleResult<WeeklyAvailability>>),
    SaveSchedule(
        String,
        WeeklyAvailability,
        mpsc::Sender<ScheduleResult<WeeklyAvailability>>,
    ),
    DeleteSchedule(String, mpsc::Sender<ScheduleResult<()>>),
    ListOwners(mpsc::Sender<ScheduleResult<Vec<String>>>),
    Shutdown,
}

/// Handle for communicating with the Schedule actor
#[derive(Clone)]
pub struct ScheduleActorHandle {
    command_tx: mpsc::Sender<ScheduleCommand>,
}

impl ScheduleActorHandle {
    /// Load the persisted schedule for an owner, normalized
    pub async fn load_schedule(
        &self,
        owner: impl Into<String>,
    ) -> ScheduleResult<WeeklyAvailability> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(ScheduleCommand::LoadSchedule(owner.into(), response_tx))
            .await
            .map_err(|e| schedule_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| schedule_error("Response channel closed"))?
    }

    /// Validate and persist a schedule for an owner
    pub async fn save_schedule(
        &self,
        owner: impl Into<String>,
        state: WeeklyAvailability,
    ) -> ScheduleResult<WeeklyAvailability> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(ScheduleCommand::SaveSchedule(
                owner.into(),
                state,
                response_tx,
            ))
            .await
            .map_err(|e| schedule_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| schedule_error("Response channel closed"))?
    }

    /// Delete the persisted schedule for an owner
    pub async fn delete_schedule(&self, owner: impl Into<String>) -> ScheduleResult<()> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(ScheduleCommand::DeleteSchedule(owner.into(), response_tx))
            .await
            .map_err(|e| schedule_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| schedule_error("Response channel closed"))?
    }

    /// List all owners with a persisted schedule
    pub async fn list_owners(&self) -> ScheduleResult<Vec<String>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(ScheduleCommand::ListOwners(response_tx))
            .await
            .map_err(|e| schedule_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| schedule_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> ScheduleResult<()> {
        let _ = self.command_tx.send(ScheduleCommand::Shutdown).await;
        Ok(())
    }
}

impl ScheduleActor {
    /// Create a new actor and return its handle
    pub fn new(
        config: Arc<RwLock<Config>>,
        store: Arc<dyn ScheduleStore>,
    ) -> (Self, ScheduleActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config,
            store,
            command_rx,
        };

        let handle = ScheduleActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Schedule actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                ScheduleCommand::LoadSchedule(owner, response_tx) => {
                    let result = self.load_schedule(&owner).await;
                    let _ = response_tx.send(result).await;
                }
                ScheduleCommand::SaveSchedule(owner, state, response_tx) => {
                    let result = self.save_schedule(&owner, state).await;
                    let _ = response_tx.send(result).await;
                }
                ScheduleCommand::DeleteSchedule(owner, response_tx) => {
                    let result = self.store.delete_schedule(&owner).await;
                    let _ = response_tx.send(result).await;
                }
                ScheduleCommand::ListOwners(response_tx) => {
                    let result = self.store.list_owners().await;
                    let _ = response_tx.send(result).await;
                }
                ScheduleCommand::Shutdown => {
                    info!("Schedule actor shutting down");
                    break;
                }
            }
        }

        info!("Schedule actor shut down");
    }

    /// Fetch an owner's schedule and normalize it for editing
    ///
    /// A missing schedule means the owner has never activated a day and
    /// loads as an empty availability.
    async fn load_schedule(&self, owner: &str) -> ScheduleResult<WeeklyAvailability> {
        let records = self.store.get_schedule(owner).await?.unwrap_or_default();
        let defaults = self.config.read().await.defaults.clone();
        Ok(WeeklyAvailability::from_records(&records, &defaults))
    }

    /// Run save-time validation and persist the normalized schedule in full
    async fn save_schedule(
        &self,
        owner: &str,
        state: WeeklyAvailability,
    ) -> ScheduleResult<WeeklyAvailability> {
        let defaults = self.config.read().await.defaults.clone();
        let editor = ScheduleEditor::new(state, defaults);

        let normalized = match editor.normalize_for_save() {
            Ok(normalized) => normalized,
            Err(e) => {
                warn!("Rejecting schedule save for {}: {}", owner, e);
                return Err(e.into());
            }
        };

        self.store
            .set_schedule(owner, &normalized.to_records())
            .await?;

        info!(
            "Saved schedule for {} with {} active days",
            owner,
            normalized.days().len()
        );

        Ok(normalized)
    }
}

//! The feed actor: sole owner of the notification list.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use bedside_core::config::FeedConfig;
use bedside_core::error::AppError;
use bedside_core::traits::alert::{AlertLevel, AlertSink};
use bedside_entity::notification::FeedSnapshot;
use bedside_entity::source::{EventSource, PatientDirectory};

use super::command::FeedCommand;
use super::loader;
use super::state::{FeedState, LoadOutcome};

/// Applies commands to the feed state one at a time and publishes a
/// snapshot after every change.
pub struct FeedActor {
    pub(crate) state: FeedState,
    pub(crate) config: Arc<FeedConfig>,
    pub(crate) events: Arc<dyn EventSource>,
    pub(crate) directory: Arc<dyn PatientDirectory>,
    pub(crate) alerts: Arc<dyn AlertSink>,
    pub(crate) commands: mpsc::Receiver<FeedCommand>,
    /// Handed to load tasks so they can report back.
    pub(crate) loopback: mpsc::Sender<FeedCommand>,
    pub(crate) snapshots: watch::Sender<FeedSnapshot>,
    pub(crate) cancel: CancellationToken,
}

impl FeedActor {
    /// Run until cancelled or every sender is gone.
    ///
    /// `initial_load` is the generation of a load already marked in
    /// flight on the state, if any.
    pub async fn run(mut self, initial_load: Option<u64>) {
        if let Some(generation) = initial_load {
            self.spawn_load(generation);
        }

        loop {
            let command = tokio::select! {
                _ = self.cancel.cancelled() => break,
                command = self.commands.recv() => command,
            };

            match command {
                Some(command) => self.handle(command),
                None => break,
            }
        }

        info!("Notification feed stopped");
    }

    fn handle(&mut self, command: FeedCommand) {
        match command {
            FeedCommand::Pushed(notification) => {
                let id = notification.id.clone();
                if self.state.push(notification) {
                    self.publish();
                } else {
                    debug!(notification_id = %id, "Duplicate notification ignored");
                }
            }
            FeedCommand::LoadFinished { generation, result } => {
                match self.state.finish_load(generation, result) {
                    LoadOutcome::Stale => {
                        debug!(generation, "Discarding stale load result");
                    }
                    LoadOutcome::Applied | LoadOutcome::Failed => self.publish(),
                }
            }
            FeedCommand::Refresh => {
                let generation = self.state.begin_load();
                self.publish();
                self.spawn_load(generation);
            }
            FeedCommand::MarkAsRead { id, reply } => {
                let changed = self.state.mark_read(&id);
                if changed {
                    self.publish();
                }
                let _ = reply.send(changed);
            }
            FeedCommand::MarkAllAsRead { reply } => {
                let changed = self.state.mark_all_read();
                self.publish();
                let _ = reply.send(changed);
            }
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.snapshot());
    }

    /// Run a load off the actor so pushes keep flowing while it is in flight.
    fn spawn_load(&self, generation: u64) {
        let events = self.events.clone();
        let directory = self.directory.clone();
        let config = self.config.clone();
        let alerts = self.alerts.clone();
        let loopback = self.loopback.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            // Run the load in its own task so a panic surfaces as a join
            // error; `loading` must clear whatever happens.
            let load = tokio::spawn(async move {
                loader::load_notifications(&events, &directory, &config).await
            });
            let abort = load.abort_handle();

            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    abort.abort();
                    return;
                }
                joined = load => joined.unwrap_or_else(|e| {
                    Err(AppError::internal(format!("Load task crashed: {e}")))
                }),
            };

            if let Err(e) = &result {
                error!(generation, error = %e, "Failed to load notifications");
                alerts
                    .alert(AlertLevel::Error, &format!("Falha ao carregar notificações: {e}"))
                    .await;
            }

            // The actor may already be gone; the result is then dropped.
            let _ = loopback
                .send(FeedCommand::LoadFinished { generation, result })
                .await;
        });
    }
}

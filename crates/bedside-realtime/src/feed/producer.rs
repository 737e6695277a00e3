//! Subscription producer: realtime inserts into the feed's channel.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use bedside_core::types::id::PatientId;
use bedside_entity::source::{EventSubscription, PatientDirectory};

use crate::notification::formatter::NotificationFormatter;

use super::command::FeedCommand;

/// Forward every event of `subscription` to the actor, in order.
///
/// Names are resolved one event at a time; a failed or empty lookup uses
/// `placeholder_name` and the notification is still delivered. Ends when
/// the subscription ends, the actor is gone, or `cancel` fires, and
/// releases the subscription on the way out.
pub async fn run_producer(
    mut subscription: EventSubscription,
    directory: Arc<dyn PatientDirectory>,
    placeholder_name: String,
    commands: mpsc::Sender<FeedCommand>,
    cancel: CancellationToken,
) {
    loop {
        let next = tokio::select! {
            _ = cancel.cancelled() => break,
            next = subscription.next() => next,
        };

        let event = match next {
            Some(Ok(event)) => event,
            Some(Err(e)) => {
                warn!(error = %e, "Skipping undeliverable care event");
                continue;
            }
            None => {
                info!("Care event subscription ended");
                break;
            }
        };

        let name = tokio::select! {
            _ = cancel.cancelled() => break,
            name = resolve_name(&directory, event.patient_id, &placeholder_name) => name,
        };

        debug!(event_id = %event.id, event_type = %event.event_type, "Care event pushed");
        let notification = NotificationFormatter::care_record(&event, name);
        if commands.send(FeedCommand::Pushed(notification)).await.is_err() {
            break;
        }
    }

    subscription.unsubscribe();
}

async fn resolve_name(
    directory: &Arc<dyn PatientDirectory>,
    patient_id: PatientId,
    placeholder_name: &str,
) -> String {
    match directory.lookup_one(patient_id).await {
        Ok(Some(patient)) => patient.full_name,
        Ok(None) => {
            debug!(patient_id = %patient_id, "Pushed event references unknown patient");
            placeholder_name.to_string()
        }
        Err(e) => {
            warn!(patient_id = %patient_id, error = %e, "Patient lookup failed, using placeholder");
            placeholder_name.to_string()
        }
    }
}

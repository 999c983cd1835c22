use crate::error::{NormalizeError, Result, WebhookError};
use crate::normalize::normalize;
use chrono::{DateTime, Utc};
use hookfeed_store::{Event, EventStore};
use serde_json::Value;
use tracing::{error, info, warn};

/// Outcome of a webhook delivery that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingested {
    Stored(Event),
    /// The event type is not recorded. Nothing was written.
    Ignored { event_type: String },
}

/// Parses, normalizes and appends one webhook delivery.
///
/// The store is written exactly once when an event is produced and never
/// otherwise.
pub async fn ingest(
    store: &dyn EventStore,
    event_type: &str,
    body: &[u8],
    received_at: DateTime<Utc>,
) -> Result<Ingested> {
    let payload: Value = serde_json::from_slice(body).inspect_err(|e| {
        warn!("Rejecting {} webhook with invalid JSON: {}", event_type, e);
    })?;

    let event = match normalize(event_type, &payload, received_at) {
        Ok(event) => event,
        Err(NormalizeError::UnsupportedEvent(event_type)) => {
            info!("Ignoring unsupported event type: {:?}", event_type);
            return Ok(Ingested::Ignored { event_type });
        }
        Err(NormalizeError::BranchDeleted(branch)) => {
            info!("Ignoring push that deleted branch {}", branch);
            return Ok(Ingested::Ignored {
                event_type: "push".to_string(),
            });
        }
        Err(e) => {
            warn!("Rejecting webhook: {}", e);
            return Err(WebhookError::MalformedPayload(e));
        }
    };

    store.append(&event).await.inspect_err(|e| {
        error!(
            "Failed to store {} event {}: {}",
            event.action, event.request_id, e
        );
    })?;

    info!(
        "Stored {} event {} by {} ({} -> {})",
        event.action, event.request_id, event.author, event.from_branch, event.to_branch
    );

    Ok(Ingested::Stored(event))
}

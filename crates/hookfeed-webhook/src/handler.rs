use crate::WebhookConfig;
use crate::error::Result;
use crate::ingest::{Ingested, ingest};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub const GITHUB_EVENT_HEADER: &str = "X-GitHub-Event";

pub async fn handle_github_webhook(
    State(config): State<Arc<WebhookConfig>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    // A missing or unreadable header is just another unsupported event type
    let event_type = headers
        .get(GITHUB_EVENT_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    info!(
        "Received GitHub webhook: event type {:?}, {} bytes",
        event_type,
        body.len()
    );

    let response = match ingest(config.store.as_ref(), event_type, &body, Utc::now()).await? {
        Ingested::Stored(event) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Event stored successfully",
                "event": event,
            })),
        )
            .into_response(),
        Ingested::Ignored { event_type } => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Event type not supported or ignored",
                "event_type": event_type,
            })),
        )
            .into_response(),
    };

    Ok(response)
}

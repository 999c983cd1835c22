use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Why a webhook payload could not be turned into an event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// Not one of the event types we record. Acknowledged, never stored.
    #[error("unsupported event type: {0:?}")]
    UnsupportedEvent(String),

    /// A push that deleted a branch. Acknowledged, never stored.
    #[error("branch {0:?} was deleted")]
    BranchDeleted(String),

    #[error("malformed {event_type} payload: {detail}")]
    MalformedPayload {
        event_type: &'static str,
        detail: String,
    },
}

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("{0}")]
    MalformedPayload(NormalizeError),

    #[error("event store unavailable: {0}")]
    StoreUnavailable(#[from] hookfeed_store::StoreError),
}

pub type Result<T> = std::result::Result<T, WebhookError>;

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            WebhookError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            WebhookError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

mod error;
mod handler;
mod ingest;
mod normalize;
mod payload;

pub use error::{NormalizeError, Result, WebhookError};
pub use handler::GITHUB_EVENT_HEADER;
pub use ingest::{Ingested, ingest};
pub use normalize::{EventKind, branch_name, normalize};

use axum::{Router, extract::DefaultBodyLimit, routing::post};
use hookfeed_store::EventStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct WebhookConfig {
    pub store: Arc<dyn EventStore>,
    pub max_body_bytes: usize,
}

pub fn router(config: WebhookConfig) -> Router {
    let body_limit = DefaultBodyLimit::max(config.max_body_bytes);

    Router::new()
        .route("/webhook/github", post(handler::handle_github_webhook))
        .layer(body_limit)
        .with_state(Arc::new(config))
}

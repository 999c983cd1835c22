use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid query parameter '{name}': {detail}")]
    InvalidQueryParameter { name: &'static str, detail: String },

    #[error("event store unavailable: {0}")]
    StoreUnavailable(#[from] hookfeed_store::StoreError),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidQueryParameter { .. } => StatusCode::BAD_REQUEST,
            ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

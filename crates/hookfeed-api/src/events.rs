use crate::error::{ApiError, Result};
use axum::{
    Json,
    extract::{Query, State},
};
use hookfeed_store::{Event, EventStore, timestamp};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error};
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PollParams {
    /// Only events strictly newer than this RFC 3339 timestamp are returned.
    /// Pass the timestamp of the last event received.
    pub since: Option<String>,
}

#[utoipa::path(
    get,
    path = "/webhook/events",
    params(PollParams),
    responses(
        (status = OK, description = "Events newer than the cursor, oldest first", body = [Event]),
        (status = BAD_REQUEST, description = "The since cursor is not an RFC 3339 timestamp"),
        (status = SERVICE_UNAVAILABLE, description = "The event store could not be queried"),
    )
)]
pub async fn poll_events(
    State(store): State<Arc<dyn EventStore>>,
    Query(params): Query<PollParams>,
) -> Result<Json<Vec<Event>>> {
    let events = poll_since(store.as_ref(), params.since.as_deref()).await?;
    Ok(Json(events))
}

/// Events after the cursor in ascending timestamp order.
///
/// A missing or blank cursor returns the whole history. The boundary is
/// strict: an event whose timestamp equals the cursor is never returned, so
/// feeding back the last timestamp received never yields a duplicate. Events
/// that share that exact timestamp but were appended after the previous poll
/// are not returned either.
pub async fn poll_since(store: &dyn EventStore, since: Option<&str>) -> Result<Vec<Event>> {
    let cursor = match since.map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(timestamp::parse(raw).map_err(|e| {
            ApiError::InvalidQueryParameter {
                name: "since",
                detail: format!("{raw:?} is not an RFC 3339 timestamp ({e})"),
            }
        })?),
    };

    let events = store.query_after(cursor).await.inspect_err(|e| {
        error!("Failed to query events: {}", e);
    })?;

    debug!(
        "Poll since {:?} returned {} events",
        cursor.map(|c| timestamp::format(&c)),
        events.len()
    );

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};
    use chrono::{TimeZone, Utc};
    use entity::sea_orm_active_enums::EventAction;
    use hookfeed_store::MemoryStore;

    fn event_at(request_id: &str, minute: u32) -> Event {
        Event {
            request_id: request_id.to_string(),
            author: "travis".to_string(),
            action: EventAction::PullRequest,
            from_branch: "dev".to_string(),
            to_branch: "master".to_string(),
            timestamp: Utc.with_ymd_and_hms(2021, 4, 1, 21, minute, 0).unwrap(),
        }
    }

    async fn store_with(events: &[Event]) -> MemoryStore {
        let store = MemoryStore::new();
        for event in events {
            store.append(event).await.unwrap();
        }
        store
    }

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.request_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_poll_without_cursor_returns_everything_ascending() {
        let store = store_with(&[event_at("2", 20), event_at("1", 10), event_at("3", 30)]).await;

        let all = poll_since(&store, None).await.unwrap();
        let blank = poll_since(&store, Some("  ")).await.unwrap();

        assert_eq!(ids(&all), vec!["1", "2", "3"]);
        assert_eq!(all, blank);
    }

    #[tokio::test]
    async fn test_poll_boundary_is_strict() {
        let store = store_with(&[event_at("1", 10), event_at("2", 20)]).await;

        let events = poll_since(&store, Some("2021-04-01T21:10:00Z")).await.unwrap();

        assert_eq!(ids(&events), vec!["2"]);
    }

    #[tokio::test]
    async fn test_poll_cursor_with_offset_is_converted() {
        let store = store_with(&[event_at("1", 10), event_at("2", 20)]).await;

        // 21:15 UTC
        let events = poll_since(&store, Some("2021-04-02T02:45:00+05:30")).await.unwrap();

        assert_eq!(ids(&events), vec!["2"]);
    }

    #[tokio::test]
    async fn test_successive_polls_are_disjoint_and_complete() {
        let store = store_with(&[event_at("1", 10), event_at("2", 20)]).await;

        let first = poll_since(&store, None).await.unwrap();
        let cursor = timestamp::format(&first.last().unwrap().timestamp);

        store.append(&event_at("3", 30)).await.unwrap();
        store.append(&event_at("4", 40)).await.unwrap();

        let second = poll_since(&store, Some(cursor.as_str())).await.unwrap();
        assert_eq!(ids(&second), vec!["3", "4"]);

        let again = poll_since(&store, Some(cursor.as_str())).await.unwrap();
        assert_eq!(second, again);
    }

    #[tokio::test]
    async fn test_poll_rejects_unparsable_cursor() {
        let store = MemoryStore::new();

        for bad in ["not-a-date", "2021-04-01T21:10:00", "2021-13-01T00:00:00Z"] {
            let result = poll_since(&store, Some(bad)).await;
            assert!(
                matches!(result, Err(ApiError::InvalidQueryParameter { name: "since", .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_poll_handler_bad_cursor_is_bad_request() {
        let store: Arc<dyn EventStore> = Arc::new(MemoryStore::new());
        let params = PollParams {
            since: Some("not-a-date".to_string()),
        };

        let response = poll_events(State(store), Query(params)).await.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_poll_handler_returns_json_array() {
        let store: Arc<dyn EventStore> = Arc::new(store_with(&[event_at("1", 10)]).await);

        let response = poll_events(State(store), Query(PollParams::default()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json[0]["timestamp"], "2021-04-01T21:10:00Z");
        assert_eq!(json[0]["action"], "PULL_REQUEST");
    }
}

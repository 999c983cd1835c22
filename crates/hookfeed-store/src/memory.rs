use crate::{Event, EventStore, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Process-local event log. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: RwLock<Vec<Event>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn append(&self, event: &Event) -> Result<()> {
        self.events.write().await.push(event.clone());
        Ok(())
    }

    async fn query_after(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .events
            .read()
            .await
            .iter()
            .filter(|event| since.is_none_or(|since| event.timestamp > since))
            .cloned()
            .collect();

        // Stable, so equal timestamps stay in insertion order
        events.sort_by_key(|event| event.timestamp);

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use entity::sea_orm_active_enums::EventAction;

    fn event_at(request_id: &str, second: u32) -> Event {
        Event {
            request_id: request_id.to_string(),
            author: "alice".to_string(),
            action: EventAction::Push,
            from_branch: "main".to_string(),
            to_branch: "main".to_string(),
            timestamp: Utc.with_ymd_and_hms(2021, 4, 1, 21, 30, second).unwrap(),
        }
    }

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.request_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_query_all_sorted_ascending() {
        let store = MemoryStore::new();
        store.append(&event_at("c", 30)).await.unwrap();
        store.append(&event_at("a", 10)).await.unwrap();
        store.append(&event_at("b", 20)).await.unwrap();

        let events = store.query_after(None).await.unwrap();
        assert_eq!(ids(&events), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_query_after_is_strict() {
        let store = MemoryStore::new();
        store.append(&event_at("a", 10)).await.unwrap();
        store.append(&event_at("b", 20)).await.unwrap();

        let since = Utc.with_ymd_and_hms(2021, 4, 1, 21, 30, 10).unwrap();
        let events = store.query_after(Some(since)).await.unwrap();
        assert_eq!(ids(&events), vec!["b"]);
    }

    #[tokio::test]
    async fn test_ties_keep_insertion_order() {
        let store = MemoryStore::new();
        store.append(&event_at("second", 20)).await.unwrap();
        store.append(&event_at("first", 10)).await.unwrap();
        store.append(&event_at("third", 20)).await.unwrap();

        let events = store.query_after(None).await.unwrap();
        assert_eq!(ids(&events), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_len_tracks_appends() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);
        store.append(&event_at("a", 10)).await.unwrap();
        assert_eq!(store.len().await, 1);
    }
}

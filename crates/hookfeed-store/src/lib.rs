pub mod error;
pub mod event;
pub mod events;
pub mod memory;
pub mod timestamp;

pub use error::{Result, StoreError};
pub use event::Event;
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

/// Append-only event log consumed by ingestion and polling.
///
/// Implementations must make a successful `append` visible to every later
/// `query_after`, and must return events ordered by timestamp ascending with
/// ties kept in insertion order.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn append(&self, event: &Event) -> Result<()>;

    /// Events strictly newer than `since`, or the whole log when `since` is `None`.
    async fn query_after(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Event>>;
}

pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn events(&self) -> events::EventRepository<'_> {
        events::EventRepository::new(&self.db)
    }
}

#[async_trait]
impl EventStore for Store {
    async fn append(&self, event: &Event) -> Result<()> {
        self.events().create(event.to_active_model()).await?;
        Ok(())
    }

    async fn query_after(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Event>> {
        let rows = self.events().list_after(since).await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }
}

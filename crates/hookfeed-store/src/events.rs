use ::entity::{events, prelude::*};
use chrono::{DateTime, Utc};
use sea_orm::*;

pub struct EventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, event: events::ActiveModel) -> Result<events::Model, DbErr> {
        event.insert(self.db).await
    }

    /// Ascending by timestamp; the serial id breaks ties in insertion order.
    pub async fn list_after(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<events::Model>, DbErr> {
        let mut query = Events::find();

        if let Some(since) = since {
            query = query.filter(events::Column::Timestamp.gt(since));
        }

        query
            .order_by_asc(events::Column::Timestamp)
            .order_by_asc(events::Column::Id)
            .all(self.db)
            .await
    }
}

use ::entity::{events, sea_orm_active_enums::EventAction};
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One normalized GitHub activity, as stored and as served to pollers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Head commit SHA for pushes, pull request number otherwise.
    pub request_id: String,
    pub author: String,
    pub action: EventAction,
    pub from_branch: String,
    pub to_branch: String,
    #[serde(with = "crate::timestamp::serde_utc")]
    #[schema(value_type = String, format = DateTime, example = "2021-04-01T21:30:00Z")]
    pub timestamp: DateTime<Utc>,
}

impl Event {
    pub fn to_active_model(&self) -> events::ActiveModel {
        events::ActiveModel {
            request_id: Set(self.request_id.clone()),
            author: Set(self.author.clone()),
            action: Set(self.action),
            from_branch: Set(self.from_branch.clone()),
            to_branch: Set(self.to_branch.clone()),
            timestamp: Set(self.timestamp),
            ..Default::default()
        }
    }
}

impl From<events::Model> for Event {
    fn from(model: events::Model) -> Self {
        Self {
            request_id: model.request_id,
            author: model.author,
            action: model.action,
            from_branch: model.from_branch,
            to_branch: model.to_branch,
            timestamp: model.timestamp,
        }
    }
}

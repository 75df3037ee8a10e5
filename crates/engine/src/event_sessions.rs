//! Event sessions: the bookable occurrences of an event.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Scheduled,
    Cancelled,
    Completed,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for SessionStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "scheduled" => Ok(Self::Scheduled),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(EngineError::Validation(format!(
                "invalid session status: {other}"
            ))),
        }
    }
}

/// A bookable occurrence of an event.
///
/// Bookings reference sessions by id and snapshot the event name/date at
/// booking time; the snapshot is never resynced if the session changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventSession {
    pub id: Uuid,
    pub event_id: Uuid,
    pub date: NaiveDate,
    pub time: String,
    pub location: Option<String>,
    pub price: Money,
    pub capacity: u32,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
}

impl EventSession {
    pub fn new(event_id: Uuid, date: NaiveDate, time: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            date,
            time,
            location: None,
            price: Money::ZERO,
            capacity: 0,
            status: SessionStatus::Scheduled,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "event_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub event_id: String,
    pub date: Date,
    pub time: String,
    pub location: Option<String>,
    pub price_minor: i64,
    pub capacity: i32,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id"
    )]
    Events,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&EventSession> for ActiveModel {
    fn from(session: &EventSession) -> Self {
        Self {
            id: ActiveValue::Set(session.id.to_string()),
            event_id: ActiveValue::Set(session.event_id.to_string()),
            date: ActiveValue::Set(session.date),
            time: ActiveValue::Set(session.time.clone()),
            location: ActiveValue::Set(session.location.clone()),
            price_minor: ActiveValue::Set(session.price.minor()),
            capacity: ActiveValue::Set(session.capacity as i32),
            status: ActiveValue::Set(session.status.as_str().to_string()),
            created_at: ActiveValue::Set(session.created_at),
        }
    }
}

impl TryFrom<Model> for EventSession {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("session".to_string()))?,
            event_id: Uuid::parse_str(&model.event_id)
                .map_err(|_| EngineError::KeyNotFound("event".to_string()))?,
            date: model.date,
            time: model.time,
            location: model.location,
            price: Money::new(model.price_minor),
            capacity: u32::try_from(model.capacity).unwrap_or_default(),
            status: SessionStatus::try_from(model.status.as_str())?,
            created_at: model.created_at,
        })
    }
}

//! Event templates: the catalog entries sessions are scheduled from.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventStatus {
    #[default]
    Active,
    Inactive,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl TryFrom<&str> for EventStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(EngineError::Validation(format!(
                "invalid event status: {other}"
            ))),
        }
    }
}

/// An event template. Bookable occurrences are [`EventSession`]s.
///
/// [`EventSession`]: super::event_sessions::EventSession
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub default_price: Money,
    pub default_location: Option<String>,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description: None,
            category: None,
            default_price: Money::ZERO,
            default_location: None,
            status: EventStatus::Active,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub default_price_minor: i64,
    pub default_location: Option<String>,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_sessions::Entity")]
    EventSessions,
}

impl Related<super::event_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventSessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Event> for ActiveModel {
    fn from(event: &Event) -> Self {
        Self {
            id: ActiveValue::Set(event.id.to_string()),
            title: ActiveValue::Set(event.title.clone()),
            description: ActiveValue::Set(event.description.clone()),
            category: ActiveValue::Set(event.category.clone()),
            default_price_minor: ActiveValue::Set(event.default_price.minor()),
            default_location: ActiveValue::Set(event.default_location.clone()),
            status: ActiveValue::Set(event.status.as_str().to_string()),
            created_at: ActiveValue::Set(event.created_at),
        }
    }
}

impl TryFrom<Model> for Event {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("event".to_string()))?,
            title: model.title,
            description: model.description,
            category: model.category,
            default_price: Money::new(model.default_price_minor),
            default_location: model.default_location,
            status: EventStatus::try_from(model.status.as_str())?,
            created_at: model.created_at,
        })
    }
}

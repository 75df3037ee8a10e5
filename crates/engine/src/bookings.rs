//! Booking records.
//!
//! A booking snapshots `event_name`/`event_date` from its session at creation
//! time. The snapshot is intentionally historical: later edits to the session
//! never flow back into existing bookings.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for BookingStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(EngineError::Validation(format!(
                "invalid booking status: {other}"
            ))),
        }
    }
}

/// A booking.
///
/// `total_price = ojasen_fee + facilitator_fee` by convention; the split is
/// recorded as posted and not separately enforced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub session_id: Uuid,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub number_of_people: u32,
    pub total_price: Money,
    pub ojasen_fee: Money,
    pub facilitator_fee: Money,
    pub facilitator_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub session_id: String,
    pub event_name: String,
    pub event_date: Date,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub number_of_people: i32,
    pub total_price_minor: i64,
    pub ojasen_fee_minor: i64,
    pub facilitator_fee_minor: i64,
    pub facilitator_id: Option<String>,
    pub user_id: Option<String>,
    pub status: String,
    pub special_requests: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Booking> for ActiveModel {
    fn from(booking: &Booking) -> Self {
        Self {
            id: ActiveValue::Set(booking.id.to_string()),
            session_id: ActiveValue::Set(booking.session_id.to_string()),
            event_name: ActiveValue::Set(booking.event_name.clone()),
            event_date: ActiveValue::Set(booking.event_date),
            customer_name: ActiveValue::Set(booking.customer_name.clone()),
            customer_email: ActiveValue::Set(booking.customer_email.clone()),
            customer_phone: ActiveValue::Set(booking.customer_phone.clone()),
            number_of_people: ActiveValue::Set(booking.number_of_people as i32),
            total_price_minor: ActiveValue::Set(booking.total_price.minor()),
            ojasen_fee_minor: ActiveValue::Set(booking.ojasen_fee.minor()),
            facilitator_fee_minor: ActiveValue::Set(booking.facilitator_fee.minor()),
            facilitator_id: ActiveValue::Set(booking.facilitator_id.map(|id| id.to_string())),
            user_id: ActiveValue::Set(booking.user_id.map(|id| id.to_string())),
            status: ActiveValue::Set(booking.status.as_str().to_string()),
            special_requests: ActiveValue::Set(booking.special_requests.clone()),
            created_at: ActiveValue::Set(booking.created_at),
        }
    }
}

impl TryFrom<Model> for Booking {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("booking".to_string()))?,
            session_id: Uuid::parse_str(&model.session_id)
                .map_err(|_| EngineError::KeyNotFound("session".to_string()))?,
            event_name: model.event_name,
            event_date: model.event_date,
            customer_name: model.customer_name,
            customer_email: model.customer_email,
            customer_phone: model.customer_phone,
            number_of_people: u32::try_from(model.number_of_people).unwrap_or_default(),
            total_price: Money::new(model.total_price_minor),
            ojasen_fee: Money::new(model.ojasen_fee_minor),
            facilitator_fee: Money::new(model.facilitator_fee_minor),
            facilitator_id: model.facilitator_id.and_then(|s| Uuid::parse_str(&s).ok()),
            user_id: model.user_id.and_then(|s| Uuid::parse_str(&s).ok()),
            status: BookingStatus::try_from(model.status.as_str())?,
            special_requests: model.special_requests,
            created_at: model.created_at,
        })
    }
}

//! Booking operations.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Booking, BookingPatch, BookingStatus, EngineError, Money, NewBooking, ResultEngine, bookings,
    event_sessions, events,
};

use super::{Engine, is_blank, missing_fields, normalize_optional_text, required_text, with_tx};

impl Engine {
    /// Lists bookings newest first.
    pub async fn list_bookings(&self) -> ResultEngine<Vec<Booking>> {
        let models = bookings::Entity::find()
            .order_by_desc(bookings::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(Booking::try_from(model)?);
        }
        Ok(out)
    }

    /// Creates a booking against a session.
    ///
    /// `event_name`/`event_date` are snapshotted from the session when not
    /// posted explicitly. The snapshot is historical: later session edits do
    /// not flow back into the booking.
    pub async fn create_booking(&self, cmd: NewBooking) -> ResultEngine<Booking> {
        let mut missing = Vec::new();
        if is_blank(&cmd.session_id) {
            missing.push("session_id");
        }
        if is_blank(&cmd.customer_name) {
            missing.push("customer_name");
        }
        if is_blank(&cmd.customer_email) {
            missing.push("customer_email");
        }
        missing_fields(missing)?;

        let session_id = super::parse_id(&required_text(cmd.session_id, "session_id")?, "session")?;
        let customer_name = required_text(cmd.customer_name, "customer_name")?;
        let customer_email = required_text(cmd.customer_email, "customer_email")?;

        with_tx!(self, |db_tx| {
            let session = event_sessions::Entity::find_by_id(session_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("session".to_string()))?;

            let event_name = match normalize_optional_text(cmd.event_name.as_deref()) {
                Some(name) => name,
                None => {
                    let event = events::Entity::find_by_id(session.event_id.clone())
                        .one(&db_tx)
                        .await?
                        .ok_or_else(|| EngineError::KeyNotFound("event".to_string()))?;
                    event.title
                }
            };
            let event_date = cmd.event_date.unwrap_or(session.date);

            let booking = Booking {
                id: Uuid::new_v4(),
                session_id,
                event_name,
                event_date,
                customer_name,
                customer_email,
                customer_phone: normalize_optional_text(cmd.customer_phone.as_deref()),
                number_of_people: cmd.number_of_people.unwrap_or(1),
                total_price: cmd.total_price.unwrap_or(Money::new(session.price_minor)),
                ojasen_fee: cmd.ojasen_fee.unwrap_or(Money::ZERO),
                facilitator_fee: cmd.facilitator_fee.unwrap_or(Money::ZERO),
                facilitator_id: cmd
                    .facilitator_id
                    .as_deref()
                    .and_then(|s| Uuid::parse_str(s.trim()).ok()),
                user_id: cmd
                    .user_id
                    .as_deref()
                    .and_then(|s| Uuid::parse_str(s.trim()).ok()),
                status: cmd.status.unwrap_or(BookingStatus::Pending),
                special_requests: normalize_optional_text(cmd.special_requests.as_deref()),
                created_at: Utc::now(),
            };
            bookings::ActiveModel::from(&booking).insert(&db_tx).await?;
            Ok(booking)
        })
    }

    /// Applies a partial patch to a booking.
    pub async fn update_booking(&self, booking_id: &str, patch: BookingPatch) -> ResultEngine<Booking> {
        let booking_id = super::parse_id(booking_id, "booking")?;
        let model = bookings::Entity::find_by_id(booking_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("booking".to_string()))?;

        let mut update = <bookings::ActiveModel as sea_orm::ActiveModelTrait>::default();
        if let Some(name) = normalize_optional_text(patch.customer_name.as_deref()) {
            update.customer_name = ActiveValue::Set(name);
        }
        if let Some(email) = normalize_optional_text(patch.customer_email.as_deref()) {
            update.customer_email = ActiveValue::Set(email);
        }
        if let Some(phone) = normalize_optional_text(patch.customer_phone.as_deref()) {
            update.customer_phone = ActiveValue::Set(Some(phone));
        }
        if let Some(people) = patch.number_of_people {
            update.number_of_people = ActiveValue::Set(people as i32);
        }
        if let Some(total) = patch.total_price {
            update.total_price_minor = ActiveValue::Set(total.minor());
        }
        if let Some(fee) = patch.ojasen_fee {
            update.ojasen_fee_minor = ActiveValue::Set(fee.minor());
        }
        if let Some(fee) = patch.facilitator_fee {
            update.facilitator_fee_minor = ActiveValue::Set(fee.minor());
        }
        if let Some(facilitator_id) = patch.facilitator_id.as_deref() {
            update.facilitator_id =
                ActiveValue::Set(Uuid::parse_str(facilitator_id.trim()).ok().map(|id| id.to_string()));
        }
        if let Some(status) = patch.status {
            update.status = ActiveValue::Set(status.as_str().to_string());
        }
        if let Some(requests) = normalize_optional_text(patch.special_requests.as_deref()) {
            update.special_requests = ActiveValue::Set(Some(requests));
        }
        if !update.is_changed() {
            return Booking::try_from(model);
        }
        update.id = ActiveValue::Set(model.id.clone());
        let updated = update.update(&self.database).await?;
        Booking::try_from(updated)
    }

    /// Deletes a booking. No referential guard.
    pub async fn delete_booking(&self, booking_id: &str) -> ResultEngine<()> {
        let booking_id = super::parse_id(booking_id, "booking")?;
        let result = bookings::Entity::delete_by_id(booking_id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("booking".to_string()));
        }
        Ok(())
    }
}

//! Event-session operations.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, EventSession, Money, NewSession, ResultEngine, SessionPatch, SessionStatus,
    event_sessions, events,
};

use super::{Engine, is_blank, missing_fields, normalize_optional_text, required, required_text};

impl Engine {
    /// Lists sessions newest first, optionally filtered to one event.
    pub async fn list_sessions(&self, event_id: Option<&str>) -> ResultEngine<Vec<EventSession>> {
        let mut query = event_sessions::Entity::find()
            .order_by_desc(event_sessions::Column::CreatedAt);
        if let Some(event_id) = event_id {
            let event_id = super::parse_id(event_id, "event")?;
            query = query.filter(event_sessions::Column::EventId.eq(event_id.to_string()));
        }
        let models = query.all(&self.database).await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(EventSession::try_from(model)?);
        }
        Ok(out)
    }

    /// Lists scheduled sessions on or after `today`, soonest first. The
    /// public view.
    pub async fn list_upcoming_sessions(&self, today: NaiveDate) -> ResultEngine<Vec<EventSession>> {
        let models = event_sessions::Entity::find()
            .filter(event_sessions::Column::Status.eq(SessionStatus::Scheduled.as_str()))
            .filter(event_sessions::Column::Date.gte(today))
            .order_by_asc(event_sessions::Column::Date)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(EventSession::try_from(model)?);
        }
        Ok(out)
    }

    /// Creates a session for an existing event. Price falls back to the
    /// event's default when not supplied.
    pub async fn create_session(&self, cmd: NewSession) -> ResultEngine<EventSession> {
        let mut missing = Vec::new();
        if is_blank(&cmd.event_id) {
            missing.push("event_id");
        }
        if cmd.date.is_none() {
            missing.push("date");
        }
        if is_blank(&cmd.time) {
            missing.push("time");
        }
        missing_fields(missing)?;

        let event_id = super::parse_id(&required_text(cmd.event_id, "event_id")?, "event")?;
        let event = events::Entity::find_by_id(event_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("event".to_string()))?;

        let mut session = EventSession::new(
            event_id,
            required(cmd.date, "date")?,
            required_text(cmd.time, "time")?,
        );
        session.location = normalize_optional_text(cmd.location.as_deref())
            .or(event.default_location);
        session.price = cmd.price.unwrap_or(Money::new(event.default_price_minor));
        session.capacity = cmd.capacity.unwrap_or(0);
        if let Some(status) = cmd.status {
            session.status = status;
        }
        event_sessions::ActiveModel::from(&session)
            .insert(&self.database)
            .await?;
        Ok(session)
    }

    /// Applies a partial patch to a session. Existing bookings keep their
    /// snapshot of the previous name/date.
    pub async fn update_session(
        &self,
        session_id: &str,
        patch: SessionPatch,
    ) -> ResultEngine<EventSession> {
        let session_id = super::parse_id(session_id, "session")?;
        let model = event_sessions::Entity::find_by_id(session_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("session".to_string()))?;

        let mut update = <event_sessions::ActiveModel as sea_orm::ActiveModelTrait>::default();
        if let Some(date) = patch.date {
            update.date = ActiveValue::Set(date);
        }
        if let Some(time) = normalize_optional_text(patch.time.as_deref()) {
            update.time = ActiveValue::Set(time);
        }
        if let Some(location) = normalize_optional_text(patch.location.as_deref()) {
            update.location = ActiveValue::Set(Some(location));
        }
        if let Some(price) = patch.price {
            update.price_minor = ActiveValue::Set(price.minor());
        }
        if let Some(capacity) = patch.capacity {
            update.capacity = ActiveValue::Set(capacity as i32);
        }
        if let Some(status) = patch.status {
            update.status = ActiveValue::Set(status.as_str().to_string());
        }
        if !update.is_changed() {
            return EventSession::try_from(model);
        }
        update.id = ActiveValue::Set(model.id.clone());
        let updated = update.update(&self.database).await?;
        EventSession::try_from(updated)
    }

    /// Deletes a session. Bookings referencing it keep their snapshot; no
    /// referential guard.
    pub async fn delete_session(&self, session_id: &str) -> ResultEngine<()> {
        let session_id = super::parse_id(session_id, "session")?;
        let result = event_sessions::Entity::delete_by_id(session_id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("session".to_string()));
        }
        Ok(())
    }
}

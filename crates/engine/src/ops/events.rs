//! Event template operations.

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, Event, EventPatch, EventStatus, Money, NewEvent, ResultEngine, events,
};

use super::{Engine, is_blank, missing_fields, normalize_optional_text, required_text};

impl Engine {
    /// Lists all events newest first.
    pub async fn list_events(&self) -> ResultEngine<Vec<Event>> {
        let models = events::Entity::find()
            .order_by_desc(events::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(Event::try_from(model)?);
        }
        Ok(out)
    }

    /// Lists active events, the public catalog view.
    pub async fn list_active_events(&self) -> ResultEngine<Vec<Event>> {
        let models = events::Entity::find()
            .filter(events::Column::Status.eq(EventStatus::Active.as_str()))
            .order_by_desc(events::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(Event::try_from(model)?);
        }
        Ok(out)
    }

    pub async fn create_event(&self, cmd: NewEvent) -> ResultEngine<Event> {
        let mut missing = Vec::new();
        if is_blank(&cmd.title) {
            missing.push("title");
        }
        missing_fields(missing)?;

        let mut event = Event::new(required_text(cmd.title, "title")?);
        event.description = normalize_optional_text(cmd.description.as_deref());
        event.category = normalize_optional_text(cmd.category.as_deref());
        event.default_price = cmd.default_price.unwrap_or(Money::ZERO);
        event.default_location = normalize_optional_text(cmd.default_location.as_deref());
        if let Some(status) = cmd.status {
            event.status = status;
        }
        events::ActiveModel::from(&event).insert(&self.database).await?;
        Ok(event)
    }

    pub async fn update_event(&self, event_id: &str, patch: EventPatch) -> ResultEngine<Event> {
        let event_id = super::parse_id(event_id, "event")?;
        let model = events::Entity::find_by_id(event_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("event".to_string()))?;

        let mut update = <events::ActiveModel as sea_orm::ActiveModelTrait>::default();
        if let Some(title) = normalize_optional_text(patch.title.as_deref()) {
            update.title = ActiveValue::Set(title);
        }
        if let Some(description) = normalize_optional_text(patch.description.as_deref()) {
            update.description = ActiveValue::Set(Some(description));
        }
        if let Some(category) = normalize_optional_text(patch.category.as_deref()) {
            update.category = ActiveValue::Set(Some(category));
        }
        if let Some(price) = patch.default_price {
            update.default_price_minor = ActiveValue::Set(price.minor());
        }
        if let Some(location) = normalize_optional_text(patch.default_location.as_deref()) {
            update.default_location = ActiveValue::Set(Some(location));
        }
        if let Some(status) = patch.status {
            update.status = ActiveValue::Set(status.as_str().to_string());
        }
        if !update.is_changed() {
            return Event::try_from(model);
        }
        update.id = ActiveValue::Set(model.id.clone());
        let updated = update.update(&self.database).await?;
        Event::try_from(updated)
    }

    /// Deletes an event. Sessions referencing it are not guarded and may be
    /// orphaned.
    pub async fn delete_event(&self, event_id: &str) -> ResultEngine<()> {
        let event_id = super::parse_id(event_id, "event")?;
        let result = events::Entity::delete_by_id(event_id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("event".to_string()));
        }
        Ok(())
    }
}

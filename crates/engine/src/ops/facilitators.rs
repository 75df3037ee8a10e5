//! Facilitator management.

use sea_orm::{ActiveValue, QueryOrder, prelude::*};

use crate::{
    EngineError, Facilitator, FacilitatorPatch, Money, NewFacilitator, ResultEngine, facilitators,
};

use super::{Engine, is_blank, missing_fields, normalize_optional_text, required_text};

impl Engine {
    /// Lists facilitators newest first.
    pub async fn list_facilitators(&self) -> ResultEngine<Vec<Facilitator>> {
        let models = facilitators::Entity::find()
            .order_by_desc(facilitators::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(Facilitator::try_from(model)?);
        }
        Ok(out)
    }

    pub async fn create_facilitator(&self, cmd: NewFacilitator) -> ResultEngine<Facilitator> {
        let mut missing = Vec::new();
        if is_blank(&cmd.name) {
            missing.push("name");
        }
        missing_fields(missing)?;

        let mut facilitator = Facilitator::new(required_text(cmd.name, "name")?);
        facilitator.role = normalize_optional_text(cmd.role.as_deref());
        facilitator.email = normalize_optional_text(cmd.email.as_deref());
        facilitator.phone = normalize_optional_text(cmd.phone.as_deref());
        facilitator.base_fee = cmd.base_fee.unwrap_or(Money::ZERO);
        facilitator.commission_per_mille = cmd.commission_per_mille.unwrap_or(0);
        facilitators::ActiveModel::from(&facilitator)
            .insert(&self.database)
            .await?;
        Ok(facilitator)
    }

    pub async fn update_facilitator(
        &self,
        facilitator_id: &str,
        patch: FacilitatorPatch,
    ) -> ResultEngine<Facilitator> {
        let facilitator_id = super::parse_id(facilitator_id, "facilitator")?;
        let model = facilitators::Entity::find_by_id(facilitator_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("facilitator".to_string()))?;

        let mut update = <facilitators::ActiveModel as sea_orm::ActiveModelTrait>::default();
        if let Some(name) = normalize_optional_text(patch.name.as_deref()) {
            update.name = ActiveValue::Set(name);
        }
        if let Some(role) = normalize_optional_text(patch.role.as_deref()) {
            update.role = ActiveValue::Set(Some(role));
        }
        if let Some(email) = normalize_optional_text(patch.email.as_deref()) {
            update.email = ActiveValue::Set(Some(email));
        }
        if let Some(phone) = normalize_optional_text(patch.phone.as_deref()) {
            update.phone = ActiveValue::Set(Some(phone));
        }
        if let Some(base_fee) = patch.base_fee {
            update.base_fee_minor = ActiveValue::Set(base_fee.minor());
        }
        if let Some(commission) = patch.commission_per_mille {
            update.commission_per_mille = ActiveValue::Set(commission as i32);
        }
        if !update.is_changed() {
            return Facilitator::try_from(model);
        }
        update.id = ActiveValue::Set(model.id.clone());
        let updated = update.update(&self.database).await?;
        Facilitator::try_from(updated)
    }

    /// Deletes a facilitator. Bookings and purchase orders referencing it are
    /// not guarded; carried as an open risk.
    pub async fn delete_facilitator(&self, facilitator_id: &str) -> ResultEngine<()> {
        let facilitator_id = super::parse_id(facilitator_id, "facilitator")?;
        let result = facilitators::Entity::delete_by_id(facilitator_id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("facilitator".to_string()));
        }
        Ok(())
    }
}

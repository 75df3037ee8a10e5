//! Marketing campaign operations.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    Campaign, CampaignPatch, CampaignStatus, EngineError, Money, NewCampaign, ResultEngine,
    campaigns,
};

use super::{Engine, is_blank, missing_fields, normalize_optional_text, required, required_text};

impl Engine {
    /// Lists campaigns newest first.
    pub async fn list_campaigns(&self) -> ResultEngine<Vec<Campaign>> {
        let models = campaigns::Entity::find()
            .order_by_desc(campaigns::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(Campaign::try_from(model)?);
        }
        Ok(out)
    }

    /// Creates a campaign.
    ///
    /// Defaults: status `draft`, discount 0, target audience "All Customers".
    pub async fn create_campaign(&self, cmd: NewCampaign) -> ResultEngine<Campaign> {
        let mut missing = Vec::new();
        if is_blank(&cmd.name) {
            missing.push("name");
        }
        if is_blank(&cmd.campaign_type) {
            missing.push("type");
        }
        if cmd.start_date.is_none() {
            missing.push("start_date");
        }
        if cmd.end_date.is_none() {
            missing.push("end_date");
        }
        missing_fields(missing)?;

        let campaign = Campaign {
            id: Uuid::new_v4(),
            name: required_text(cmd.name, "name")?,
            campaign_type: required_text(cmd.campaign_type, "type")?,
            status: cmd.status.unwrap_or(CampaignStatus::Draft),
            start_date: required(cmd.start_date, "start_date")?,
            end_date: required(cmd.end_date, "end_date")?,
            discount_per_mille: cmd.discount_per_mille.unwrap_or(0),
            target_audience: normalize_optional_text(cmd.target_audience.as_deref())
                .unwrap_or_else(|| "All Customers".to_string()),
            usage_count: 0,
            revenue: Money::ZERO,
            created_at: Utc::now(),
        };
        campaigns::ActiveModel::from(&campaign)
            .insert(&self.database)
            .await?;
        Ok(campaign)
    }

    /// Applies a partial patch to a campaign.
    pub async fn update_campaign(
        &self,
        campaign_id: &str,
        patch: CampaignPatch,
    ) -> ResultEngine<Campaign> {
        let campaign_id = super::parse_id(campaign_id, "campaign")?;
        let model = campaigns::Entity::find_by_id(campaign_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("campaign".to_string()))?;

        let mut update = <campaigns::ActiveModel as sea_orm::ActiveModelTrait>::default();
        if let Some(name) = normalize_optional_text(patch.name.as_deref()) {
            update.name = ActiveValue::Set(name);
        }
        if let Some(campaign_type) = normalize_optional_text(patch.campaign_type.as_deref()) {
            update.campaign_type = ActiveValue::Set(campaign_type);
        }
        if let Some(status) = patch.status {
            update.status = ActiveValue::Set(status.as_str().to_string());
        }
        if let Some(start_date) = patch.start_date {
            update.start_date = ActiveValue::Set(start_date);
        }
        if let Some(end_date) = patch.end_date {
            update.end_date = ActiveValue::Set(end_date);
        }
        if let Some(discount) = patch.discount_per_mille {
            update.discount_per_mille = ActiveValue::Set(discount as i32);
        }
        if let Some(audience) = normalize_optional_text(patch.target_audience.as_deref()) {
            update.target_audience = ActiveValue::Set(audience);
        }
        if let Some(usage_count) = patch.usage_count {
            update.usage_count = ActiveValue::Set(usage_count as i64);
        }
        if let Some(revenue) = patch.revenue {
            update.revenue_minor = ActiveValue::Set(revenue.minor());
        }
        if !update.is_changed() {
            return Campaign::try_from(model);
        }
        update.id = ActiveValue::Set(model.id.clone());
        let updated = update.update(&self.database).await?;
        Campaign::try_from(updated)
    }

    /// Deletes a campaign. No referential guard.
    pub async fn delete_campaign(&self, campaign_id: &str) -> ResultEngine<()> {
        let campaign_id = super::parse_id(campaign_id, "campaign")?;
        let result = campaigns::Entity::delete_by_id(campaign_id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("campaign".to_string()));
        }
        Ok(())
    }
}

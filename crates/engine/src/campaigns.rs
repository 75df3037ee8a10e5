//! Marketing campaigns.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CampaignStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for CampaignStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            other => Err(EngineError::Validation(format!(
                "invalid campaign status: {other}"
            ))),
        }
    }
}

/// A marketing campaign. `discount_per_mille` is parsed leniently and
/// defaults to 0; `usage_count`/`revenue` accumulate over its lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub campaign_type: String,
    pub status: CampaignStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub discount_per_mille: u32,
    pub target_audience: String,
    pub usage_count: u64,
    pub revenue: Money,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub campaign_type: String,
    pub status: String,
    pub start_date: Date,
    pub end_date: Date,
    pub discount_per_mille: i32,
    pub target_audience: String,
    pub usage_count: i64,
    pub revenue_minor: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Campaign> for ActiveModel {
    fn from(campaign: &Campaign) -> Self {
        Self {
            id: ActiveValue::Set(campaign.id.to_string()),
            name: ActiveValue::Set(campaign.name.clone()),
            campaign_type: ActiveValue::Set(campaign.campaign_type.clone()),
            status: ActiveValue::Set(campaign.status.as_str().to_string()),
            start_date: ActiveValue::Set(campaign.start_date),
            end_date: ActiveValue::Set(campaign.end_date),
            discount_per_mille: ActiveValue::Set(campaign.discount_per_mille as i32),
            target_audience: ActiveValue::Set(campaign.target_audience.clone()),
            usage_count: ActiveValue::Set(campaign.usage_count as i64),
            revenue_minor: ActiveValue::Set(campaign.revenue.minor()),
            created_at: ActiveValue::Set(campaign.created_at),
        }
    }
}

impl TryFrom<Model> for Campaign {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("campaign".to_string()))?,
            name: model.name,
            campaign_type: model.campaign_type,
            status: CampaignStatus::try_from(model.status.as_str())?,
            start_date: model.start_date,
            end_date: model.end_date,
            discount_per_mille: u32::try_from(model.discount_per_mille).unwrap_or_default(),
            target_audience: model.target_audience,
            usage_count: u64::try_from(model.usage_count).unwrap_or_default(),
            revenue: Money::new(model.revenue_minor),
            created_at: model.created_at,
        })
    }
}

//! Facilitator records: the service providers compensated via purchase orders.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

/// A facilitator.
///
/// `commission_per_mille` is a fractional payout rate stored for reference;
/// the reconciliation core never applies it automatically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Facilitator {
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub base_fee: Money,
    pub commission_per_mille: u32,
    pub created_at: DateTime<Utc>,
}

impl Facilitator {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            role: None,
            email: None,
            phone: None,
            base_fee: Money::ZERO,
            commission_per_mille: 0,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "facilitators")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub base_fee_minor: i64,
    pub commission_per_mille: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_orders::Entity")]
    PurchaseOrders,
}

impl Related<super::purchase_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Facilitator> for ActiveModel {
    fn from(facilitator: &Facilitator) -> Self {
        Self {
            id: ActiveValue::Set(facilitator.id.to_string()),
            name: ActiveValue::Set(facilitator.name.clone()),
            role: ActiveValue::Set(facilitator.role.clone()),
            email: ActiveValue::Set(facilitator.email.clone()),
            phone: ActiveValue::Set(facilitator.phone.clone()),
            base_fee_minor: ActiveValue::Set(facilitator.base_fee.minor()),
            commission_per_mille: ActiveValue::Set(facilitator.commission_per_mille as i32),
            created_at: ActiveValue::Set(facilitator.created_at),
        }
    }
}

impl TryFrom<Model> for Facilitator {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("facilitator".to_string()))?,
            name: model.name,
            role: model.role,
            email: model.email,
            phone: model.phone,
            base_fee: Money::new(model.base_fee_minor),
            commission_per_mille: u32::try_from(model.commission_per_mille).unwrap_or_default(),
            created_at: model.created_at,
        })
    }
}

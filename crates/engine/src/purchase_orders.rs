//! Purchase orders: payables issued to facilitators.
//!
//! Same balance invariant as invoices, scoped to a facilitator payout.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{Currency, EngineError, Money, ResultEngine, invoices::DocumentStatus};

/// A payable owed to a facilitator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub po_number: String,
    pub facilitator_id: Uuid,
    pub due_date: NaiveDate,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub amount_paid: Money,
    pub amount_due: Money,
    pub currency: Currency,
    pub status: DocumentStatus,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "purchase_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub po_number: String,
    pub facilitator_id: String,
    pub due_date: Date,
    pub subtotal_minor: i64,
    pub tax_minor: i64,
    pub total_minor: i64,
    pub amount_paid_minor: i64,
    pub amount_due_minor: i64,
    pub currency: String,
    pub status: String,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::facilitators::Entity",
        from = "Column::FacilitatorId",
        to = "super::facilitators::Column::Id"
    )]
    Facilitators,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::facilitators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Facilitators.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&PurchaseOrder> for ActiveModel {
    fn from(po: &PurchaseOrder) -> Self {
        Self {
            id: ActiveValue::Set(po.id.to_string()),
            po_number: ActiveValue::Set(po.po_number.clone()),
            facilitator_id: ActiveValue::Set(po.facilitator_id.to_string()),
            due_date: ActiveValue::Set(po.due_date),
            subtotal_minor: ActiveValue::Set(po.subtotal.minor()),
            tax_minor: ActiveValue::Set(po.tax.minor()),
            total_minor: ActiveValue::Set(po.total.minor()),
            amount_paid_minor: ActiveValue::Set(po.amount_paid.minor()),
            amount_due_minor: ActiveValue::Set(po.amount_due.minor()),
            currency: ActiveValue::Set(po.currency.code().to_string()),
            status: ActiveValue::Set(po.status.as_str().to_string()),
            notes: ActiveValue::Set(po.notes.clone()),
            terms: ActiveValue::Set(po.terms.clone()),
            created_at: ActiveValue::Set(po.created_at),
        }
    }
}

impl TryFrom<Model> for PurchaseOrder {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("purchase order".to_string()))?,
            po_number: model.po_number,
            facilitator_id: Uuid::parse_str(&model.facilitator_id)
                .map_err(|_| EngineError::KeyNotFound("facilitator".to_string()))?,
            due_date: model.due_date,
            subtotal: Money::new(model.subtotal_minor),
            tax: Money::new(model.tax_minor),
            total: Money::new(model.total_minor),
            amount_paid: Money::new(model.amount_paid_minor),
            amount_due: Money::new(model.amount_due_minor),
            currency: Currency::try_from(model.currency.as_str()).unwrap_or_default(),
            status: DocumentStatus::try_from(model.status.as_str())?,
            notes: model.notes,
            terms: model.terms,
            created_at: model.created_at,
        })
    }
}

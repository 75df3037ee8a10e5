//! Payment records settling invoice and purchase-order balances.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

/// The document a payment settles: exactly one of invoice or purchase order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentTarget {
    Invoice(Uuid),
    PurchaseOrder(Uuid),
}

/// A monetary transaction against exactly one parent document.
///
/// Edits and deletes never re-adjust the parent's balances; the recorded
/// history stays as posted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    pub id: Uuid,
    pub payment_number: String,
    pub target: PaymentTarget,
    pub amount: Money,
    pub payment_method: String,
    pub payment_date: DateTime<Utc>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn invoice_id(&self) -> Option<Uuid> {
        match self.target {
            PaymentTarget::Invoice(id) => Some(id),
            PaymentTarget::PurchaseOrder(_) => None,
        }
    }

    pub fn purchase_order_id(&self) -> Option<Uuid> {
        match self.target {
            PaymentTarget::Invoice(_) => None,
            PaymentTarget::PurchaseOrder(id) => Some(id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub payment_number: String,
    pub invoice_id: Option<String>,
    pub purchase_order_id: Option<String>,
    pub amount_minor: i64,
    pub payment_method: String,
    pub payment_date: DateTimeUtc,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::invoices::Entity",
        from = "Column::InvoiceId",
        to = "super::invoices::Column::Id"
    )]
    Invoices,
    #[sea_orm(
        belongs_to = "super::purchase_orders::Entity",
        from = "Column::PurchaseOrderId",
        to = "super::purchase_orders::Column::Id"
    )]
    PurchaseOrders,
}

impl Related<super::invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl Related<super::purchase_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Payment> for ActiveModel {
    fn from(payment: &Payment) -> Self {
        Self {
            id: ActiveValue::Set(payment.id.to_string()),
            payment_number: ActiveValue::Set(payment.payment_number.clone()),
            invoice_id: ActiveValue::Set(payment.invoice_id().map(|id| id.to_string())),
            purchase_order_id: ActiveValue::Set(
                payment.purchase_order_id().map(|id| id.to_string()),
            ),
            amount_minor: ActiveValue::Set(payment.amount.minor()),
            payment_method: ActiveValue::Set(payment.payment_method.clone()),
            payment_date: ActiveValue::Set(payment.payment_date),
            reference_number: ActiveValue::Set(payment.reference_number.clone()),
            notes: ActiveValue::Set(payment.notes.clone()),
            created_at: ActiveValue::Set(payment.created_at),
        }
    }
}

impl TryFrom<Model> for Payment {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        let target = match (&model.invoice_id, &model.purchase_order_id) {
            (Some(invoice_id), None) => PaymentTarget::Invoice(
                Uuid::parse_str(invoice_id)
                    .map_err(|_| EngineError::KeyNotFound("invoice".to_string()))?,
            ),
            (None, Some(po_id)) => PaymentTarget::PurchaseOrder(
                Uuid::parse_str(po_id)
                    .map_err(|_| EngineError::KeyNotFound("purchase order".to_string()))?,
            ),
            _ => {
                return Err(EngineError::Validation(
                    "payment must reference exactly one of invoice or purchase order".to_string(),
                ));
            }
        };

        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("payment".to_string()))?,
            payment_number: model.payment_number,
            target,
            amount: Money::new(model.amount_minor),
            payment_method: model.payment_method,
            payment_date: model.payment_date,
            reference_number: model.reference_number,
            notes: model.notes,
            created_at: model.created_at,
        })
    }
}

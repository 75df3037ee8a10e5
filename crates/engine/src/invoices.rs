//! Customer invoices.
//!
//! Balance invariant: `amount_due == total − amount_paid` at all times. The
//! payment-recording path derives `partial`/`paid`; `overdue`/`cancelled` only
//! ever come from the admin override.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{Currency, EngineError, Money, ResultEngine};

/// Status shared by invoices and purchase orders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DocumentStatus {
    #[default]
    Draft,
    Partial,
    Paid,
    Overdue,
    Cancelled,
}

impl DocumentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Partial => "partial",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
            Self::Cancelled => "cancelled",
        }
    }
}

impl TryFrom<&str> for DocumentStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "draft" => Ok(Self::Draft),
            "partial" => Ok(Self::Partial),
            "paid" => Ok(Self::Paid),
            "overdue" => Ok(Self::Overdue),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(EngineError::Validation(format!(
                "invalid document status: {other}"
            ))),
        }
    }
}

/// A bill issued to a customer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub customer_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
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
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub invoice_number: String,
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
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
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Invoice> for ActiveModel {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: ActiveValue::Set(invoice.id.to_string()),
            invoice_number: ActiveValue::Set(invoice.invoice_number.clone()),
            customer_id: ActiveValue::Set(invoice.customer_id.map(|id| id.to_string())),
            customer_name: ActiveValue::Set(invoice.customer_name.clone()),
            customer_email: ActiveValue::Set(invoice.customer_email.clone()),
            customer_phone: ActiveValue::Set(invoice.customer_phone.clone()),
            due_date: ActiveValue::Set(invoice.due_date),
            subtotal_minor: ActiveValue::Set(invoice.subtotal.minor()),
            tax_minor: ActiveValue::Set(invoice.tax.minor()),
            total_minor: ActiveValue::Set(invoice.total.minor()),
            amount_paid_minor: ActiveValue::Set(invoice.amount_paid.minor()),
            amount_due_minor: ActiveValue::Set(invoice.amount_due.minor()),
            currency: ActiveValue::Set(invoice.currency.code().to_string()),
            status: ActiveValue::Set(invoice.status.as_str().to_string()),
            notes: ActiveValue::Set(invoice.notes.clone()),
            terms: ActiveValue::Set(invoice.terms.clone()),
            created_at: ActiveValue::Set(invoice.created_at),
        }
    }
}

impl TryFrom<Model> for Invoice {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("invoice".to_string()))?,
            invoice_number: model.invoice_number,
            customer_id: model.customer_id.and_then(|s| Uuid::parse_str(&s).ok()),
            customer_name: model.customer_name,
            customer_email: model.customer_email,
            customer_phone: model.customer_phone,
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

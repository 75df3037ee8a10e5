//! Command structs for engine operations.
//!
//! These types group parameters for write operations (creates and partial
//! patches), keeping call sites readable and avoiding long argument lists.
//! Ids arrive as strings from the wire and are resolved inside the engine.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{BookingStatus, CampaignStatus, Currency, EventStatus, Money, SessionStatus};

#[derive(Clone, Debug, Default)]
pub struct NewCustomer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct NewFacilitator {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub base_fee: Option<Money>,
    pub commission_per_mille: Option<u32>,
}

#[derive(Clone, Debug, Default)]
pub struct FacilitatorPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub base_fee: Option<Money>,
    pub commission_per_mille: Option<u32>,
}

#[derive(Clone, Debug, Default)]
pub struct NewBooking {
    pub session_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub number_of_people: Option<u32>,
    pub total_price: Option<Money>,
    pub ojasen_fee: Option<Money>,
    pub facilitator_fee: Option<Money>,
    pub facilitator_id: Option<String>,
    pub user_id: Option<String>,
    /// When omitted, snapshotted from the referenced session.
    pub event_name: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
    pub special_requests: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct BookingPatch {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub number_of_people: Option<u32>,
    pub total_price: Option<Money>,
    pub ojasen_fee: Option<Money>,
    pub facilitator_fee: Option<Money>,
    pub facilitator_id: Option<String>,
    pub status: Option<BookingStatus>,
    pub special_requests: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct NewEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub default_price: Option<Money>,
    pub default_location: Option<String>,
    pub status: Option<EventStatus>,
}

#[derive(Clone, Debug, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub default_price: Option<Money>,
    pub default_location: Option<String>,
    pub status: Option<EventStatus>,
}

#[derive(Clone, Debug, Default)]
pub struct NewSession {
    pub event_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub price: Option<Money>,
    pub capacity: Option<u32>,
    pub status: Option<SessionStatus>,
}

#[derive(Clone, Debug, Default)]
pub struct SessionPatch {
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub price: Option<Money>,
    pub capacity: Option<u32>,
    pub status: Option<SessionStatus>,
}

#[derive(Clone, Debug, Default)]
pub struct NewCampaign {
    pub name: Option<String>,
    pub campaign_type: Option<String>,
    pub status: Option<CampaignStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub discount_per_mille: Option<u32>,
    pub target_audience: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct CampaignPatch {
    pub name: Option<String>,
    pub campaign_type: Option<String>,
    pub status: Option<CampaignStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub discount_per_mille: Option<u32>,
    pub target_audience: Option<String>,
    pub usage_count: Option<u64>,
    pub revenue: Option<Money>,
}

#[derive(Clone, Debug, Default)]
pub struct NewInvoice {
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub subtotal: Option<Money>,
    pub tax: Option<Money>,
    pub total: Option<Money>,
    pub currency: Option<Currency>,
    pub notes: Option<String>,
    pub terms: Option<String>,
}

impl NewInvoice {
    #[must_use]
    pub fn new(customer_name: impl Into<String>, due_date: NaiveDate, total: Money) -> Self {
        Self {
            customer_name: Some(customer_name.into()),
            due_date: Some(due_date),
            total: Some(total),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NewPurchaseOrder {
    pub facilitator_id: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub subtotal: Option<Money>,
    pub tax: Option<Money>,
    pub total: Option<Money>,
    pub currency: Option<Currency>,
    pub notes: Option<String>,
    pub terms: Option<String>,
}

impl NewPurchaseOrder {
    #[must_use]
    pub fn new(facilitator_id: impl Into<String>, due_date: NaiveDate, total: Money) -> Self {
        Self {
            facilitator_id: Some(facilitator_id.into()),
            due_date: Some(due_date),
            total: Some(total),
            ..Self::default()
        }
    }
}

/// Records a payment against one invoice or purchase order. The target id is
/// passed to the recording operation, not carried here.
#[derive(Clone, Debug, Default)]
pub struct NewPayment {
    pub amount: Option<Money>,
    pub payment_method: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

impl NewPayment {
    #[must_use]
    pub fn new(amount: Money) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }
}

/// Edits payment metadata. Amount and target are immutable; parent balances
/// are never re-adjusted.
#[derive(Clone, Debug, Default)]
pub struct PaymentPatch {
    pub payment_method: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

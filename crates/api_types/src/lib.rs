use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Lkr,
}

/// Failure envelope shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Bare `{"success": true}` acknowledgement for deletes and overrides.
#[derive(Debug, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

/// Body of DELETE requests: the id of the record to remove.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: String,
}

pub mod user {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Role {
        User,
        Admin,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: String,
        pub name: String,
        pub email: String,
        pub role: Role,
        pub phone: Option<String>,
        pub email_verified: bool,
        pub is_anonymous: bool,
        pub created_at: DateTime<Utc>,
    }

    /// Customer listing entry: the user record plus booking-derived totals.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CustomerView {
        #[serde(flatten)]
        pub user: UserView,
        pub total_bookings: u64,
        pub total_spent_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CustomerNew {
        pub name: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CustomerUpdate {
        pub id: String,
        pub name: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RoleUpdate {
        pub id: String,
        pub role: Role,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CustomersResponse {
        pub success: bool,
        pub customers: Vec<CustomerView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CustomerResponse {
        pub success: bool,
        pub customer: UserView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UsersResponse {
        pub success: bool,
        pub users: Vec<UserView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserResponse {
        pub success: bool,
        pub user: UserView,
    }

    /// Wire shape of `GET /api/check-admin`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CheckAdminResponse {
        pub success: bool,
        pub is_admin: bool,
        pub user_id: String,
        pub user_email: String,
    }
}

pub mod booking {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum BookingStatus {
        Pending,
        Confirmed,
        Cancelled,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BookingView {
        pub id: String,
        pub session_id: String,
        /// Snapshot taken at booking time; never resynced to the session.
        pub event_name: String,
        pub event_date: NaiveDate,
        pub customer_name: String,
        pub customer_email: String,
        pub customer_phone: Option<String>,
        pub number_of_people: u32,
        pub total_price_minor: i64,
        pub ojasen_fee_minor: i64,
        pub facilitator_fee_minor: i64,
        pub facilitator_id: Option<String>,
        pub user_id: Option<String>,
        pub status: BookingStatus,
        pub special_requests: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BookingNew {
        pub session_id: Option<String>,
        pub customer_name: Option<String>,
        pub customer_email: Option<String>,
        pub customer_phone: Option<String>,
        pub number_of_people: Option<u32>,
        pub total_price_minor: Option<i64>,
        pub ojasen_fee_minor: Option<i64>,
        pub facilitator_fee_minor: Option<i64>,
        pub facilitator_id: Option<String>,
        pub user_id: Option<String>,
        /// When omitted, snapshotted from the referenced session.
        pub event_name: Option<String>,
        pub event_date: Option<NaiveDate>,
        pub status: Option<BookingStatus>,
        pub special_requests: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BookingUpdate {
        pub id: String,
        pub customer_name: Option<String>,
        pub customer_email: Option<String>,
        pub customer_phone: Option<String>,
        pub number_of_people: Option<u32>,
        pub total_price_minor: Option<i64>,
        pub ojasen_fee_minor: Option<i64>,
        pub facilitator_fee_minor: Option<i64>,
        pub facilitator_id: Option<String>,
        pub status: Option<BookingStatus>,
        pub special_requests: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BookingsResponse {
        pub success: bool,
        pub bookings: Vec<BookingView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BookingResponse {
        pub success: bool,
        pub booking: BookingView,
    }
}

pub mod facilitator {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FacilitatorView {
        pub id: String,
        pub name: String,
        pub role: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub base_fee_minor: i64,
        /// Commission rate in per-mille; applied outside the reconciliation core.
        pub commission_per_mille: u32,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FacilitatorNew {
        pub name: Option<String>,
        pub role: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub base_fee_minor: Option<i64>,
        pub commission_per_mille: Option<u32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FacilitatorUpdate {
        pub id: String,
        pub name: Option<String>,
        pub role: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub base_fee_minor: Option<i64>,
        pub commission_per_mille: Option<u32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FacilitatorsResponse {
        pub success: bool,
        pub facilitators: Vec<FacilitatorView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FacilitatorResponse {
        pub success: bool,
        pub facilitator: FacilitatorView,
    }
}

pub mod event {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum EventStatus {
        Active,
        Inactive,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SessionStatus {
        Scheduled,
        Cancelled,
        Completed,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventView {
        pub id: String,
        pub title: String,
        pub description: Option<String>,
        pub category: Option<String>,
        pub default_price_minor: i64,
        pub default_location: Option<String>,
        pub status: EventStatus,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventNew {
        pub title: Option<String>,
        pub description: Option<String>,
        pub category: Option<String>,
        pub default_price_minor: Option<i64>,
        pub default_location: Option<String>,
        pub status: Option<EventStatus>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventUpdate {
        pub id: String,
        pub title: Option<String>,
        pub description: Option<String>,
        pub category: Option<String>,
        pub default_price_minor: Option<i64>,
        pub default_location: Option<String>,
        pub status: Option<EventStatus>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionView {
        pub id: String,
        pub event_id: String,
        pub date: NaiveDate,
        pub time: String,
        pub location: Option<String>,
        pub price_minor: i64,
        pub capacity: u32,
        pub status: SessionStatus,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionNew {
        pub event_id: Option<String>,
        pub date: Option<NaiveDate>,
        pub time: Option<String>,
        pub location: Option<String>,
        pub price_minor: Option<i64>,
        pub capacity: Option<u32>,
        pub status: Option<SessionStatus>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionUpdate {
        pub id: String,
        pub date: Option<NaiveDate>,
        pub time: Option<String>,
        pub location: Option<String>,
        pub price_minor: Option<i64>,
        pub capacity: Option<u32>,
        pub status: Option<SessionStatus>,
    }

    /// Query filter for the admin session listing.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SessionFilter {
        #[serde(rename = "eventId")]
        pub event_id: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventsResponse {
        pub success: bool,
        pub events: Vec<EventView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventResponse {
        pub success: bool,
        pub event: EventView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionsResponse {
        pub success: bool,
        pub sessions: Vec<SessionView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionResponse {
        pub success: bool,
        pub session: SessionView,
    }
}

pub mod campaign {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum CampaignStatus {
        Draft,
        Active,
        Paused,
        Completed,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CampaignView {
        pub id: String,
        pub name: String,
        #[serde(rename = "type")]
        pub campaign_type: String,
        pub status: CampaignStatus,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        /// Discount in per-mille of the list price.
        pub discount_per_mille: u32,
        pub target_audience: String,
        pub usage_count: u64,
        pub revenue_minor: i64,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CampaignNew {
        pub name: Option<String>,
        #[serde(rename = "type")]
        pub campaign_type: Option<String>,
        pub status: Option<CampaignStatus>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub discount_per_mille: Option<u32>,
        pub target_audience: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CampaignUpdate {
        pub id: String,
        pub name: Option<String>,
        #[serde(rename = "type")]
        pub campaign_type: Option<String>,
        pub status: Option<CampaignStatus>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub discount_per_mille: Option<u32>,
        pub target_audience: Option<String>,
        pub usage_count: Option<u64>,
        pub revenue_minor: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CampaignsResponse {
        pub success: bool,
        pub campaigns: Vec<CampaignView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CampaignResponse {
        pub success: bool,
        pub campaign: CampaignView,
    }
}

pub mod billing {
    use super::*;

    /// Status shared by invoices and purchase orders.
    ///
    /// `partial` and `paid` are derived by payment recording; `overdue` and
    /// `cancelled` only ever come from the admin override.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum DocumentStatus {
        Draft,
        Partial,
        Paid,
        Overdue,
        Cancelled,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvoiceView {
        pub id: String,
        pub invoice_number: String,
        pub customer_id: Option<String>,
        pub customer_name: String,
        pub customer_email: Option<String>,
        pub customer_phone: Option<String>,
        pub due_date: NaiveDate,
        pub subtotal_minor: i64,
        pub tax_minor: i64,
        pub total_minor: i64,
        pub amount_paid_minor: i64,
        pub amount_due_minor: i64,
        pub currency: Currency,
        pub status: DocumentStatus,
        pub notes: Option<String>,
        pub terms: Option<String>,
        pub created_at: DateTime<Utc>,
        pub payments: Vec<PaymentView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvoiceNew {
        pub customer_id: Option<String>,
        pub customer_name: Option<String>,
        pub customer_email: Option<String>,
        pub customer_phone: Option<String>,
        pub due_date: Option<NaiveDate>,
        pub subtotal_minor: Option<i64>,
        pub tax_minor: Option<i64>,
        pub total_minor: Option<i64>,
        pub currency: Option<Currency>,
        pub notes: Option<String>,
        pub terms: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseOrderView {
        pub id: String,
        pub po_number: String,
        pub facilitator_id: String,
        pub due_date: NaiveDate,
        pub subtotal_minor: i64,
        pub tax_minor: i64,
        pub total_minor: i64,
        pub amount_paid_minor: i64,
        pub amount_due_minor: i64,
        pub currency: Currency,
        pub status: DocumentStatus,
        pub notes: Option<String>,
        pub terms: Option<String>,
        pub created_at: DateTime<Utc>,
        pub payments: Vec<PaymentView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseOrderNew {
        pub facilitator_id: Option<String>,
        pub due_date: Option<NaiveDate>,
        pub subtotal_minor: Option<i64>,
        pub tax_minor: Option<i64>,
        pub total_minor: Option<i64>,
        pub currency: Option<Currency>,
        pub notes: Option<String>,
        pub terms: Option<String>,
    }

    /// Admin escape hatch: free-form status overwrite, no transition checks.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatusOverride {
        pub id: String,
        pub status: DocumentStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentView {
        pub id: String,
        pub payment_number: String,
        pub invoice_id: Option<String>,
        pub purchase_order_id: Option<String>,
        /// Document number of the parent invoice/PO, for display.
        pub parent_number: Option<String>,
        pub amount_minor: i64,
        pub payment_method: String,
        pub payment_date: DateTime<Utc>,
        pub reference_number: Option<String>,
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    /// Records a payment against exactly one of `invoice_id` / `purchase_order_id`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentNew {
        pub invoice_id: Option<String>,
        pub purchase_order_id: Option<String>,
        pub amount_minor: Option<i64>,
        pub payment_method: Option<String>,
        pub payment_date: Option<DateTime<Utc>>,
        pub reference_number: Option<String>,
        pub notes: Option<String>,
    }

    /// Edits payment metadata; parent balances are never re-adjusted.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentUpdate {
        pub id: String,
        pub payment_method: Option<String>,
        pub payment_date: Option<DateTime<Utc>>,
        pub reference_number: Option<String>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvoicesResponse {
        pub success: bool,
        pub invoices: Vec<InvoiceView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvoiceResponse {
        pub success: bool,
        pub invoice: InvoiceView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseOrdersResponse {
        pub success: bool,
        pub purchase_orders: Vec<PurchaseOrderView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseOrderResponse {
        pub success: bool,
        pub purchase_order: PurchaseOrderView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentsResponse {
        pub success: bool,
        pub payments: Vec<PaymentView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentResponse {
        pub success: bool,
        pub payment: PaymentView,
    }
}

pub mod reports {
    use super::*;
    use std::collections::BTreeMap;

    /// One `"{year}-{season}"` bucket of the seasonal breakdown.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SeasonTotals {
        pub total_revenue_minor: i64,
        pub facilitator_costs_minor: i64,
        pub booking_count: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthlyRevenue {
        /// Short month name ("Jan" .. "Dec").
        pub month: String,
        pub revenue_minor: i64,
        pub profit_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ServiceRevenue {
        pub name: String,
        pub revenue_minor: i64,
        pub bookings: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FinancialData {
        pub revenue_minor: i64,
        pub facilitator_costs_minor: i64,
        pub gross_profit_minor: i64,
        pub outstanding_invoices: u64,
        pub season_breakdown: BTreeMap<String, SeasonTotals>,
        /// Exactly six entries, oldest month first.
        pub revenue_over_time: Vec<MonthlyRevenue>,
        /// At most five entries, sorted descending by revenue.
        pub top_services: Vec<ServiceRevenue>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FinancialReportResponse {
        pub success: bool,
        pub data: FinancialData,
    }

    /// Counts and totals over invoices, purchase orders and payments.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct FinancialSummary {
        pub invoice_count: u64,
        pub invoices_total_minor: i64,
        pub invoices_paid_minor: i64,
        pub invoices_due_minor: i64,
        pub paid_invoices: u64,
        pub overdue_invoices: u64,
        pub purchase_order_count: u64,
        pub purchase_orders_total_minor: i64,
        pub purchase_orders_paid_minor: i64,
        pub purchase_orders_due_minor: i64,
        pub paid_purchase_orders: u64,
        pub payment_count: u64,
        pub payments_total_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FinancialSummaryResponse {
        pub success: bool,
        pub summary: FinancialSummary,
    }
}

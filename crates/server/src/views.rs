//! Conversions between engine domain types and wire DTOs.

use api_types::{Currency, billing, booking, campaign, event, facilitator, reports, user};

pub(crate) fn map_role(role: engine::Role) -> user::Role {
    match role {
        engine::Role::User => user::Role::User,
        engine::Role::Admin => user::Role::Admin,
    }
}

pub(crate) fn role_from_api(role: user::Role) -> engine::Role {
    match role {
        user::Role::User => engine::Role::User,
        user::Role::Admin => engine::Role::Admin,
    }
}

pub(crate) fn map_booking_status(status: engine::BookingStatus) -> booking::BookingStatus {
    match status {
        engine::BookingStatus::Pending => booking::BookingStatus::Pending,
        engine::BookingStatus::Confirmed => booking::BookingStatus::Confirmed,
        engine::BookingStatus::Cancelled => booking::BookingStatus::Cancelled,
    }
}

pub(crate) fn booking_status_from_api(status: booking::BookingStatus) -> engine::BookingStatus {
    match status {
        booking::BookingStatus::Pending => engine::BookingStatus::Pending,
        booking::BookingStatus::Confirmed => engine::BookingStatus::Confirmed,
        booking::BookingStatus::Cancelled => engine::BookingStatus::Cancelled,
    }
}

pub(crate) fn map_document_status(status: engine::DocumentStatus) -> billing::DocumentStatus {
    match status {
        engine::DocumentStatus::Draft => billing::DocumentStatus::Draft,
        engine::DocumentStatus::Partial => billing::DocumentStatus::Partial,
        engine::DocumentStatus::Paid => billing::DocumentStatus::Paid,
        engine::DocumentStatus::Overdue => billing::DocumentStatus::Overdue,
        engine::DocumentStatus::Cancelled => billing::DocumentStatus::Cancelled,
    }
}

pub(crate) fn document_status_from_api(status: billing::DocumentStatus) -> engine::DocumentStatus {
    match status {
        billing::DocumentStatus::Draft => engine::DocumentStatus::Draft,
        billing::DocumentStatus::Partial => engine::DocumentStatus::Partial,
        billing::DocumentStatus::Paid => engine::DocumentStatus::Paid,
        billing::DocumentStatus::Overdue => engine::DocumentStatus::Overdue,
        billing::DocumentStatus::Cancelled => engine::DocumentStatus::Cancelled,
    }
}

pub(crate) fn map_event_status(status: engine::EventStatus) -> event::EventStatus {
    match status {
        engine::EventStatus::Active => event::EventStatus::Active,
        engine::EventStatus::Inactive => event::EventStatus::Inactive,
    }
}

pub(crate) fn event_status_from_api(status: event::EventStatus) -> engine::EventStatus {
    match status {
        event::EventStatus::Active => engine::EventStatus::Active,
        event::EventStatus::Inactive => engine::EventStatus::Inactive,
    }
}

pub(crate) fn map_session_status(status: engine::SessionStatus) -> event::SessionStatus {
    match status {
        engine::SessionStatus::Scheduled => event::SessionStatus::Scheduled,
        engine::SessionStatus::Cancelled => event::SessionStatus::Cancelled,
        engine::SessionStatus::Completed => event::SessionStatus::Completed,
    }
}

pub(crate) fn session_status_from_api(status: event::SessionStatus) -> engine::SessionStatus {
    match status {
        event::SessionStatus::Scheduled => engine::SessionStatus::Scheduled,
        event::SessionStatus::Cancelled => engine::SessionStatus::Cancelled,
        event::SessionStatus::Completed => engine::SessionStatus::Completed,
    }
}

pub(crate) fn map_campaign_status(status: engine::CampaignStatus) -> campaign::CampaignStatus {
    match status {
        engine::CampaignStatus::Draft => campaign::CampaignStatus::Draft,
        engine::CampaignStatus::Active => campaign::CampaignStatus::Active,
        engine::CampaignStatus::Paused => campaign::CampaignStatus::Paused,
        engine::CampaignStatus::Completed => campaign::CampaignStatus::Completed,
    }
}

pub(crate) fn campaign_status_from_api(status: campaign::CampaignStatus) -> engine::CampaignStatus {
    match status {
        campaign::CampaignStatus::Draft => engine::CampaignStatus::Draft,
        campaign::CampaignStatus::Active => engine::CampaignStatus::Active,
        campaign::CampaignStatus::Paused => engine::CampaignStatus::Paused,
        campaign::CampaignStatus::Completed => engine::CampaignStatus::Completed,
    }
}

pub(crate) fn map_currency(currency: engine::Currency) -> Currency {
    match currency {
        engine::Currency::Lkr => Currency::Lkr,
    }
}

pub(crate) fn currency_from_api(currency: Currency) -> engine::Currency {
    match currency {
        Currency::Lkr => engine::Currency::Lkr,
    }
}

pub(crate) fn user_view(u: engine::User) -> user::UserView {
    user::UserView {
        id: u.id.to_string(),
        name: u.name,
        email: u.email,
        role: map_role(u.role),
        phone: u.phone,
        email_verified: u.email_verified,
        is_anonymous: u.is_anonymous,
        created_at: u.created_at,
    }
}

pub(crate) fn customer_view(u: engine::User, totals: engine::CustomerTotals) -> user::CustomerView {
    user::CustomerView {
        user: user_view(u),
        total_bookings: totals.total_bookings,
        total_spent_minor: totals.total_spent.minor(),
    }
}

pub(crate) fn booking_view(b: engine::Booking) -> booking::BookingView {
    booking::BookingView {
        id: b.id.to_string(),
        session_id: b.session_id.to_string(),
        event_name: b.event_name,
        event_date: b.event_date,
        customer_name: b.customer_name,
        customer_email: b.customer_email,
        customer_phone: b.customer_phone,
        number_of_people: b.number_of_people,
        total_price_minor: b.total_price.minor(),
        ojasen_fee_minor: b.ojasen_fee.minor(),
        facilitator_fee_minor: b.facilitator_fee.minor(),
        facilitator_id: b.facilitator_id.map(|id| id.to_string()),
        user_id: b.user_id.map(|id| id.to_string()),
        status: map_booking_status(b.status),
        special_requests: b.special_requests,
        created_at: b.created_at,
    }
}

pub(crate) fn facilitator_view(f: engine::Facilitator) -> facilitator::FacilitatorView {
    facilitator::FacilitatorView {
        id: f.id.to_string(),
        name: f.name,
        role: f.role,
        email: f.email,
        phone: f.phone,
        base_fee_minor: f.base_fee.minor(),
        commission_per_mille: f.commission_per_mille,
        created_at: f.created_at,
    }
}

pub(crate) fn event_view(e: engine::Event) -> event::EventView {
    event::EventView {
        id: e.id.to_string(),
        title: e.title,
        description: e.description,
        category: e.category,
        default_price_minor: e.default_price.minor(),
        default_location: e.default_location,
        status: map_event_status(e.status),
        created_at: e.created_at,
    }
}

pub(crate) fn session_view(s: engine::EventSession) -> event::SessionView {
    event::SessionView {
        id: s.id.to_string(),
        event_id: s.event_id.to_string(),
        date: s.date,
        time: s.time,
        location: s.location,
        price_minor: s.price.minor(),
        capacity: s.capacity,
        status: map_session_status(s.status),
        created_at: s.created_at,
    }
}

pub(crate) fn campaign_view(c: engine::Campaign) -> campaign::CampaignView {
    campaign::CampaignView {
        id: c.id.to_string(),
        name: c.name,
        campaign_type: c.campaign_type,
        status: map_campaign_status(c.status),
        start_date: c.start_date,
        end_date: c.end_date,
        discount_per_mille: c.discount_per_mille,
        target_audience: c.target_audience,
        usage_count: c.usage_count,
        revenue_minor: c.revenue.minor(),
        created_at: c.created_at,
    }
}

pub(crate) fn payment_view(p: engine::Payment, parent_number: Option<String>) -> billing::PaymentView {
    billing::PaymentView {
        id: p.id.to_string(),
        payment_number: p.payment_number,
        invoice_id: p.invoice_id().map(|id| id.to_string()),
        purchase_order_id: p.purchase_order_id().map(|id| id.to_string()),
        parent_number,
        amount_minor: p.amount.minor(),
        payment_method: p.payment_method,
        payment_date: p.payment_date,
        reference_number: p.reference_number,
        notes: p.notes,
        created_at: p.created_at,
    }
}

pub(crate) fn invoice_view(
    invoice: engine::Invoice,
    payments: Vec<engine::Payment>,
) -> billing::InvoiceView {
    let number = invoice.invoice_number.clone();
    billing::InvoiceView {
        id: invoice.id.to_string(),
        invoice_number: invoice.invoice_number,
        customer_id: invoice.customer_id.map(|id| id.to_string()),
        customer_name: invoice.customer_name,
        customer_email: invoice.customer_email,
        customer_phone: invoice.customer_phone,
        due_date: invoice.due_date,
        subtotal_minor: invoice.subtotal.minor(),
        tax_minor: invoice.tax.minor(),
        total_minor: invoice.total.minor(),
        amount_paid_minor: invoice.amount_paid.minor(),
        amount_due_minor: invoice.amount_due.minor(),
        currency: map_currency(invoice.currency),
        status: map_document_status(invoice.status),
        notes: invoice.notes,
        terms: invoice.terms,
        created_at: invoice.created_at,
        payments: payments
            .into_iter()
            .map(|p| payment_view(p, Some(number.clone())))
            .collect(),
    }
}

pub(crate) fn purchase_order_view(
    po: engine::PurchaseOrder,
    payments: Vec<engine::Payment>,
) -> billing::PurchaseOrderView {
    let number = po.po_number.clone();
    billing::PurchaseOrderView {
        id: po.id.to_string(),
        po_number: po.po_number,
        facilitator_id: po.facilitator_id.to_string(),
        due_date: po.due_date,
        subtotal_minor: po.subtotal.minor(),
        tax_minor: po.tax.minor(),
        total_minor: po.total.minor(),
        amount_paid_minor: po.amount_paid.minor(),
        amount_due_minor: po.amount_due.minor(),
        currency: map_currency(po.currency),
        status: map_document_status(po.status),
        notes: po.notes,
        terms: po.terms,
        created_at: po.created_at,
        payments: payments
            .into_iter()
            .map(|p| payment_view(p, Some(number.clone())))
            .collect(),
    }
}

pub(crate) fn financial_data_view(data: engine::FinancialData) -> reports::FinancialData {
    reports::FinancialData {
        revenue_minor: data.revenue.minor(),
        facilitator_costs_minor: data.facilitator_costs.minor(),
        gross_profit_minor: data.gross_profit.minor(),
        outstanding_invoices: data.outstanding_invoices,
        season_breakdown: data
            .season_breakdown
            .into_iter()
            .map(|(key, totals)| {
                (
                    key,
                    reports::SeasonTotals {
                        total_revenue_minor: totals.total_revenue.minor(),
                        facilitator_costs_minor: totals.facilitator_costs.minor(),
                        booking_count: totals.booking_count,
                    },
                )
            })
            .collect(),
        revenue_over_time: data
            .revenue_over_time
            .into_iter()
            .map(|point| reports::MonthlyRevenue {
                month: point.month,
                revenue_minor: point.revenue.minor(),
                profit_minor: point.profit.minor(),
            })
            .collect(),
        top_services: data
            .top_services
            .into_iter()
            .map(|service| reports::ServiceRevenue {
                name: service.name,
                revenue_minor: service.revenue.minor(),
                bookings: service.bookings,
            })
            .collect(),
    }
}

pub(crate) fn financial_summary_view(s: engine::FinancialSummary) -> reports::FinancialSummary {
    reports::FinancialSummary {
        invoice_count: s.invoice_count,
        invoices_total_minor: s.invoices_total.minor(),
        invoices_paid_minor: s.invoices_paid.minor(),
        invoices_due_minor: s.invoices_due.minor(),
        paid_invoices: s.paid_invoices,
        overdue_invoices: s.overdue_invoices,
        purchase_order_count: s.purchase_order_count,
        purchase_orders_total_minor: s.purchase_orders_total.minor(),
        purchase_orders_paid_minor: s.purchase_orders_paid.minor(),
        purchase_orders_due_minor: s.purchase_orders_due.minor(),
        paid_purchase_orders: s.paid_purchase_orders,
        payment_count: s.payment_count,
        payments_total_minor: s.payments_total.minor(),
    }
}

//! Invoice admin endpoints.

use api_types::{
    Ack, DeleteRequest,
    billing::{InvoiceNew, InvoiceResponse, InvoicesResponse, StatusOverride},
};
use axum::{Json, extract::State};
use engine::Money;

use crate::{ServerError, server::ServerState, views};

pub async fn list(State(state): State<ServerState>) -> Result<Json<InvoicesResponse>, ServerError> {
    let invoices = state.engine.list_invoices().await?;
    Ok(Json(InvoicesResponse {
        success: true,
        invoices: invoices
            .into_iter()
            .map(|(invoice, payments)| views::invoice_view(invoice, payments))
            .collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InvoiceNew>,
) -> Result<Json<InvoiceResponse>, ServerError> {
    let invoice = state
        .engine
        .create_invoice(engine::NewInvoice {
            customer_id: payload.customer_id,
            customer_name: payload.customer_name,
            customer_email: payload.customer_email,
            customer_phone: payload.customer_phone,
            due_date: payload.due_date,
            subtotal: payload.subtotal_minor.map(Money::new),
            tax: payload.tax_minor.map(Money::new),
            total: payload.total_minor.map(Money::new),
            currency: payload.currency.map(views::currency_from_api),
            notes: payload.notes,
            terms: payload.terms,
        })
        .await?;
    Ok(Json(InvoiceResponse {
        success: true,
        invoice: views::invoice_view(invoice, Vec::new()),
    }))
}

/// Admin escape hatch: free-form status overwrite, distinct from the derived
/// payment-recording path.
pub async fn override_status(
    State(state): State<ServerState>,
    Json(payload): Json<StatusOverride>,
) -> Result<Json<InvoiceResponse>, ServerError> {
    let invoice = state
        .engine
        .override_invoice_status(&payload.id, views::document_status_from_api(payload.status))
        .await?;
    Ok(Json(InvoiceResponse {
        success: true,
        invoice: views::invoice_view(invoice, Vec::new()),
    }))
}

pub async fn remove(
    State(state): State<ServerState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_invoice(&payload.id).await?;
    Ok(Json(Ack { success: true }))
}

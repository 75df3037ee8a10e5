//! Payment admin endpoints.

use api_types::{
    Ack, DeleteRequest,
    billing::{PaymentNew, PaymentResponse, PaymentUpdate, PaymentsResponse},
};
use axum::{Json, extract::State};
use engine::Money;

use crate::{ServerError, server::ServerState, views};

pub async fn list(State(state): State<ServerState>) -> Result<Json<PaymentsResponse>, ServerError> {
    let payments = state.engine.list_payments().await?;
    Ok(Json(PaymentsResponse {
        success: true,
        payments: payments
            .into_iter()
            .map(|(payment, parent_number)| views::payment_view(payment, parent_number))
            .collect(),
    }))
}

/// Records a payment against exactly one of `invoice_id` /
/// `purchase_order_id`. The parent's balances move in the same transaction.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentNew>,
) -> Result<Json<PaymentResponse>, ServerError> {
    let cmd = engine::NewPayment {
        amount: payload.amount_minor.map(Money::new),
        payment_method: payload.payment_method,
        payment_date: payload.payment_date,
        reference_number: payload.reference_number,
        notes: payload.notes,
    };

    let (payment, parent_number) = match (payload.invoice_id, payload.purchase_order_id) {
        (Some(invoice_id), None) => {
            let (invoice, payment) = state.engine.record_invoice_payment(&invoice_id, cmd).await?;
            (payment, invoice.invoice_number)
        }
        (None, Some(po_id)) => {
            let (po, payment) = state.engine.record_po_payment(&po_id, cmd).await?;
            (payment, po.po_number)
        }
        (None, None) => {
            return Err(ServerError::Generic(
                "either invoice_id or purchase_order_id is required".to_string(),
            ));
        }
        (Some(_), Some(_)) => {
            return Err(ServerError::Generic(
                "provide only one of invoice_id or purchase_order_id".to_string(),
            ));
        }
    };

    Ok(Json(PaymentResponse {
        success: true,
        payment: views::payment_view(payment, Some(parent_number)),
    }))
}

/// Edits payment metadata; parent balances are never re-adjusted.
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentUpdate>,
) -> Result<Json<PaymentResponse>, ServerError> {
    let payment = state
        .engine
        .update_payment(
            &payload.id,
            engine::PaymentPatch {
                payment_method: payload.payment_method,
                payment_date: payload.payment_date,
                reference_number: payload.reference_number,
                notes: payload.notes,
            },
        )
        .await?;
    Ok(Json(PaymentResponse {
        success: true,
        payment: views::payment_view(payment, None),
    }))
}

/// Deletes a payment row; parent balances stay as posted.
pub async fn remove(
    State(state): State<ServerState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_payment(&payload.id).await?;
    Ok(Json(Ack { success: true }))
}

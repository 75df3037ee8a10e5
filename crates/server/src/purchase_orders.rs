//! Purchase-order admin endpoints.

use api_types::{
    Ack, DeleteRequest,
    billing::{PurchaseOrderNew, PurchaseOrderResponse, PurchaseOrdersResponse, StatusOverride},
};
use axum::{Json, extract::State};
use engine::Money;

use crate::{ServerError, server::ServerState, views};

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<PurchaseOrdersResponse>, ServerError> {
    let purchase_orders = state.engine.list_purchase_orders().await?;
    Ok(Json(PurchaseOrdersResponse {
        success: true,
        purchase_orders: purchase_orders
            .into_iter()
            .map(|(po, payments)| views::purchase_order_view(po, payments))
            .collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PurchaseOrderNew>,
) -> Result<Json<PurchaseOrderResponse>, ServerError> {
    let po = state
        .engine
        .create_purchase_order(engine::NewPurchaseOrder {
            facilitator_id: payload.facilitator_id,
            due_date: payload.due_date,
            subtotal: payload.subtotal_minor.map(Money::new),
            tax: payload.tax_minor.map(Money::new),
            total: payload.total_minor.map(Money::new),
            currency: payload.currency.map(views::currency_from_api),
            notes: payload.notes,
            terms: payload.terms,
        })
        .await?;
    Ok(Json(PurchaseOrderResponse {
        success: true,
        purchase_order: views::purchase_order_view(po, Vec::new()),
    }))
}

/// Admin escape hatch: free-form status overwrite.
pub async fn override_status(
    State(state): State<ServerState>,
    Json(payload): Json<StatusOverride>,
) -> Result<Json<PurchaseOrderResponse>, ServerError> {
    let po = state
        .engine
        .override_po_status(&payload.id, views::document_status_from_api(payload.status))
        .await?;
    Ok(Json(PurchaseOrderResponse {
        success: true,
        purchase_order: views::purchase_order_view(po, Vec::new()),
    }))
}

pub async fn remove(
    State(state): State<ServerState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_purchase_order(&payload.id).await?;
    Ok(Json(Ack { success: true }))
}

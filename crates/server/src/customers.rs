//! Customer admin endpoints.

use api_types::{
    Ack, DeleteRequest,
    user::{CustomerNew, CustomerResponse, CustomerUpdate, CustomersResponse},
};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState, views};

/// Lists customers with computed booking totals.
pub async fn list(State(state): State<ServerState>) -> Result<Json<CustomersResponse>, ServerError> {
    let customers = state.engine.list_customers().await?;
    Ok(Json(CustomersResponse {
        success: true,
        customers: customers
            .into_iter()
            .map(|(user, totals)| views::customer_view(user, totals))
            .collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerNew>,
) -> Result<Json<CustomerResponse>, ServerError> {
    let user = state
        .engine
        .create_customer(engine::NewCustomer {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
        })
        .await?;
    Ok(Json(CustomerResponse {
        success: true,
        customer: views::user_view(user),
    }))
}

pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerUpdate>,
) -> Result<Json<CustomerResponse>, ServerError> {
    let user = state
        .engine
        .update_customer(
            &payload.id,
            engine::CustomerPatch {
                name: payload.name,
                email: payload.email,
                phone: payload.phone,
            },
        )
        .await?;
    Ok(Json(CustomerResponse {
        success: true,
        customer: views::user_view(user),
    }))
}

/// Blocked with a conflict while bookings reference the customer.
pub async fn remove(
    State(state): State<ServerState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_customer(&payload.id).await?;
    Ok(Json(Ack { success: true }))
}

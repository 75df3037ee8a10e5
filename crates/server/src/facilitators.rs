//! Facilitator admin endpoints.

use api_types::{
    Ack, DeleteRequest,
    facilitator::{FacilitatorNew, FacilitatorResponse, FacilitatorUpdate, FacilitatorsResponse},
};
use axum::{Json, extract::State};
use engine::Money;

use crate::{ServerError, server::ServerState, views};

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<FacilitatorsResponse>, ServerError> {
    let facilitators = state.engine.list_facilitators().await?;
    Ok(Json(FacilitatorsResponse {
        success: true,
        facilitators: facilitators
            .into_iter()
            .map(views::facilitator_view)
            .collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FacilitatorNew>,
) -> Result<Json<FacilitatorResponse>, ServerError> {
    let facilitator = state
        .engine
        .create_facilitator(engine::NewFacilitator {
            name: payload.name,
            role: payload.role,
            email: payload.email,
            phone: payload.phone,
            base_fee: payload.base_fee_minor.map(Money::new),
            commission_per_mille: payload.commission_per_mille,
        })
        .await?;
    Ok(Json(FacilitatorResponse {
        success: true,
        facilitator: views::facilitator_view(facilitator),
    }))
}

pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<FacilitatorUpdate>,
) -> Result<Json<FacilitatorResponse>, ServerError> {
    let facilitator = state
        .engine
        .update_facilitator(
            &payload.id,
            engine::FacilitatorPatch {
                name: payload.name,
                role: payload.role,
                email: payload.email,
                phone: payload.phone,
                base_fee: payload.base_fee_minor.map(Money::new),
                commission_per_mille: payload.commission_per_mille,
            },
        )
        .await?;
    Ok(Json(FacilitatorResponse {
        success: true,
        facilitator: views::facilitator_view(facilitator),
    }))
}

pub async fn remove(
    State(state): State<ServerState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_facilitator(&payload.id).await?;
    Ok(Json(Ack { success: true }))
}

//! Campaign admin endpoints.

use api_types::{
    Ack, DeleteRequest,
    campaign::{CampaignNew, CampaignResponse, CampaignUpdate, CampaignsResponse},
};
use axum::{Json, extract::State};
use engine::Money;

use crate::{ServerError, server::ServerState, views};

pub async fn list(State(state): State<ServerState>) -> Result<Json<CampaignsResponse>, ServerError> {
    let campaigns = state.engine.list_campaigns().await?;
    Ok(Json(CampaignsResponse {
        success: true,
        campaigns: campaigns.into_iter().map(views::campaign_view).collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CampaignNew>,
) -> Result<Json<CampaignResponse>, ServerError> {
    let campaign = state
        .engine
        .create_campaign(engine::NewCampaign {
            name: payload.name,
            campaign_type: payload.campaign_type,
            status: payload.status.map(views::campaign_status_from_api),
            start_date: payload.start_date,
            end_date: payload.end_date,
            discount_per_mille: payload.discount_per_mille,
            target_audience: payload.target_audience,
        })
        .await?;
    Ok(Json(CampaignResponse {
        success: true,
        campaign: views::campaign_view(campaign),
    }))
}

pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<CampaignUpdate>,
) -> Result<Json<CampaignResponse>, ServerError> {
    let campaign = state
        .engine
        .update_campaign(
            &payload.id,
            engine::CampaignPatch {
                name: payload.name,
                campaign_type: payload.campaign_type,
                status: payload.status.map(views::campaign_status_from_api),
                start_date: payload.start_date,
                end_date: payload.end_date,
                discount_per_mille: payload.discount_per_mille,
                target_audience: payload.target_audience,
                usage_count: payload.usage_count,
                revenue: payload.revenue_minor.map(Money::new),
            },
        )
        .await?;
    Ok(Json(CampaignResponse {
        success: true,
        campaign: views::campaign_view(campaign),
    }))
}

pub async fn remove(
    State(state): State<ServerState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_campaign(&payload.id).await?;
    Ok(Json(Ack { success: true }))
}

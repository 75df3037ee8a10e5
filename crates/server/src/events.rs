//! Event admin endpoints.

use api_types::{
    Ack, DeleteRequest,
    event::{EventNew, EventResponse, EventUpdate, EventsResponse},
};
use axum::{Json, extract::State};
use engine::Money;

use crate::{ServerError, server::ServerState, views};

pub async fn list(State(state): State<ServerState>) -> Result<Json<EventsResponse>, ServerError> {
    let events = state.engine.list_events().await?;
    Ok(Json(EventsResponse {
        success: true,
        events: events.into_iter().map(views::event_view).collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EventNew>,
) -> Result<Json<EventResponse>, ServerError> {
    let event = state
        .engine
        .create_event(engine::NewEvent {
            title: payload.title,
            description: payload.description,
            category: payload.category,
            default_price: payload.default_price_minor.map(Money::new),
            default_location: payload.default_location,
            status: payload.status.map(views::event_status_from_api),
        })
        .await?;
    Ok(Json(EventResponse {
        success: true,
        event: views::event_view(event),
    }))
}

pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<EventUpdate>,
) -> Result<Json<EventResponse>, ServerError> {
    let event = state
        .engine
        .update_event(
            &payload.id,
            engine::EventPatch {
                title: payload.title,
                description: payload.description,
                category: payload.category,
                default_price: payload.default_price_minor.map(Money::new),
                default_location: payload.default_location,
                status: payload.status.map(views::event_status_from_api),
            },
        )
        .await?;
    Ok(Json(EventResponse {
        success: true,
        event: views::event_view(event),
    }))
}

pub async fn remove(
    State(state): State<ServerState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_event(&payload.id).await?;
    Ok(Json(Ack { success: true }))
}

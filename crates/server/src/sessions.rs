//! Event-session admin endpoints.

use api_types::{
    Ack, DeleteRequest,
    event::{SessionFilter, SessionNew, SessionResponse, SessionUpdate, SessionsResponse},
};
use axum::{
    Json,
    extract::{Query, State},
};
use engine::Money;

use crate::{ServerError, server::ServerState, views};

/// Lists sessions, optionally filtered with `?eventId=`.
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<SessionFilter>,
) -> Result<Json<SessionsResponse>, ServerError> {
    let sessions = state
        .engine
        .list_sessions(filter.event_id.as_deref())
        .await?;
    Ok(Json(SessionsResponse {
        success: true,
        sessions: sessions.into_iter().map(views::session_view).collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SessionNew>,
) -> Result<Json<SessionResponse>, ServerError> {
    let session = state
        .engine
        .create_session(engine::NewSession {
            event_id: payload.event_id,
            date: payload.date,
            time: payload.time,
            location: payload.location,
            price: payload.price_minor.map(Money::new),
            capacity: payload.capacity,
            status: payload.status.map(views::session_status_from_api),
        })
        .await?;
    Ok(Json(SessionResponse {
        success: true,
        session: views::session_view(session),
    }))
}

pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<SessionUpdate>,
) -> Result<Json<SessionResponse>, ServerError> {
    let session = state
        .engine
        .update_session(
            &payload.id,
            engine::SessionPatch {
                date: payload.date,
                time: payload.time,
                location: payload.location,
                price: payload.price_minor.map(Money::new),
                capacity: payload.capacity,
                status: payload.status.map(views::session_status_from_api),
            },
        )
        .await?;
    Ok(Json(SessionResponse {
        success: true,
        session: views::session_view(session),
    }))
}

pub async fn remove(
    State(state): State<ServerState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_session(&payload.id).await?;
    Ok(Json(Ack { success: true }))
}

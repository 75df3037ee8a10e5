//! Public read endpoints: no session required.

use api_types::event::{EventsResponse, SessionsResponse};
use axum::{Json, extract::State};
use chrono::Utc;

use crate::{ServerError, server::ServerState, views};

/// Active events, the public catalog.
pub async fn events(State(state): State<ServerState>) -> Result<Json<EventsResponse>, ServerError> {
    let events = state.engine.list_active_events().await?;
    Ok(Json(EventsResponse {
        success: true,
        events: events.into_iter().map(views::event_view).collect(),
    }))
}

/// Upcoming scheduled sessions, soonest first.
pub async fn sessions(
    State(state): State<ServerState>,
) -> Result<Json<SessionsResponse>, ServerError> {
    let sessions = state
        .engine
        .list_upcoming_sessions(Utc::now().date_naive())
        .await?;
    Ok(Json(SessionsResponse {
        success: true,
        sessions: sessions.into_iter().map(views::session_view).collect(),
    }))
}

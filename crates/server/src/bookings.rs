//! Booking admin endpoints.

use api_types::{
    Ack, DeleteRequest,
    booking::{BookingNew, BookingResponse, BookingUpdate, BookingsResponse},
};
use axum::{Json, extract::State};
use engine::Money;

use crate::{ServerError, server::ServerState, views};

pub async fn list(State(state): State<ServerState>) -> Result<Json<BookingsResponse>, ServerError> {
    let bookings = state.engine.list_bookings().await?;
    Ok(Json(BookingsResponse {
        success: true,
        bookings: bookings.into_iter().map(views::booking_view).collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BookingNew>,
) -> Result<Json<BookingResponse>, ServerError> {
    let cmd = engine::NewBooking {
        session_id: payload.session_id,
        customer_name: payload.customer_name,
        customer_email: payload.customer_email,
        customer_phone: payload.customer_phone,
        number_of_people: payload.number_of_people,
        total_price: payload.total_price_minor.map(Money::new),
        ojasen_fee: payload.ojasen_fee_minor.map(Money::new),
        facilitator_fee: payload.facilitator_fee_minor.map(Money::new),
        facilitator_id: payload.facilitator_id,
        user_id: payload.user_id,
        event_name: payload.event_name,
        event_date: payload.event_date,
        status: payload.status.map(views::booking_status_from_api),
        special_requests: payload.special_requests,
    };
    let booking = state.engine.create_booking(cmd).await?;
    Ok(Json(BookingResponse {
        success: true,
        booking: views::booking_view(booking),
    }))
}

pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<BookingUpdate>,
) -> Result<Json<BookingResponse>, ServerError> {
    let patch = engine::BookingPatch {
        customer_name: payload.customer_name,
        customer_email: payload.customer_email,
        customer_phone: payload.customer_phone,
        number_of_people: payload.number_of_people,
        total_price: payload.total_price_minor.map(Money::new),
        ojasen_fee: payload.ojasen_fee_minor.map(Money::new),
        facilitator_fee: payload.facilitator_fee_minor.map(Money::new),
        facilitator_id: payload.facilitator_id,
        status: payload.status.map(views::booking_status_from_api),
        special_requests: payload.special_requests,
    };
    let booking = state.engine.update_booking(&payload.id, patch).await?;
    Ok(Json(BookingResponse {
        success: true,
        booking: views::booking_view(booking),
    }))
}

pub async fn remove(
    State(state): State<ServerState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_booking(&payload.id).await?;
    Ok(Json(Ack { success: true }))
}

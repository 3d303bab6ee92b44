use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Form, Router};
use serde_json::json;
use tracing::warn;

use crate::booking::{BookingError, BookingService, SlotRequest};
use crate::controller::AppState;

pub fn router(app_state: AppState) -> Router {
    let booking_service = app_state.booking_service.clone();

    Router::new()
        .route("/booked_dates", get(get_booked_dates))
        .route("/booked_dates_times", get(get_booked_dates_times))
        .route("/book_demo", post(book_demo))
        .route_layer(Extension(booking_service))
}

pub async fn book_demo(
    Extension(booking_service): Extension<Arc<BookingService>>,
    Form(form): Form<SlotRequest>,
) -> impl IntoResponse {
    return match booking_service.book_slot(form).await {
        Ok(outcome) => {
            let message = if outcome.confirmation_sent {
                "Demo booked successfully! Confirmation sent to your email."
            } else {
                "Demo booked successfully, but the confirmation email could not be sent."
            };
            (
                StatusCode::OK,
                json!({ "message": message, "reservation": outcome.reservation }).to_string(),
            )
                .into_response()
        }
        Err(BookingError::SlotTaken) => (
            StatusCode::CONFLICT,
            "Selected date and time is already booked. Please choose another slot.",
        )
            .into_response(),
        Err(BookingError::InvalidDate) => (
            StatusCode::BAD_REQUEST,
            "Meeting date must be a valid YYYY-MM-DD calendar date.",
        )
            .into_response(),
        Err(BookingError::Store(e)) => {
            warn!("Something went wrong booking the demo due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to book your demo, please try again.",
            )
                .into_response()
        }
    };
}

/// One ISO date per reservation, deliberately not deduplicated. The booking
/// page greys a date out once every slot on it is taken, which it works out
/// from the slot listing below.
pub async fn get_booked_dates(
    Extension(booking_service): Extension<Arc<BookingService>>,
) -> impl IntoResponse {
    return match booking_service.booked_dates().await {
        Ok(dates) => (StatusCode::OK, json!(dates).to_string()).into_response(),
        Err(e) => {
            warn!("Something went wrong retrieving booked dates due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve booked dates, please try again.",
            )
                .into_response()
        }
    };
}

pub async fn get_booked_dates_times(
    Extension(booking_service): Extension<Arc<BookingService>>,
) -> impl IntoResponse {
    return match booking_service.booked_slots_by_date().await {
        Ok(slots) => (StatusCode::OK, json!(slots).to_string()).into_response(),
        Err(e) => {
            warn!("Something went wrong retrieving booked slots due to: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve booked slots, please try again.",
            )
                .into_response()
        }
    };
}

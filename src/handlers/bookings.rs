use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{BookingListItem, BookingRecord, CreateBookingRequest};
use crate::services::booking;
use crate::services::calendar::{self, UnavailableDays};
use crate::services::pricing::Quote;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceQuery {
    pub service_id: Option<String>,
}

impl ServiceQuery {
    fn service_id(&self) -> Result<&str, AppError> {
        self.service_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(AppError::MissingParam("serviceId"))
    }
}

// POST /bookings
#[derive(Serialize)]
pub struct CreateBookingResponse {
    booking: BookingRecord,
    days: i64,
    quote: Quote,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::InvalidBody(e.body_text()))?;

    let created = {
        let mut db = state.db()?;
        booking::create_booking(&mut db, &req)
    };

    let created = created.inspect_err(|e| {
        tracing::debug!(error = %e, service_id = ?req.service_id, "booking rejected");
    })?;

    Ok(Json(CreateBookingResponse {
        booking: created.booking.into(),
        days: created.days,
        quote: created.quote,
    }))
}

// GET /bookings?serviceId=
#[derive(Serialize)]
pub struct ListBookingsResponse {
    bookings: Vec<BookingListItem>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ServiceQuery>,
) -> Result<Json<ListBookingsResponse>, AppError> {
    let service_id = query.service_id()?;

    let bookings = {
        let db = state.db()?;
        booking::list_bookings(&db, service_id)?
    };

    Ok(Json(ListBookingsResponse {
        bookings: bookings.into_iter().map(BookingListItem::from).collect(),
    }))
}

// GET /bookings/unavailable?serviceId=
pub async fn unavailable_days(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ServiceQuery>,
) -> Result<Json<UnavailableDays>, AppError> {
    let service_id = query.service_id()?;

    let bookings = {
        let db = state.db()?;
        booking::list_bookings(&db, service_id)?
    };

    Ok(Json(calendar::unavailable_days(
        &bookings,
        Utc::now().date_naive(),
    )))
}

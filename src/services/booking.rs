use chrono::{DateTime, Timelike, Utc};
use rusqlite::{Connection, TransactionBehavior};

use crate::db::queries;
use crate::models::{find_service, Booking, CreateBookingRequest, Service};
use crate::services::pricing::{self, Quote};
use crate::services::validation::{self, Stay, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Service not found")]
    ServiceNotFound(String),

    #[error("Service is not available for booking")]
    ServiceInactive(String),

    #[error("Dates not available")]
    DatesUnavailable,

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for BookingError {
    fn from(e: rusqlite::Error) -> Self {
        BookingError::Storage(e.into())
    }
}

#[derive(Debug)]
pub struct CreatedBooking {
    pub booking: Booking,
    pub days: i64,
    pub quote: Quote,
}

pub fn bookable_service(service_id: &str) -> Result<&'static Service, BookingError> {
    let service = find_service(service_id)
        .ok_or_else(|| BookingError::ServiceNotFound(service_id.to_string()))?;
    if !service.active {
        return Err(BookingError::ServiceInactive(service_id.to_string()));
    }
    Ok(service)
}

pub fn check_available(
    conn: &Connection,
    service_id: &str,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
) -> anyhow::Result<bool> {
    Ok(queries::find_conflict(conn, service_id, start, end)?.is_none())
}

/// Validates a stay for a bookable service and prices it. No availability
/// check, nothing is written.
pub fn quote_stay(
    service_id: &str,
    start_local: &str,
    end_local: &str,
) -> Result<(Stay, Quote), BookingError> {
    let service = bookable_service(service_id)?;
    let stay = validation::validate_interval(start_local, end_local, None)?;
    let quote = pricing::quote(service, stay.days);
    Ok((stay, quote))
}

/// Runs the whole create path. The overlap check and the insert share one
/// `BEGIN IMMEDIATE` transaction, so a competing writer cannot slip in
/// between them.
pub fn create_booking(
    conn: &mut Connection,
    req: &CreateBookingRequest,
) -> Result<CreatedBooking, BookingError> {
    let fields = validation::require(&[
        req.service_id.as_deref(),
        req.start_at.as_deref(),
        req.end_at.as_deref(),
        req.customer_name.as_deref(),
        req.customer_email.as_deref(),
        req.customer_phone.as_deref(),
    ])?;
    let &[service_id, start_at, end_at, name, email, phone] = fields.as_slice() else {
        return Err(ValidationError::MissingFields.into());
    };

    let stay = validation::validate_interval(start_at, end_at, req.time_zone.as_deref())?;
    let contact = validation::validate_contact(name, email, phone)?;
    let service = bookable_service(service_id)?;

    let booking = Booking {
        id: uuid::Uuid::new_v4().to_string(),
        service_id: service.id.to_string(),
        start_date: stay.start,
        end_date: stay.end,
        start_local: start_at.to_string(),
        end_local: end_at.to_string(),
        time_zone: stay.time_zone.clone(),
        customer_name: contact.name,
        customer_email: contact.email,
        customer_phone: contact.phone,
        created_at: Utc::now().with_nanosecond(0).unwrap_or_else(Utc::now),
    };

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    if !check_available(&tx, &booking.service_id, &booking.start_date, &booking.end_date)? {
        tracing::debug!(service_id = %booking.service_id, "requested dates overlap an existing booking");
        return Err(BookingError::DatesUnavailable);
    }

    if let Err(e) = queries::insert_booking(&tx, &booking) {
        if queries::is_constraint_violation(&e) {
            tracing::warn!(service_id = %booking.service_id, "overlap trigger rejected booking insert");
            return Err(BookingError::DatesUnavailable);
        }
        return Err(e.into());
    }

    tx.commit()?;

    tracing::info!(
        booking_id = %booking.id,
        service_id = %booking.service_id,
        days = stay.days,
        "booking created"
    );

    Ok(CreatedBooking {
        quote: pricing::quote(service, stay.days),
        days: stay.days,
        booking,
    })
}

pub fn list_bookings(conn: &Connection, service_id: &str) -> anyhow::Result<Vec<Booking>> {
    queries::list_bookings_for_service(conn, service_id)
}

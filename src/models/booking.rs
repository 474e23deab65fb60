use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A reserved `[start_date, end_date)` interval for one service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: String,
    pub service_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub start_local: String,
    pub end_local: String,
    pub time_zone: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /bookings`. Every field is optional so that absent
/// values surface as "Missing fields" rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub service_id: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub time_zone: Option<String>,
}

/// Booking as returned from the create endpoint, instants in full ISO-8601 UTC.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: String,
    pub start_date: String,
    pub end_date: String,
    pub service_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub created_at: String,
    pub start_local: String,
    pub end_local: String,
    pub time_zone: String,
}

impl From<Booking> for BookingRecord {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            start_date: to_iso(&b.start_date),
            end_date: to_iso(&b.end_date),
            service_id: b.service_id,
            customer_name: b.customer_name,
            customer_email: b.customer_email,
            customer_phone: b.customer_phone,
            created_at: to_iso(&b.created_at),
            start_local: b.start_local,
            end_local: b.end_local,
            time_zone: b.time_zone,
        }
    }
}

/// Booking as returned from the listing endpoint, dates truncated to the day.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListItem {
    pub id: String,
    pub start_date: String,
    pub end_date: String,
    pub service_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub created_at: String,
}

impl From<Booking> for BookingListItem {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            start_date: b.start_date.format("%Y-%m-%d").to_string(),
            end_date: b.end_date.format("%Y-%m-%d").to_string(),
            service_id: b.service_id,
            customer_name: b.customer_name,
            customer_email: b.customer_email,
            customer_phone: b.customer_phone,
            created_at: to_iso(&b.created_at),
        }
    }
}

pub fn to_iso(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

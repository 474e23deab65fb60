use anyhow::Context;
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::Booking;

/// Storage format for instants. Fixed width UTC, so text order is time order.
const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const BOOKING_COLUMNS: &str = "id, service_id, start_at, end_at, start_local, end_local, time_zone, \
     customer_name, customer_email, customer_phone, created_at";

// ── Bookings ──

pub fn insert_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, service_id, start_at, end_at, start_local, end_local, time_zone,
                               customer_name, customer_email, customer_phone, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            booking.id,
            booking.service_id,
            format_ts(&booking.start_date),
            format_ts(&booking.end_date),
            booking.start_local,
            booking.end_local,
            booking.time_zone,
            booking.customer_name,
            booking.customer_email,
            booking.customer_phone,
            format_ts(&booking.created_at),
        ],
    )?;
    Ok(())
}

/// Id of any booking for `service_id` whose interval overlaps `[start, end)`.
pub fn find_conflict(
    conn: &Connection,
    service_id: &str,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
) -> anyhow::Result<Option<String>> {
    let result = conn.query_row(
        "SELECT id FROM bookings
         WHERE service_id = ?1 AND start_at < ?2 AND end_at > ?3
         LIMIT 1",
        params![service_id, format_ts(end), format_ts(start)],
        |row| row.get(0),
    );

    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_bookings_for_service(
    conn: &Connection,
    service_id: &str,
) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE service_id = ?1 ORDER BY start_at ASC"
    ))?;

    let rows = stmt.query_map(params![service_id], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

/// True when `err` is SQLite rejecting a row on a constraint, which for
/// `bookings` includes the overlap trigger.
pub fn is_constraint_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let start_at: String = row.get(2)?;
    let end_at: String = row.get(3)?;
    let created_at: String = row.get(10)?;

    Ok(Booking {
        id: row.get(0)?,
        service_id: row.get(1)?,
        start_date: parse_ts(&start_at)?,
        end_date: parse_ts(&end_at)?,
        start_local: row.get(4)?,
        end_local: row.get(5)?,
        time_zone: row.get(6)?,
        customer_name: row.get(7)?,
        customer_email: row.get(8)?,
        customer_phone: row.get(9)?,
        created_at: parse_ts(&created_at)?,
    })
}

fn format_ts(dt: &DateTime<Utc>) -> String {
    dt.format(TS_FORMAT).to_string()
}

fn parse_ts(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, TS_FORMAT)
        .with_context(|| format!("malformed timestamp in bookings table: {s}"))?;
    Ok(naive.and_utc())
}

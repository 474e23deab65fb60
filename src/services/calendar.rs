use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::models::Booking;

/// Days a date picker should disable for one service.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnavailableDays {
    /// First selectable day. Everything earlier is in the past or today.
    pub not_before: NaiveDate,
    pub days: Vec<NaiveDate>,
}

/// Calendar days touched by `[start, end)`. A booking that ends exactly at
/// midnight does not take that day.
pub fn booked_days(booking: &Booking) -> Vec<NaiveDate> {
    let first = booking.start_date.date_naive();
    let mut last = booking.end_date.date_naive();
    if booking.end_date.time() == NaiveTime::MIN && last > first {
        if let Some(prev) = last.pred_opt() {
            last = prev;
        }
    }

    first.iter_days().take_while(|d| *d <= last).collect()
}

pub fn unavailable_days(bookings: &[Booking], today: NaiveDate) -> UnavailableDays {
    let not_before = today.succ_opt().unwrap_or(today);

    let days: BTreeSet<NaiveDate> = bookings
        .iter()
        .flat_map(booked_days)
        .filter(|d| *d >= not_before)
        .collect();

    UnavailableDays {
        not_before,
        days: days.into_iter().collect(),
    }
}

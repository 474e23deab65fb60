//! Input rules shared by every entry point that accepts a booking: the create
//! handler, the quote endpoint, and any interactive client that wants the same
//! answers before submitting. Nothing here touches storage.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const MIN_STAY_DAYS: i64 = 3;
pub const DEFAULT_TIME_ZONE: &str = "America/Denver";

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing fields")]
    MissingFields,

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid date/time")]
    InvalidDateTime,

    #[error("Invalid date range")]
    InvalidRange,

    #[error("Minimum booking is {} days", MIN_STAY_DAYS)]
    BelowMinimumStay,

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid phone number")]
    InvalidPhone,
}

/// A validated `[start, end)` interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stay {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub days: i64,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Parses a local date-time as picked in the calendar widget.
///
/// Accepts `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS` and a bare
/// `YYYY-MM-DD` (midnight). The wall-clock value is taken as UTC.
pub fn parse_local_datetime(s: &str) -> Result<DateTime<Utc>, ValidationError> {
    let s = s.trim();
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|_| ValidationError::InvalidDateTime)?;
    Ok(naive.and_utc())
}

/// Whole days covered by `[start, end)`, rounding any partial day up.
/// Zero when `end <= start`.
pub fn days_ceil(start: &DateTime<Utc>, end: &DateTime<Utc>) -> i64 {
    let ms = (*end - *start).num_milliseconds();
    if ms <= 0 {
        return 0;
    }
    (ms + MS_PER_DAY - 1) / MS_PER_DAY
}

pub fn validate_interval(
    start_local: &str,
    end_local: &str,
    time_zone: Option<&str>,
) -> Result<Stay, ValidationError> {
    let start = parse_local_datetime(start_local)?;
    let end = parse_local_datetime(end_local)?;

    if end <= start {
        return Err(ValidationError::InvalidRange);
    }

    let days = days_ceil(&start, &end);
    if days < MIN_STAY_DAYS {
        return Err(ValidationError::BelowMinimumStay);
    }

    let time_zone = time_zone
        .map(str::trim)
        .filter(|tz| !tz.is_empty())
        .unwrap_or(DEFAULT_TIME_ZONE)
        .to_string();

    Ok(Stay {
        start,
        end,
        days,
        time_zone,
    })
}

pub fn validate_contact(name: &str, email: &str, phone: &str) -> Result<Contact, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingField("customerName"));
    }

    let email = email.trim();
    if !is_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    let phone = phone.trim();
    if !is_valid_phone(phone) {
        return Err(ValidationError::InvalidPhone);
    }

    Ok(Contact {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
    })
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_email(s: &str) -> bool {
    let s = s.trim();
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// North American numbering: 10 digits, or 11 with a leading country code 1.
/// Formatting characters are ignored.
pub fn is_valid_phone(s: &str) -> bool {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    digits.len() == 10 || (digits.len() == 11 && digits.starts_with('1'))
}

/// Rejects absent or empty values, in the order the request lists them.
pub fn require<'a>(fields: &[Option<&'a str>]) -> Result<Vec<&'a str>, ValidationError> {
    fields
        .iter()
        .map(|f| match f {
            Some(v) if !v.is_empty() => Ok(*v),
            _ => Err(ValidationError::MissingFields),
        })
        .collect()
}

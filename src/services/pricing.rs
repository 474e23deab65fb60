use serde::Serialize;

use crate::models::Service;

/// Price breakdown for a stay. All amounts are in US cents.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub days: i64,
    pub daily_rate_usd: u32,
    pub discount_pct: u32,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
}

pub fn discount_pct(days: i64) -> u32 {
    if days >= 15 {
        20
    } else if days >= 8 {
        10
    } else {
        0
    }
}

pub fn quote(service: &Service, days: i64) -> Quote {
    let pct = discount_pct(days);
    let subtotal_cents = days * i64::from(service.price_from_usd) * 100;
    let discount_cents = subtotal_cents * i64::from(pct) / 100;

    Quote {
        days,
        daily_rate_usd: service.price_from_usd,
        discount_pct: pct,
        subtotal_cents,
        discount_cents,
        total_cents: subtotal_cents - discount_cents,
    }
}

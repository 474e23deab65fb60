use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceType {
    Vehicle,
    Bike,
    Tour,
    Picnic,
}

/// A bookable offering. The catalog is static; see [`SERVICES`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: ServiceType,
    pub title: &'static str,
    pub short: &'static str,
    pub active: bool,
    pub price_from_usd: u32,
}

pub const SERVICES: &[Service] = &[
    Service {
        id: "jeep-wrangler",
        kind: ServiceType::Vehicle,
        title: "Jeep Wrangler Overland",
        short: "St. George pickup + optional LAS delivery. Easy for beginners.",
        active: true,
        price_from_usd: 180,
    },
    Service {
        id: "bike-rental",
        kind: ServiceType::Bike,
        title: "E-Bike Rental",
        short: "Coming soon.",
        active: false,
        price_from_usd: 79,
    },
    Service {
        id: "sunset-picnic",
        kind: ServiceType::Picnic,
        title: "Sunset Picnic Setup",
        short: "Coming soon.",
        active: false,
        price_from_usd: 149,
    },
];

pub fn find_service(id: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.id == id)
}

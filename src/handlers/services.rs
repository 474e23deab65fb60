use axum::extract::{Path, Query};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{find_service, Service, SERVICES};
use crate::services::booking::{self, BookingError};
use crate::services::pricing::Quote;
use crate::services::validation::ValidationError;

// GET /services
#[derive(Serialize)]
pub struct ServicesResponse {
    services: &'static [Service],
}

pub async fn list_services() -> Json<ServicesResponse> {
    Json(ServicesResponse { services: SERVICES })
}

// GET /services/:id
#[derive(Serialize)]
pub struct ServiceResponse {
    service: &'static Service,
}

pub async fn get_service(Path(id): Path<String>) -> Result<Json<ServiceResponse>, AppError> {
    let service = find_service(&id).ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;
    Ok(Json(ServiceResponse { service }))
}

// GET /quote?serviceId=&startAt=&endAt=
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteQuery {
    pub service_id: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
}

#[derive(Serialize)]
pub struct QuoteResponse {
    days: i64,
    quote: Quote,
}

pub async fn get_quote(Query(query): Query<QuoteQuery>) -> Result<Json<QuoteResponse>, AppError> {
    let service_id = query.service_id.as_deref().filter(|v| !v.is_empty());
    let start_at = query.start_at.as_deref().filter(|v| !v.is_empty());
    let end_at = query.end_at.as_deref().filter(|v| !v.is_empty());

    let (Some(service_id), Some(start_at), Some(end_at)) = (service_id, start_at, end_at) else {
        return Err(BookingError::from(ValidationError::MissingFields).into());
    };

    let (stay, quote) = booking::quote_stay(service_id, start_at, end_at)?;

    Ok(Json(QuoteResponse {
        days: stay.days,
        quote,
    }))
}

pub mod booking;
pub mod service;

pub use booking::{Booking, BookingListItem, BookingRecord, CreateBookingRequest};
pub use service::{find_service, Service, ServiceType, SERVICES};

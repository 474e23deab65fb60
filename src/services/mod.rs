pub mod booking;
pub mod calendar;
pub mod pricing;
pub mod validation;

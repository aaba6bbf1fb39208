//! Domain aggregates managed by the vaccination records service.

pub mod person;
pub mod types;
pub mod vaccine;

//! Database models for the people and vaccines tables.

#[cfg(feature = "server")]
pub mod config;
pub mod person;
pub mod vaccine;

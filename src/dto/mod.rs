//! DTO modules that bridge services with templates.

pub mod notification;
pub mod search;

//! Business operations sitting between routes and the repository traits.

pub mod errors;
pub mod person;
pub mod vaccine;

pub use errors::{ServiceError, ServiceResult};

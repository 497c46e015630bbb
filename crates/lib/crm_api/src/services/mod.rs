//! Business logic behind the handlers.

pub mod auth;
pub mod user;

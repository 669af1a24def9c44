//! Admin authentication payloads.

pub mod model;

pub use model::{AdminUser, LoginRequest, LoginResponse};

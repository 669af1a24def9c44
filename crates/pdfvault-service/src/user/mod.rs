//! User management screen.

pub mod service;

pub use service::UserService;

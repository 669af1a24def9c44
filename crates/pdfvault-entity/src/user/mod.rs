//! User domain entities.

pub mod model;
pub mod role;

pub use model::{UpdateUser, User, UserFilter};
pub use role::UserRole;

//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod item_repo;
pub mod session_repo;
pub mod user_repo;

pub use item_repo::{clamp_limit, ItemRepo};
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;

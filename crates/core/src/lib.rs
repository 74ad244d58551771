//! Stashpad domain logic.
//!
//! This crate has no internal dependencies and never touches the network or
//! a database. It holds the item domain types and their validation rules,
//! the pure filter/search projection used by dashboard views, and the
//! incremental feed loader that drives paginated item loading over an
//! abstract [`feed::ItemSource`].

pub mod error;
pub mod feed;
pub mod filter;
pub mod item;
pub mod types;

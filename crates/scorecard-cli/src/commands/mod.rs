//! CLI command implementations.

pub mod best;
pub mod profile;
pub mod rating;

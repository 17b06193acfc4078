//! Provider transport: JSON sources and the shared response cache.

mod cache;
mod client;
pub mod mock;

pub use cache::*;
pub use client::*;

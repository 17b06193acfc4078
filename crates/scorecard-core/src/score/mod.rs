//! Score-related types and data structures.
//!
//! This module contains types for representing canonical scores:
//! - `Rank` - achievement ranks (D through SSS+)
//! - `ComboTier`, `SyncTier`, `ClearTier` - play-quality lamps
//! - `Score`, `BestScores`, `Profile` - canonical records handed to renderers

mod lamp;
mod rank;
mod types;

pub use lamp::*;
pub use rank::*;
pub use types::*;

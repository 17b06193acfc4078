//! Chart-related types and chart identity resolution.
//!
//! This module contains:
//! - `Difficulty`, `ChartKind` - difficulty slots and maimai id spaces
//! - `Chart`, `ChartKey`, `InternalLevel` - resolved chart descriptors
//! - `ChartDatabase`, `LocalChartDatabase` - authoritative local chart data
//! - `ChartList`, `ChartResolver` - provider song lists and lookup policy

mod database;
mod difficulty;
mod level;
mod list;
mod resolver;
mod types;

pub use database::*;
pub use difficulty::*;
pub use level::*;
pub use list::*;
pub use resolver::*;
pub use types::*;

//! Utils Module - Shared Helpers
//!
//! Constants, report cache and scan telemetry.

pub mod cache;
pub mod constants;
pub mod telemetry;

pub use cache::*;
pub use constants::*;
pub use telemetry::*;

//! Core Module - Scoring Engine
//!
//! Pure scoring logic: wallet sub-scores, composite, reports and the
//! domain heuristic. No I/O happens below this module.

pub mod analyzer;
pub mod domain;
pub mod report;
pub mod risk_score;

pub use analyzer::*;
pub use domain::*;
pub use report::*;
pub use risk_score::*;

//! Ruster Shield Library
//!
//! Heuristic fraud risk scoring for blockchain addresses:
//! - Blacklist and suspicious address pattern matching
//! - Transaction behavior heuristics (rapid transfers, dust, automation)
//! - Jurisdiction risk
//! - Fixed recommendations and compliance flags per risk level
//!
//! A sibling heuristic scores domain names for phishing and impersonation.

pub mod api;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::core::{
    analyze_behavior_risk, analyze_domain, analyze_geo_risk, analyze_wallet_risk,
    generate_report, recommendations_for, score_wallet, score_wallet_with_weights, FraudAnalyzer,
};
pub use models::config::{
    DomainReferenceDatabase, EngineConfig, ReferenceData, ReferenceDatabase, ScoringWeights,
    ServerConfig, WeightMode,
};
pub use models::errors::{AppError, AppResult, ErrorCode};
pub use models::types::{
    ComplianceFlags, DomainAssessment, FraudReport, GeoEvidence, RiskAssessment, RiskLevel,
    SubScore, SubScores, TransactionEvidence,
};
pub use utils::cache::{CacheStats, ReportCache};
pub use utils::telemetry::{ScanKind, ScanStats, ScanTelemetry};

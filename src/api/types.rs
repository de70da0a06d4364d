//! API Request/Response Types

use serde::{Deserialize, Serialize};

use crate::models::errors::AppError;
use crate::models::types::{
    ComplianceFlags, DomainAssessment, FraudReport, GeoEvidence, RiskLevel, SubScores,
    TransactionEvidence,
};
use crate::utils::cache::CacheStats;
use crate::utils::constants::DEFAULT_BATCH_CONCURRENCY;
use crate::utils::telemetry::ScanStats;

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: "Invalid or missing API key".to_string(),
            details: None,
        }
    }

    pub fn rate_limited(retry_after: u64) -> Self {
        Self {
            code: "RATE_LIMITED".to_string(),
            message: format!("Rate limit exceeded. Retry after {} seconds", retry_after),
            details: Some(format!("retry_after: {}", retry_after)),
        }
    }
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            message: err.message.clone(),
            details: err.field.as_ref().map(|f| format!("field: {}", f)),
        }
    }
}

// ============================================
// Wallet Scan
// ============================================

/// `address` is optional here so a missing field maps to our own 400
#[derive(Debug, Default, Deserialize)]
pub struct WalletScanRequest {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub transaction_data: Option<TransactionEvidence>,
    #[serde(default)]
    pub geo_data: Option<GeoEvidence>,
}

#[derive(Debug, Serialize)]
pub struct WalletScanData {
    pub scan_id: String,
    pub address: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    /// Per-dimension breakdown
    pub fraud_indicators: SubScores,
    /// Flattened flags, wallet then behavior then geo
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub compliance_status: ComplianceFlags,
    pub cached: bool,
}

impl WalletScanData {
    pub fn from_report(scan_id: String, report: FraudReport, cached: bool) -> Self {
        let risk_factors = report.risk_factors();
        let FraudReport {
            address,
            assessment,
            recommendations,
            compliance,
        } = report;

        Self {
            scan_id,
            address,
            risk_score: assessment.risk_score,
            risk_level: assessment.risk_level,
            confidence: assessment.confidence,
            fraud_indicators: assessment.sub_scores,
            risk_factors,
            recommendations,
            compliance_status: compliance,
            cached,
        }
    }
}

// ============================================
// Domain Scan
// ============================================

#[derive(Debug, Default, Deserialize)]
pub struct DomainScanRequest {
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DomainScanData {
    pub scan_id: String,
    pub domain: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub fraud_indicators: Vec<String>,
    pub recommendations: Vec<String>,
}

impl DomainScanData {
    pub fn from_assessment(scan_id: String, assessment: DomainAssessment) -> Self {
        Self {
            scan_id,
            risk_score: assessment.sub_score.score,
            confidence: assessment.sub_score.confidence,
            fraud_indicators: assessment.sub_score.flags,
            domain: assessment.domain,
            risk_level: assessment.risk_level,
            recommendations: assessment.recommendations,
        }
    }
}

// ============================================
// Batch Scan
// ============================================

#[derive(Debug, Deserialize)]
pub struct BatchScanRequest {
    pub addresses: Vec<String>,
    /// Max concurrent scans (default: 10, max: 50)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_concurrency() -> usize {
    DEFAULT_BATCH_CONCURRENCY
}

#[derive(Debug, Serialize)]
pub struct BatchScanData {
    pub total_requested: usize,
    pub total_processed: usize,
    /// Addresses scoring above the threat threshold
    pub total_flagged: usize,
    pub results: Vec<BatchWalletResult>,
    pub processing_time_ms: f64,
}

#[derive(Debug, Serialize)]
pub struct BatchWalletResult {
    pub address: String,
    pub status: String, // "success" | "error"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub latency_ms: f64,
}

impl BatchWalletResult {
    pub fn success(report: &FraudReport, latency_ms: f64) -> Self {
        Self {
            address: report.address.clone(),
            status: "success".to_string(),
            risk_score: Some(report.assessment.risk_score),
            risk_level: Some(report.assessment.risk_level),
            error: None,
            latency_ms,
        }
    }

    pub fn failure(address: String, error: String, latency_ms: f64) -> Self {
        Self {
            address,
            status: "error".to_string(),
            risk_score: None,
            risk_level: None,
            error: Some(error),
            latency_ms,
        }
    }
}

// ============================================
// Stats / Health
// ============================================

#[derive(Debug, Serialize)]
pub struct StatsData {
    pub scans: ScanStats,
    pub cache: CacheStats,
    pub uptime_seconds: u64,
    pub api_version: String,
}

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub blacklist_entries: usize,
    /// Highest composite reachable by a wallet scan
    pub max_wallet_score: f64,
}

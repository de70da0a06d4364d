//! Type definitions for Ruster Shield
//! All core data structures for wallet and domain risk assessment

use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    AML_COMPLIANT_BELOW, EDD_REQUIRED_ABOVE, KYC_REQUIRED_ABOVE, LEVEL_CRITICAL_MIN,
    LEVEL_HIGH_MIN, LEVEL_LOW_MIN, LEVEL_MEDIUM_MIN, REPORTING_REQUIRED_ABOVE,
};

/// Clamp a score into [0, 1]. NaN collapses to 0.
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Risk level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Nothing notable
    Minimal,
    /// Minor concerns
    Low,
    /// Increased monitoring
    Medium,
    /// Manual review required
    High,
    /// Block and report
    Critical,
}

impl RiskLevel {
    /// Five-band step function used for wallet scans.
    /// Lower bound of each band is inclusive.
    pub fn classify(score: f64) -> Self {
        if score >= LEVEL_CRITICAL_MIN {
            Self::Critical
        } else if score >= LEVEL_HIGH_MIN {
            Self::High
        } else if score >= LEVEL_MEDIUM_MIN {
            Self::Medium
        } else if score >= LEVEL_LOW_MIN {
            Self::Low
        } else {
            Self::Minimal
        }
    }

    /// Four-band step function used for domain scans (no MINIMAL band).
    pub fn classify_domain(score: f64) -> Self {
        match Self::classify(score) {
            Self::Minimal => Self::Low,
            level => level,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Minimal => "MINIMAL",
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskLevel::Minimal => "✅",
            RiskLevel::Low => "🟡",
            RiskLevel::Medium => "🟠",
            RiskLevel::High => "🔴",
            RiskLevel::Critical => "💀",
        }
    }

    /// All levels, lowest first
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::Minimal,
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent per-dimension risk contribution before weighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    /// Score in [0, 1]
    pub score: f64,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Ordered human-readable flags
    pub flags: Vec<String>,
}

impl SubScore {
    /// Build a sub-score, clamping score and confidence into [0, 1]
    pub fn new(score: f64, confidence: f64, flags: Vec<String>) -> Self {
        Self {
            score: clamp_unit(score),
            confidence: clamp_unit(confidence),
            flags,
        }
    }

    /// Zero-confidence sub-score for a dimension with no evidence
    pub fn no_data(flag: &str) -> Self {
        Self::new(0.0, 0.0, vec![flag.to_string()])
    }
}

/// Transaction behavior summary supplied by an evidence provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionEvidence {
    #[serde(default)]
    pub transactions_per_hour: f64,
    #[serde(default, alias = "small_transactions")]
    pub small_transaction_count: u32,
    /// Number of round-amount transfers, when the provider tracks them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_amount_count: Option<u32>,
    /// Relative variance of gas prices across recent transactions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price_variance: Option<f64>,
    /// Transactions sharing the same gas price pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistent_gas_count: Option<u32>,
}

impl TransactionEvidence {
    pub fn new(transactions_per_hour: f64, small_transaction_count: u32) -> Self {
        Self {
            transactions_per_hour,
            small_transaction_count,
            ..Default::default()
        }
    }
}

/// Geolocation data supplied by an evidence provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoEvidence {
    #[serde(default)]
    pub country: Option<String>,
}

impl GeoEvidence {
    pub fn country(country: impl Into<String>) -> Self {
        Self {
            country: Some(country.into()),
        }
    }
}

/// Per-dimension breakdown of a wallet assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub wallet: SubScore,
    pub behavior: SubScore,
    pub geo: SubScore,
}

/// Composite risk assessment for one address.
/// Created once per scoring call and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: f64,
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub sub_scores: SubScores,
}

/// Compliance booleans derived from the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceFlags {
    pub aml_compliant: bool,
    pub kyc_required: bool,
    #[serde(rename = "enhanced_dd_required")]
    pub enhanced_due_diligence_required: bool,
    pub reporting_required: bool,
}

impl ComplianceFlags {
    /// Fixed cut points; deliberately distinct from the level bands
    pub fn from_score(risk_score: f64) -> Self {
        Self {
            aml_compliant: risk_score < AML_COMPLIANT_BELOW,
            kyc_required: risk_score > KYC_REQUIRED_ABOVE,
            enhanced_due_diligence_required: risk_score > EDD_REQUIRED_ABOVE,
            reporting_required: risk_score > REPORTING_REQUIRED_ABOVE,
        }
    }
}

/// Report view over a [`RiskAssessment`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudReport {
    pub address: String,
    pub assessment: RiskAssessment,
    pub recommendations: Vec<String>,
    pub compliance: ComplianceFlags,
}

impl FraudReport {
    /// All flags in dimension order: wallet, behavior, geo
    pub fn risk_factors(&self) -> Vec<String> {
        let scores = &self.assessment.sub_scores;
        scores
            .wallet
            .flags
            .iter()
            .chain(&scores.behavior.flags)
            .chain(&scores.geo.flags)
            .cloned()
            .collect()
    }

    /// Pretty print the report
    pub fn summary(&self) -> String {
        let a = &self.assessment;
        let mut output = format!(
            "\n{} Risk: {} | Address: {}\n",
            a.risk_level.emoji(),
            a.risk_level.as_str(),
            self.address
        );
        output.push_str(&format!("   Score: {:.3}\n", a.risk_score));
        output.push_str(&format!("   Confidence: {:.3}\n", a.confidence));

        let factors = self.risk_factors();
        if !factors.is_empty() {
            output.push_str("   Factors:\n");
            for factor in &factors {
                output.push_str(&format!("     - {}\n", factor));
            }
        }

        output.push_str("   Recommendations:\n");
        for rec in &self.recommendations {
            output.push_str(&format!("     - {}\n", rec));
        }

        output
    }
}

/// Result of the domain heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAssessment {
    pub domain: String,
    /// Score, confidence and indicators
    pub sub_score: SubScore,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
}

impl DomainAssessment {
    pub fn risk_score(&self) -> f64 {
        self.sub_score.score
    }

    pub fn indicators(&self) -> &[String] {
        &self.sub_score.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(RiskLevel::classify(0.8), RiskLevel::Critical);
        assert_eq!(RiskLevel::classify(0.79999), RiskLevel::High);
        assert_eq!(RiskLevel::classify(0.6), RiskLevel::High);
        assert_eq!(RiskLevel::classify(0.4), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(0.2), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(0.19999), RiskLevel::Minimal);
        assert_eq!(RiskLevel::classify(0.0), RiskLevel::Minimal);
    }

    #[test]
    fn test_classify_domain_has_no_minimal() {
        assert_eq!(RiskLevel::classify_domain(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::classify_domain(0.39), RiskLevel::Low);
        assert_eq!(RiskLevel::classify_domain(0.4), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify_domain(1.0), RiskLevel::Critical);
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Minimal < RiskLevel::Low);
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn test_risk_level_serializes_uppercase() {
        let json = serde_json::to_string(&RiskLevel::Minimal).unwrap();
        assert_eq!(json, "\"MINIMAL\"");
        let level: RiskLevel = serde_json::from_str("\"CRITICAL\"").unwrap();
        assert_eq!(level, RiskLevel::Critical);
    }

    #[test]
    fn test_sub_score_clamps() {
        let s = SubScore::new(1.5, -0.2, vec![]);
        assert_eq!(s.score, 1.0);
        assert_eq!(s.confidence, 0.0);
        assert_eq!(SubScore::new(f64::NAN, 0.5, vec![]).score, 0.0);
    }

    #[test]
    fn test_compliance_cut_points() {
        let at_04 = ComplianceFlags::from_score(0.4);
        assert!(!at_04.kyc_required);
        assert!(at_04.aml_compliant);

        let at_07 = ComplianceFlags::from_score(0.7);
        assert!(at_07.kyc_required);
        assert!(at_07.enhanced_due_diligence_required);
        assert!(!at_07.reporting_required);

        let at_08 = ComplianceFlags::from_score(0.8);
        assert!(!at_08.aml_compliant);
        assert!(at_08.reporting_required);
    }

    #[test]
    fn test_evidence_accepts_wire_names() {
        let ev: TransactionEvidence =
            serde_json::from_str(r#"{"transactions_per_hour": 60, "small_transactions": 12}"#)
                .unwrap();
        assert_eq!(ev.transactions_per_hour, 60.0);
        assert_eq!(ev.small_transaction_count, 12);
        assert!(ev.round_amount_count.is_none());
    }
}

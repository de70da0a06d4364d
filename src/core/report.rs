//! Fraud report generation
//!
//! A report is a pure view over a [`RiskAssessment`]: a fixed action list per
//! risk level plus compliance booleans. No clocks, no ids; callers that need
//! a scan id or timestamp attach them at their own boundary.

use crate::models::types::{ComplianceFlags, FraudReport, RiskAssessment, RiskLevel};

const CRITICAL_ACTIONS: &[&str] = &[
    "IMMEDIATE ACTION: Block all transactions",
    "Report to relevant authorities",
    "Freeze associated accounts",
    "Conduct thorough investigation",
];

const HIGH_ACTIONS: &[&str] = &[
    "Enhanced monitoring required",
    "Manual review of all transactions",
    "Additional KYC documentation needed",
    "Consider account restrictions",
];

const MEDIUM_ACTIONS: &[&str] = &[
    "Increased monitoring frequency",
    "Periodic manual reviews",
    "Document justification for continued service",
];

const LOW_ACTIONS: &[&str] = &["Standard monitoring protocols", "Routine compliance checks"];

const MINIMAL_ACTIONS: &[&str] = &["Regular monitoring sufficient", "Standard risk management"];

/// Static recommendation table
pub fn recommendations_for(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::Critical => CRITICAL_ACTIONS,
        RiskLevel::High => HIGH_ACTIONS,
        RiskLevel::Medium => MEDIUM_ACTIONS,
        RiskLevel::Low => LOW_ACTIONS,
        RiskLevel::Minimal => MINIMAL_ACTIONS,
    }
}

/// Attach recommendations and compliance flags to an assessment
pub fn generate_report(address: &str, assessment: &RiskAssessment) -> FraudReport {
    FraudReport {
        address: address.to_string(),
        assessment: assessment.clone(),
        recommendations: recommendations_for(assessment.risk_level)
            .iter()
            .map(|r| r.to_string())
            .collect(),
        compliance: ComplianceFlags::from_score(assessment.risk_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::{SubScore, SubScores};

    fn assessment(score: f64) -> RiskAssessment {
        RiskAssessment {
            risk_score: score,
            confidence: 0.5,
            risk_level: RiskLevel::classify(score),
            sub_scores: SubScores {
                wallet: SubScore::new(score, 0.8, vec![]),
                behavior: SubScore::no_data("No transaction data"),
                geo: SubScore::no_data("No geographical data"),
            },
        }
    }

    #[test]
    fn test_every_level_has_actions() {
        for level in RiskLevel::ALL {
            assert!(!recommendations_for(level).is_empty());
        }
        assert_eq!(recommendations_for(RiskLevel::Critical).len(), 4);
        assert_eq!(recommendations_for(RiskLevel::Minimal).len(), 2);
    }

    #[test]
    fn test_report_is_deterministic() {
        let a = assessment(0.65);
        let first = generate_report("0xabc", &a);
        let second = generate_report("0xabc", &a);
        assert_eq!(first, second);
        assert_eq!(first.recommendations[0], "Enhanced monitoring required");
    }

    #[test]
    fn test_compliance_independent_of_level() {
        // 0.65 is HIGH, yet reporting only kicks in above 0.7
        let report = generate_report("0xabc", &assessment(0.65));
        assert_eq!(report.assessment.risk_level, RiskLevel::High);
        assert!(report.compliance.kyc_required);
        assert!(report.compliance.enhanced_due_diligence_required);
        assert!(!report.compliance.reporting_required);
        assert!(report.compliance.aml_compliant);
    }
}

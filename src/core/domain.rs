//! Domain Fraud Heuristic
//!
//! Sibling of the wallet scorer for domain names. Four independent checks,
//! each contributing at most once (first matching entry wins):
//! - typosquat substring
//! - suspicious TLD suffix
//! - suspicious subdomain substring
//! - brand keyword not followed by ".com"

use tracing::debug;

use crate::models::config::DomainReferenceDatabase;
use crate::models::types::{DomainAssessment, RiskLevel, SubScore};
use crate::utils::constants::{
    CONFIDENCE_DOMAIN, DOMAIN_IMPERSONATION_INCREMENT, DOMAIN_REC_IMPERSONATION, DOMAIN_REC_SAFE,
    DOMAIN_REC_SUBDOMAIN, DOMAIN_REC_TLD, DOMAIN_REC_TYPOSQUAT, DOMAIN_SUBDOMAIN_INCREMENT,
    DOMAIN_TLD_INCREMENT, DOMAIN_TYPOSQUAT_INCREMENT,
};

/// Score a domain name against the domain reference lists
pub fn analyze_domain(domain: &str, db: &DomainReferenceDatabase) -> DomainAssessment {
    let lowered = domain.trim().to_lowercase();
    let mut score = 0.0;
    let mut indicators = Vec::new();
    let mut recommendations = Vec::new();

    if let Some(typo) = db.typosquatting.iter().find(|t| lowered.contains(t.as_str())) {
        score += DOMAIN_TYPOSQUAT_INCREMENT;
        indicators.push(format!("Potential typosquatting: Contains \"{}\"", typo));
        recommendations.push(DOMAIN_REC_TYPOSQUAT.to_string());
    }

    if let Some(tld) = db.suspicious_tlds.iter().find(|t| lowered.ends_with(t.as_str())) {
        score += DOMAIN_TLD_INCREMENT;
        indicators.push(format!("Suspicious TLD: {}", tld));
        recommendations.push(DOMAIN_REC_TLD.to_string());
    }

    if let Some(sub) = db
        .suspicious_subdomains
        .iter()
        .find(|s| lowered.contains(s.as_str()))
    {
        score += DOMAIN_SUBDOMAIN_INCREMENT;
        indicators.push(format!("Suspicious subdomain pattern: {}", sub));
        recommendations.push(DOMAIN_REC_SUBDOMAIN.to_string());
    }

    if let Some(keyword) = db.brand_keywords.iter().find(|k| {
        lowered.contains(k.as_str()) && !lowered.contains(&format!("{}.com", k))
    }) {
        score += DOMAIN_IMPERSONATION_INCREMENT;
        indicators.push(format!("Impersonation attempt: {}", keyword));
        recommendations.push(DOMAIN_REC_IMPERSONATION.to_string());
    }

    if recommendations.is_empty() {
        recommendations.push(DOMAIN_REC_SAFE.to_string());
    }

    let sub_score = SubScore::new(score, CONFIDENCE_DOMAIN, indicators);
    let risk_level = RiskLevel::classify_domain(sub_score.score);
    debug!(
        "🌐 Domain {}: score {:.2}, {} indicator(s)",
        lowered,
        sub_score.score,
        sub_score.flags.len()
    );

    DomainAssessment {
        domain: lowered,
        sub_score,
        risk_level,
        recommendations,
    }
}

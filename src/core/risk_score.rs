//! Risk Scoring Module
//!
//! Wallet risk is the weighted sum of three independent sub-scores:
//! - Wallet: blacklist membership and suspicious address patterns
//! - Behavior: transaction frequency / dust / automation heuristics
//! - Geo: jurisdiction of the transacting party
//!
//! Every function here is pure: no I/O, no clocks, no shared mutable state.
//! Missing evidence degrades confidence instead of failing.

use tracing::{debug, warn};

use crate::models::config::{ReferenceDatabase, ScoringWeights};
use crate::models::types::{
    GeoEvidence, RiskAssessment, RiskLevel, SubScore, SubScores, TransactionEvidence,
};
use crate::utils::constants::{
    CONFIDENCE_BEHAVIOR, CONFIDENCE_BLACKLISTED, CONFIDENCE_GEO, CONFIDENCE_WALLET,
    FLAG_BLACKLISTED, FLAG_HIGH_RISK_JURISDICTION, FLAG_MEDIUM_RISK_JURISDICTION, FLAG_NO_GEO_DATA,
    FLAG_NO_TRANSACTION_DATA, FLAG_SUSPICIOUS_PATTERN, GEO_HIGH_RISK_SCORE, GEO_MEDIUM_RISK_SCORE,
    PATTERN_MATCH_INCREMENT,
};

/// Blacklist and pattern analysis of the address itself.
///
/// A blacklist hit short-circuits with score 1.0 / confidence 1.0.
/// Otherwise each matching pattern adds 0.3 and one flag; flags are not
/// deduplicated, so two matching patterns yield two identical flags.
pub fn analyze_wallet_risk(address: &str, db: &ReferenceDatabase) -> SubScore {
    if db.is_blacklisted(address) {
        debug!("🚫 Wallet {} is blacklisted", address);
        return SubScore::new(
            1.0,
            CONFIDENCE_BLACKLISTED,
            vec![FLAG_BLACKLISTED.to_string()],
        );
    }

    let mut score = 0.0;
    let mut flags = Vec::new();

    // Patterns run against the raw address, not the normalized one
    for pattern in db.suspicious_patterns() {
        match pattern.is_match(address) {
            Ok(true) => {
                score += PATTERN_MATCH_INCREMENT;
                flags.push(FLAG_SUSPICIOUS_PATTERN.to_string());
            }
            Ok(false) => {}
            // Backtrack limit hit; counts as no match
            Err(e) => warn!("⚠️ Pattern {} aborted: {}", pattern.as_str(), e),
        }
    }

    debug!("👛 Wallet sub-score: {:.2} ({} pattern hits)", score, flags.len());
    SubScore::new(score, CONFIDENCE_WALLET, flags)
}

/// Transaction behavior heuristics.
///
/// The round-amount and gas-pattern rules only apply when the provider
/// supplied the corresponding optional fields.
pub fn analyze_behavior_risk(
    evidence: Option<&TransactionEvidence>,
    db: &ReferenceDatabase,
) -> SubScore {
    let Some(ev) = evidence else {
        return SubScore::no_data(FLAG_NO_TRANSACTION_DATA);
    };

    let rules = db.behavior_rules();
    let mut score = 0.0;
    let mut flags = Vec::new();

    let rapid = &rules.rapid_transactions;
    if ev.transactions_per_hour > rapid.threshold {
        score += rapid.risk_score;
        flags.push(rapid.description.clone());
    }

    let dust = &rules.dust_attacks;
    if ev.small_transaction_count > dust.count {
        score += dust.risk_score;
        flags.push(dust.description.clone());
    }

    let round = &rules.round_amounts;
    if ev.round_amount_count.is_some_and(|n| n > round.frequency) {
        score += round.risk_score;
        flags.push(round.description.clone());
    }

    let gas = &rules.gas_optimization;
    if let (Some(variance), Some(count)) = (ev.gas_price_variance, ev.consistent_gas_count) {
        if variance < gas.gas_price_variance && count > gas.consistency_threshold {
            score += gas.risk_score;
            flags.push(gas.description.clone());
        }
    }

    debug!("📈 Behavior sub-score: {:.2}", score);
    SubScore::new(score, CONFIDENCE_BEHAVIOR, flags)
}

/// Jurisdiction risk. Country names compare exactly.
pub fn analyze_geo_risk(evidence: Option<&GeoEvidence>, db: &ReferenceDatabase) -> SubScore {
    let Some(country) = evidence.and_then(|g| g.country.as_deref()) else {
        return SubScore::no_data(FLAG_NO_GEO_DATA);
    };

    let (score, flags) = if db.is_high_risk_jurisdiction(country) {
        (GEO_HIGH_RISK_SCORE, vec![FLAG_HIGH_RISK_JURISDICTION.to_string()])
    } else if db.is_medium_risk_jurisdiction(country) {
        (GEO_MEDIUM_RISK_SCORE, vec![FLAG_MEDIUM_RISK_JURISDICTION.to_string()])
    } else {
        (0.0, Vec::new())
    };

    debug!("🌍 Geo sub-score for {}: {:.2}", country, score);
    SubScore::new(score, CONFIDENCE_GEO, flags)
}

/// Score a wallet with the default (as-coded) weights.
///
/// With default weights the composite never exceeds 0.7, because the
/// 0.3 contract weight has no input on this path.
pub fn score_wallet(
    address: &str,
    db: &ReferenceDatabase,
    transaction: Option<&TransactionEvidence>,
    geo: Option<&GeoEvidence>,
) -> RiskAssessment {
    score_wallet_with_weights(address, db, transaction, geo, &ScoringWeights::default())
}

/// Score a wallet with explicit weights
pub fn score_wallet_with_weights(
    address: &str,
    db: &ReferenceDatabase,
    transaction: Option<&TransactionEvidence>,
    geo: Option<&GeoEvidence>,
    weights: &ScoringWeights,
) -> RiskAssessment {
    let wallet = analyze_wallet_risk(address, db);
    let behavior = analyze_behavior_risk(transaction, db);
    let geo = analyze_geo_risk(geo, db);

    let risk_score = weights.composite(wallet.score, behavior.score, geo.score);
    let confidence = weights.composite(wallet.confidence, behavior.confidence, geo.confidence);
    let risk_level = RiskLevel::classify(risk_score);

    debug!(
        "🧮 Composite for {}: score {:.3}, confidence {:.3}, level {}",
        address, risk_score, confidence, risk_level
    );

    RiskAssessment {
        risk_score,
        confidence,
        risk_level,
        sub_scores: SubScores {
            wallet,
            behavior,
            geo,
        },
    }
}

//! Integration tests for the Ruster Shield scoring engine

use proptest::prelude::*;
use ruster_shield::utils::constants::{BLACKLISTED_ADDRESSES, DOMAIN_TYPOSQUAT_INCREMENT, TYPOSQUATTING};
use ruster_shield::{
    analyze_domain, analyze_wallet_risk, generate_report, recommendations_for, score_wallet,
    score_wallet_with_weights,
    DomainReferenceDatabase, EngineConfig, ErrorCode, FraudAnalyzer, GeoEvidence,
    ReferenceDatabase, RiskLevel, ScoringWeights, TransactionEvidence,
};
use std::io::Write;

const BLACKLISTED: &str = "0x098B716B8Aaf21512996dC57EB0615e2383E2f96";
const CLEAN: &str = "0x5a52e96bacdabb82fd05763e25335261b270efcb";
/// Matches `^0xdeadbeef` only
const PATTERN_HIT: &str = "0xdeadbeefc0ffee1234567890abcdef1234567890";

fn db() -> ReferenceDatabase {
    ReferenceDatabase::builtin().unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_scenario_blacklisted_without_evidence() {
    let a = score_wallet(BLACKLISTED, &db(), None, None);
    assert!(approx(a.risk_score, 0.4));
    // 0.4 sits on the MEDIUM lower bound
    assert_eq!(a.risk_level, RiskLevel::Medium);
    assert_eq!(a.sub_scores.wallet.flags, vec!["Blacklisted address".to_string()]);
}

#[test]
fn test_scenario_rapid_transactions_from_high_risk_country() {
    let tx = TransactionEvidence::new(60.0, 0);
    let geo = GeoEvidence::country("Russia");
    let a = score_wallet(CLEAN, &db(), Some(&tx), Some(&geo));

    assert!(approx(a.sub_scores.wallet.score, 0.0));
    assert!(approx(a.sub_scores.behavior.score, 0.7));
    assert!(approx(a.sub_scores.geo.score, 0.9));
    assert!(approx(a.risk_score, 0.23));
    assert_eq!(a.risk_level, RiskLevel::Low);
    assert!(approx(a.confidence, 0.8 * 0.4 + 0.7 * 0.2 + 0.6 * 0.1));
}

#[test]
fn test_scenario_clean_without_evidence() {
    let a = score_wallet(CLEAN, &db(), None, None);
    assert_eq!(a.risk_score, 0.0);
    assert_eq!(a.risk_level, RiskLevel::Minimal);
    // Wallet confidence is fixed at 0.8 even with no hits, so only the
    // evidence-backed dimensions drop to zero
    assert!(approx(a.confidence, 0.32));
    assert_eq!(a.sub_scores.behavior.confidence, 0.0);
    assert_eq!(a.sub_scores.geo.confidence, 0.0);

    let report = generate_report(CLEAN, &a);
    let expected: Vec<String> = recommendations_for(RiskLevel::Minimal)
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(report.recommendations, expected);
    assert!(report.compliance.aml_compliant);
    assert!(!report.compliance.kyc_required);
}

#[test]
fn test_as_coded_weights_cap_wallet_scans() {
    let tx = TransactionEvidence::new(500.0, 500);
    let geo = GeoEvidence::country("North Korea");
    let a = score_wallet(BLACKLISTED, &db(), Some(&tx), Some(&geo));
    assert!(a.risk_score <= 0.7 + 1e-12);
    assert_ne!(a.risk_level, RiskLevel::Critical);

    let report = generate_report(BLACKLISTED, &a);
    // The cap keeps AML compliance true and reporting off for every wallet
    assert!(report.compliance.aml_compliant);
    assert!(!report.compliance.reporting_required);
}

#[test]
fn test_report_round_trips_through_json() {
    let a = score_wallet(BLACKLISTED, &db(), None, None);
    let report = generate_report(BLACKLISTED, &a);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["assessment"]["risk_level"], "MEDIUM");
    assert_eq!(json["compliance"]["enhanced_dd_required"], false);
}

#[test]
fn test_reference_database_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "blacklisted_addresses": ["0xFixture"],
            "suspicious_patterns": ["^0xdead"],
            "high_risk_jurisdictions": ["Atlantis"],
            "medium_risk_jurisdictions": []
        }}"#
    )
    .unwrap();

    let config = EngineConfig {
        reference_db_path: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let analyzer = FraudAnalyzer::from_config(&config).unwrap();

    let hit = analyzer.scan_wallet("0xfixture", None, None).unwrap();
    assert!(approx(hit.assessment.risk_score, 0.4));

    // Built-in blacklist entries are gone
    let former = analyzer.scan_wallet(BLACKLISTED, None, None).unwrap();
    assert_eq!(former.assessment.risk_score, 0.0);

    let geo = GeoEvidence::country("Atlantis");
    let a = analyzer.score_wallet(CLEAN, None, Some(&geo));
    assert!(approx(a.sub_scores.geo.score, 0.9));
}

#[test]
fn test_unreadable_reference_database_is_fatal() {
    let config = EngineConfig {
        reference_db_path: Some("/nonexistent/ruster/reference.json".into()),
        ..Default::default()
    };
    let err = FraudAnalyzer::from_config(&config).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissingReferenceData);
}

#[test]
fn test_renormalized_weights_reach_critical() {
    let analyzer = FraudAnalyzer::new(
        db(),
        DomainReferenceDatabase::builtin(),
        ScoringWeights::renormalized(),
    );
    let tx = TransactionEvidence::new(500.0, 500);
    let geo = GeoEvidence::country("Iran");
    let report = analyzer.scan_wallet(BLACKLISTED, Some(&tx), Some(&geo)).unwrap();
    assert_eq!(report.assessment.risk_level, RiskLevel::Critical);
    assert!(report.compliance.reporting_required);
}

fn weights_for(renormalize: bool) -> ScoringWeights {
    if renormalize {
        ScoringWeights::renormalized()
    } else {
        ScoringWeights::default()
    }
}

fn mixed_case(address: &str, mask: &[bool]) -> String {
    address
        .chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
        .collect()
}

proptest! {
    #[test]
    fn prop_blacklist_is_case_insensitive(
        address in prop::sample::select(BLACKLISTED_ADDRESSES),
        mask in prop::collection::vec(any::<bool>(), 1..64),
    ) {
        let sub = analyze_wallet_risk(&mixed_case(address, &mask), &db());
        prop_assert_eq!(sub.score, 1.0);
        prop_assert_eq!(sub.confidence, 1.0);
        prop_assert_eq!(sub.flags, vec!["Blacklisted address".to_string()]);
    }

    #[test]
    fn prop_scores_stay_in_unit_interval(
        address in "[0-9a-fA-Fx]{0,50}",
        tph in prop::option::of(0.0f64..10_000.0),
        small in 0u32..1_000,
        country in prop::option::of(prop::sample::select(vec!["Iran", "China", "France", ""])),
    ) {
        let tx = tph.map(|t| TransactionEvidence::new(t, small));
        let geo = country.map(GeoEvidence::country);
        for weights in [ScoringWeights::default(), ScoringWeights::renormalized()] {
            let a = score_wallet_with_weights(&address, &db(), tx.as_ref(), geo.as_ref(), &weights);
            prop_assert!((0.0..=1.0).contains(&a.risk_score));
            prop_assert!((0.0..=1.0).contains(&a.confidence));
            prop_assert_eq!(a.risk_level, RiskLevel::classify(a.risk_score));
        }
    }

    #[test]
    fn prop_score_monotonic_in_behavior(
        low in 0.0f64..200.0,
        extra in 0.0f64..200.0,
        small_low in 0u32..50,
        small_extra in 0u32..50,
        renormalize in any::<bool>(),
    ) {
        let db = db();
        let weights = weights_for(renormalize);
        let geo = GeoEvidence::country("Nigeria");
        let lower = TransactionEvidence::new(low, small_low);
        let higher = TransactionEvidence::new(low + extra, small_low + small_extra);
        let a = score_wallet_with_weights(CLEAN, &db, Some(&lower), Some(&geo), &weights);
        let b = score_wallet_with_weights(CLEAN, &db, Some(&higher), Some(&geo), &weights);
        prop_assert!(b.risk_score >= a.risk_score);
    }

    #[test]
    fn prop_score_monotonic_in_geo(
        address in prop::sample::select(vec![CLEAN, PATTERN_HIT, BLACKLISTED]),
        tph in prop::option::of(0.0f64..200.0),
        small in 0u32..50,
        renormalize in any::<bool>(),
    ) {
        let db = db();
        let weights = weights_for(renormalize);
        let tx = tph.map(|t| TransactionEvidence::new(t, small));
        // No country, then medium risk, then high risk
        let tiers = [None, Some(GeoEvidence::country("Nigeria")), Some(GeoEvidence::country("Iran"))];
        let scores: Vec<f64> = tiers
            .iter()
            .map(|geo| score_wallet_with_weights(address, &db, tx.as_ref(), geo.as_ref(), &weights).risk_score)
            .collect();
        prop_assert!(scores.windows(2).all(|w| w[1] >= w[0]), "{:?}", scores);
    }

    #[test]
    fn prop_score_monotonic_in_wallet(
        tph in prop::option::of(0.0f64..200.0),
        small in 0u32..50,
        country in prop::option::of(prop::sample::select(vec!["Iran", "Nigeria", "France"])),
        renormalize in any::<bool>(),
    ) {
        let db = db();
        let weights = weights_for(renormalize);
        let tx = tph.map(|t| TransactionEvidence::new(t, small));
        let geo = country.map(GeoEvidence::country);
        // Clean, then one pattern hit, then blacklisted
        let scores: Vec<f64> = [CLEAN, PATTERN_HIT, BLACKLISTED]
            .iter()
            .map(|a| score_wallet_with_weights(a, &db, tx.as_ref(), geo.as_ref(), &weights).risk_score)
            .collect();
        prop_assert!(scores.windows(2).all(|w| w[1] >= w[0]), "{:?}", scores);
    }

    #[test]
    fn prop_report_is_deterministic(tph in 0.0f64..200.0, small in 0u32..30) {
        let tx = TransactionEvidence::new(tph, small);
        let a = score_wallet(CLEAN, &db(), Some(&tx), None);
        prop_assert_eq!(generate_report(CLEAN, &a), generate_report(CLEAN, &a));
    }

    #[test]
    fn prop_typosquat_always_contributes(
        typo in prop::sample::select(TYPOSQUATTING),
        prefix in "[a-z]{0,8}",
        suffix in "[a-z]{0,8}",
    ) {
        let domain = format!("{}{}{}.com", prefix, typo, suffix);
        let a = analyze_domain(&domain, &DomainReferenceDatabase::builtin());
        prop_assert!(a.risk_score() >= DOMAIN_TYPOSQUAT_INCREMENT);
    }
}

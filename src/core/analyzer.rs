//! Fraud analyzer
//! Binds the scoring functions to a loaded reference database and weights

use std::sync::Arc;
use tracing::{info, warn};

use crate::core::domain::analyze_domain;
use crate::core::report::generate_report;
use crate::core::risk_score::score_wallet_with_weights;
use crate::models::config::{
    DomainReferenceDatabase, EngineConfig, ReferenceDatabase, ScoringWeights,
};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{
    DomainAssessment, FraudReport, GeoEvidence, RiskAssessment, TransactionEvidence,
};

/// Scoring entry point shared across threads and request handlers.
/// Cloning is cheap; databases are behind `Arc` and never mutated.
#[derive(Debug, Clone)]
pub struct FraudAnalyzer {
    reference: Arc<ReferenceDatabase>,
    domains: Arc<DomainReferenceDatabase>,
    weights: ScoringWeights,
}

impl FraudAnalyzer {
    pub fn new(
        reference: ReferenceDatabase,
        domains: DomainReferenceDatabase,
        weights: ScoringWeights,
    ) -> Self {
        Self {
            reference: Arc::new(reference),
            domains: Arc::new(domains),
            weights,
        }
    }

    /// Built-in datasets with as-coded weights
    pub fn builtin() -> AppResult<Self> {
        Ok(Self::new(
            ReferenceDatabase::builtin()?,
            DomainReferenceDatabase::builtin(),
            ScoringWeights::default(),
        ))
    }

    /// Load databases from the configured paths. Failure here is fatal.
    pub fn from_config(config: &EngineConfig) -> AppResult<Self> {
        let reference = config.load_reference_database()?;
        let domains = config.load_domain_database()?;
        info!(
            "🛡️ Analyzer ready: {} blacklisted addresses, {} patterns, weights {:?}",
            reference.blacklist_len(),
            reference.suspicious_patterns().len(),
            config.weights.mode
        );
        Ok(Self::new(reference, domains, config.weights))
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn reference(&self) -> &ReferenceDatabase {
        &self.reference
    }

    /// Raw assessment without validation
    pub fn score_wallet(
        &self,
        address: &str,
        transaction: Option<&TransactionEvidence>,
        geo: Option<&GeoEvidence>,
    ) -> RiskAssessment {
        score_wallet_with_weights(address, &self.reference, transaction, geo, &self.weights)
    }

    /// Validate, score and report one address
    pub fn scan_wallet(
        &self,
        address: &str,
        transaction: Option<&TransactionEvidence>,
        geo: Option<&GeoEvidence>,
    ) -> AppResult<FraudReport> {
        if address.trim().is_empty() {
            warn!("⚠️ Rejected wallet scan: empty address");
            return Err(AppError::invalid_argument("address"));
        }

        // Scored untrimmed: anchored patterns must see the caller's input
        let assessment = self.score_wallet(address, transaction, geo);
        Ok(generate_report(address, &assessment))
    }

    pub fn scan_domain(&self, domain: &str) -> AppResult<DomainAssessment> {
        if domain.trim().is_empty() {
            warn!("⚠️ Rejected domain scan: empty domain");
            return Err(AppError::invalid_argument("domain"));
        }
        Ok(analyze_domain(domain, &self.domains))
    }

    /// Scan many addresses without evidence; results keep input order
    pub fn scan_batch<S: AsRef<str>>(&self, addresses: &[S]) -> Vec<AppResult<FraudReport>> {
        addresses
            .iter()
            .map(|a| self.scan_wallet(a.as_ref(), None, None))
            .collect()
    }
}
